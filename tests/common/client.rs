//! HTTP client for end-to-end tests
//!
//! Wraps reqwest with one method per API endpoint. When API routes or request
//! formats change, update only this file.

use super::constants::*;
use reqwest::Response;
use serde_json::Value;
use std::time::Duration;

pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    pub base_url: String,
}

impl TestClient {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self { client, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.base_url, path)
    }

    // ========================================================================
    // Server
    // ========================================================================

    pub async fn get_home(&self) -> Response {
        self.client
            .get(format!("{}/", self.base_url))
            .send()
            .await
            .expect("Home request failed")
    }

    // ========================================================================
    // Jobs
    // ========================================================================

    /// GET /api/v1/jobs with the given query pairs
    pub async fn list_jobs(&self, query: &[(&str, &str)]) -> Response {
        self.client
            .get(self.url("/jobs"))
            .query(query)
            .send()
            .await
            .expect("List jobs request failed")
    }

    pub async fn get_job(&self, id: i64) -> Response {
        self.get_job_raw(&id.to_string()).await
    }

    /// GET /api/v1/jobs/{id} with an arbitrary id segment
    pub async fn get_job_raw(&self, id: &str) -> Response {
        self.client
            .get(self.url(&format!("/jobs/{}", id)))
            .send()
            .await
            .expect("Get job request failed")
    }

    pub async fn create_job(&self, body: &Value) -> Response {
        self.client
            .post(self.url("/jobs"))
            .json(body)
            .send()
            .await
            .expect("Create job request failed")
    }

    pub async fn update_job(&self, id: i64, body: &Value) -> Response {
        self.client
            .put(self.url(&format!("/jobs/{}", id)))
            .json(body)
            .send()
            .await
            .expect("Update job request failed")
    }

    pub async fn delete_job(&self, id: i64) -> Response {
        self.client
            .delete(self.url(&format!("/jobs/{}", id)))
            .send()
            .await
            .expect("Delete job request failed")
    }

    // ========================================================================
    // Users
    // ========================================================================

    pub async fn list_users(&self) -> Response {
        self.client
            .get(self.url("/users"))
            .send()
            .await
            .expect("List users request failed")
    }

    pub async fn get_user(&self, id: i64) -> Response {
        self.client
            .get(self.url(&format!("/users/{}", id)))
            .send()
            .await
            .expect("Get user request failed")
    }

    pub async fn create_user(&self, body: &Value) -> Response {
        self.client
            .post(self.url("/users"))
            .json(body)
            .send()
            .await
            .expect("Create user request failed")
    }

    pub async fn update_user(&self, id: i64, body: &Value) -> Response {
        self.client
            .put(self.url(&format!("/users/{}", id)))
            .json(body)
            .send()
            .await
            .expect("Update user request failed")
    }

    pub async fn delete_user(&self, id: i64) -> Response {
        self.client
            .delete(self.url(&format!("/users/{}", id)))
            .send()
            .await
            .expect("Delete user request failed")
    }
}
