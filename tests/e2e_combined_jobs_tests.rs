//! End-to-end tests for the combined jobs listing
//!
//! Internal jobs come from the server's database, external ones from a stub
//! of the external jobs API.

mod common;

use common::{
    StubExternalApi, TestClient, TestServer, EXTERNAL_JOBS_COUNT, EXTERNAL_JOB_2_TITLE,
    EXTERNAL_JOB_TITLE, SEEDED_JOBS_COUNT, SEEDED_JOB_2_TITLE, SEEDED_JOB_ID, SEEDED_JOB_TITLE,
};
use reqwest::StatusCode;
use serde_json::{json, Value};

fn titles(jobs: &Value) -> Vec<&str> {
    jobs.as_array()
        .unwrap()
        .iter()
        .map(|job| job["title"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn test_lists_external_then_internal_jobs() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let response = client.list_jobs(&[]).await;
    assert_eq!(response.status(), StatusCode::OK);

    let jobs: Value = response.json().await.unwrap();
    assert_eq!(
        titles(&jobs),
        vec![
            EXTERNAL_JOB_TITLE,
            EXTERNAL_JOB_2_TITLE,
            "No title provided",
            SEEDED_JOB_TITLE,
            SEEDED_JOB_2_TITLE,
        ]
    );
    assert_eq!(jobs.as_array().unwrap().len(), EXTERNAL_JOBS_COUNT + SEEDED_JOBS_COUNT);
}

#[tokio::test]
async fn test_external_jobs_get_fallbacks() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let response = client.list_jobs(&[("jobs", "external")]).await;
    assert_eq!(response.status(), StatusCode::OK);

    let jobs: Value = response.json().await.unwrap();
    assert_eq!(
        jobs[0],
        json!({
            "title": EXTERNAL_JOB_TITLE,
            "salary": 60000.0,
            "location": "Spain",
            "skills": ["go", "docker"],
            "description": "No description provided"
        })
    );
    assert_eq!(
        jobs[2],
        json!({
            "title": "No title provided",
            "location": "No country provided",
            "skills": [],
            "description": "No description provided"
        })
    );
}

#[tokio::test]
async fn test_internal_jobs_keep_their_fields() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let response = client.list_jobs(&[("jobs", "INTERNAL")]).await;
    assert_eq!(response.status(), StatusCode::OK);

    let jobs: Value = response.json().await.unwrap();
    assert_eq!(titles(&jobs), vec![SEEDED_JOB_TITLE, SEEDED_JOB_2_TITLE]);
    assert_eq!(jobs[0]["company"], "Ferris Labs");
    assert_eq!(jobs[0]["publishDate"], "2026-01-15T09:00:00Z");
    assert!(jobs[0].get("id").is_none());
    assert!(jobs[0].get("salary").is_none());
}

#[tokio::test]
async fn test_filters_are_case_insensitive_and_combined() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let response = client.list_jobs(&[("title", "DEVELOPER")]).await;
    let jobs: Value = response.json().await.unwrap();
    assert_eq!(titles(&jobs), vec![EXTERNAL_JOB_TITLE, SEEDED_JOB_2_TITLE]);

    let response = client
        .list_jobs(&[("title", "developer"), ("location", "lisbon")])
        .await;
    let jobs: Value = response.json().await.unwrap();
    assert_eq!(titles(&jobs), vec![SEEDED_JOB_2_TITLE]);

    // External jobs have no company, so a company filter keeps internal ones only
    let response = client.list_jobs(&[("company", "ferris")]).await;
    let jobs: Value = response.json().await.unwrap();
    assert_eq!(titles(&jobs), vec![SEEDED_JOB_TITLE]);

    // External jobs all share the placeholder description
    let response = client.list_jobs(&[("description", "no description")]).await;
    let jobs: Value = response.json().await.unwrap();
    assert_eq!(jobs.as_array().unwrap().len(), EXTERNAL_JOBS_COUNT);
}

#[tokio::test]
async fn test_no_match_returns_no_content() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let response = client.list_jobs(&[("title", "astronaut")]).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(response.bytes().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_source_selection_lists_both() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let response = client.list_jobs(&[("jobs", "everything")]).await;
    assert_eq!(response.status(), StatusCode::OK);
    let jobs: Value = response.json().await.unwrap();
    assert_eq!(jobs.as_array().unwrap().len(), EXTERNAL_JOBS_COUNT + SEEDED_JOBS_COUNT);
}

#[tokio::test]
async fn test_created_and_deleted_jobs_show_in_listing() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let response = client.create_job(&common::new_job_body("Rust Embedded Engineer")).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let response = client.delete_job(SEEDED_JOB_ID).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = client.list_jobs(&[("jobs", "internal")]).await;
    let jobs: Value = response.json().await.unwrap();
    assert_eq!(titles(&jobs), vec![SEEDED_JOB_2_TITLE, "Rust Embedded Engineer"]);
}

#[tokio::test]
async fn test_failing_external_api_fails_the_listing() {
    let server = TestServer::spawn_with_external(StubExternalApi::failing().await).await;
    let client = TestClient::new(server.base_url.clone());

    let response = client.list_jobs(&[]).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"error": "Internal server error"}));

    let response = client.list_jobs(&[("jobs", "external")]).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    // Internal-only listings never call the external API
    let response = client.list_jobs(&[("jobs", "internal")]).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_non_array_external_payload_fails_the_listing() {
    let external = StubExternalApi::serving(json!({"jobs": []})).await;
    let server = TestServer::spawn_with_external(external).await;
    let client = TestClient::new(server.base_url.clone());

    let response = client.list_jobs(&[]).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_slow_external_api_times_out() {
    let server = TestServer::spawn_with_external(StubExternalApi::slow().await).await;
    let client = TestClient::new(server.base_url.clone());

    let response = client.list_jobs(&[("jobs", "external")]).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
