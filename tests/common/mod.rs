//! Common test infrastructure
//!
//! Tests should only import from this module, not from internal submodules.
//!
//! # Example
//!
//! ```no_run
//! mod common;
//! use common::{TestServer, TestClient, SEEDED_JOB_ID};
//! use reqwest::StatusCode;
//!
//! #[tokio::test]
//! async fn test_get_job() {
//!     let server = TestServer::spawn().await;
//!     let client = TestClient::new(server.base_url.clone());
//!
//!     let response = client.get_job(SEEDED_JOB_ID).await;
//!     assert_eq!(response.status(), StatusCode::OK);
//! }
//! ```

mod client;
mod constants;
mod fixtures;
mod server;

pub use client::TestClient;
pub use constants::*;
pub use server::{StubExternalApi, TestServer};

#[allow(unused_imports)]
pub(crate) use fixtures::{create_test_db_dir, external_jobs_payload, new_job_body};
