//! Test fixture creation
//!
//! Builds the temporary database directory every test server starts from,
//! and the payload the stub external API serves.

use super::constants::*;
use anyhow::Result;
use chrono::{TimeZone, Utc};
use jobboard_server::job::{JobStatus, NewJob, SqliteJobStore};
use jobboard_server::user::auth::hash_password;
use jobboard_server::user::{NewUser, SqliteUserStore, UserRole};
use jobboard_server::{JobStore, UserStore};
use serde_json::{json, Value};
use tempfile::TempDir;

/// Creates a temp directory holding jobs.db and user.db, seeded with two
/// internal jobs and one user.
pub fn create_test_db_dir() -> Result<TempDir> {
    let dir = TempDir::new()?;

    let job_store = SqliteJobStore::new(dir.path().join("jobs.db"))?;
    let publish_date = Utc.with_ymd_and_hms(2026, 1, 15, 9, 0, 0).unwrap();
    job_store.create_job(NewJob {
        title: SEEDED_JOB_TITLE.to_string(),
        description: "Design and run our job matching services".to_string(),
        company: SEEDED_JOB_COMPANY.to_string(),
        location: "Madrid".to_string(),
        publish_date,
        expiration_date: Some(Utc.with_ymd_and_hms(2027, 1, 15, 9, 0, 0).unwrap()),
        status: JobStatus::Active,
    })?;
    job_store.create_job(NewJob {
        title: SEEDED_JOB_2_TITLE.to_string(),
        description: "Build dashboards with TypeScript".to_string(),
        company: "Pixel Co".to_string(),
        location: "Lisbon".to_string(),
        publish_date,
        expiration_date: Some(Utc.with_ymd_and_hms(2026, 12, 31, 0, 0, 0).unwrap()),
        status: JobStatus::Active,
    })?;

    let user_store = SqliteUserStore::new(dir.path().join("user.db"))?;
    user_store.create_user(NewUser {
        username: SEEDED_USERNAME.to_string(),
        email: SEEDED_EMAIL.to_string(),
        password_hash: hash_password(SEEDED_PASSWORD)?,
        role: UserRole::User,
        first_name: Some("Test".to_string()),
        last_name: None,
    })?;

    Ok(dir)
}

/// Positional records as the external jobs API sends them:
/// `[title, salary, country, skills]`.
pub fn external_jobs_payload() -> Value {
    json!([
        [EXTERNAL_JOB_TITLE, 60000, "Spain", ["go", "docker"]],
        [EXTERNAL_JOB_2_TITLE, 75000.5, "Germany", ["python", "spark"]],
        [null, null, null, null]
    ])
}

/// A complete create-job request body.
pub fn new_job_body(title: &str) -> Value {
    json!({
        "title": title,
        "description": "Keep the lights on",
        "company": "Acme",
        "location": "Remote",
        "expirationDate": "2030-01-01T00:00:00Z"
    })
}
