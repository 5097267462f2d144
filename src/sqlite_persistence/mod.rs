mod versioned_schema;

pub use versioned_schema::{
    open_versioned_db, Column, SqlType, Table, VersionedSchema, BASE_DB_VERSION,
    DEFAULT_TIMESTAMP,
};

use anyhow::{anyhow, Result};
use std::time::Duration;
use tracing::{error, info};

/// How many times, and how far apart, a store tries to open its database
/// before startup gives up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub interval: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            interval: Duration::from_millis(5000),
        }
    }
}

/// Runs `open` until it succeeds or the policy runs out of attempts, sleeping
/// on the runtime timer between attempts. Returns the last error when every
/// attempt failed.
pub async fn open_with_retry<T, F>(what: &str, policy: RetryPolicy, mut open: F) -> Result<T>
where
    F: FnMut() -> Result<T>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut last_error = None;

    for attempt in 1..=max_attempts {
        info!("Opening {} (attempt {}/{})...", what, attempt, max_attempts);
        match open() {
            Ok(value) => {
                info!("Opened {}.", what);
                return Ok(value);
            }
            Err(err) => {
                error!("Failed to open {}: {:#}", what, err);
                last_error = Some(err);
                if attempt < max_attempts {
                    tokio::time::sleep(policy.interval).await;
                }
            }
        }
    }

    let err = last_error.unwrap_or_else(|| anyhow!("no attempt was made"));
    Err(err.context(format!(
        "Could not open {} after {} attempts",
        what, max_attempts
    )))
}
