mod file_config;

pub use file_config::FileConfig;

use crate::server::RequestsLoggingLevel;
use crate::sqlite_persistence::RetryPolicy;
use anyhow::{bail, Result};
use clap::ValueEnum;
use std::path::PathBuf;
use std::time::Duration;

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub db_dir: Option<PathBuf>,
    pub port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub external_jobs_url: Option<String>,
    pub external_jobs_timeout_sec: u64,
    pub db_connect_retries: u32,
    pub db_retry_interval_ms: u64,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db_dir: PathBuf,
    pub port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub external_jobs_url: String,
    pub external_jobs_timeout_sec: u64,
    pub db_connect_retries: u32,
    pub db_retry_interval_ms: u64,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let db_dir = file
            .db_dir
            .map(PathBuf::from)
            .or_else(|| cli.db_dir.clone())
            .ok_or_else(|| {
                anyhow::anyhow!("db_dir must be specified via --db-dir or in config file")
            })?;

        if !db_dir.exists() {
            bail!("Database directory does not exist: {:?}", db_dir);
        }
        if !db_dir.is_dir() {
            bail!("db_dir is not a directory: {:?}", db_dir);
        }

        let port = file.port.unwrap_or(cli.port);

        let logging_level = file
            .logging_level
            .and_then(|s| parse_logging_level(&s))
            .unwrap_or_else(|| cli.logging_level.clone());

        let external_jobs_url = file
            .external_jobs_url
            .or_else(|| cli.external_jobs_url.clone())
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "External jobs URL must be specified via --external-jobs-url, EXTERNAL_API_JOB_URL or in config file"
                )
            })?;

        let external_jobs_timeout_sec = file
            .external_jobs_timeout_sec
            .unwrap_or(cli.external_jobs_timeout_sec);
        let db_connect_retries = file.db_connect_retries.unwrap_or(cli.db_connect_retries);
        let db_retry_interval_ms = file
            .db_retry_interval_ms
            .unwrap_or(cli.db_retry_interval_ms);

        Ok(Self {
            db_dir,
            port,
            logging_level,
            external_jobs_url,
            external_jobs_timeout_sec,
            db_connect_retries,
            db_retry_interval_ms,
        })
    }

    pub fn jobs_db_path(&self) -> PathBuf {
        self.db_dir.join("jobs.db")
    }

    pub fn user_db_path(&self) -> PathBuf {
        self.db_dir.join("user.db")
    }

    pub fn db_retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.db_connect_retries,
            interval: Duration::from_millis(self.db_retry_interval_ms),
        }
    }
}

/// Parses a logging level string into RequestsLoggingLevel.
/// Uses clap's ValueEnum trait for parsing.
fn parse_logging_level(s: &str) -> Option<RequestsLoggingLevel> {
    RequestsLoggingLevel::from_str(s, true).ok()
}
