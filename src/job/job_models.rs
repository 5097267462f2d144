//! Internal job records
use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Active,
    Inactive,
    Pending,
}

impl JobStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            JobStatus::Active => "active",
            JobStatus::Inactive => "inactive",
            JobStatus::Pending => "pending",
        }
    }
}

impl FromStr for JobStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "active" => Ok(JobStatus::Active),
            "inactive" => Ok(JobStatus::Inactive),
            "pending" => Ok(JobStatus::Pending),
            _ => bail!("Unknown job status {}", s),
        }
    }
}

/// A job owned and persisted by this server.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub company: String,
    pub location: String,
    pub publish_date: DateTime<Utc>,
    pub expiration_date: Option<DateTime<Utc>>,
    pub status: JobStatus,
}

/// Request body for creating or updating a job. Every field is optional here,
/// the create and update paths decide what is required.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub expiration_date: Option<DateTime<Utc>>,
    pub status: Option<JobStatus>,
}

/// A fully validated job, ready to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewJob {
    pub title: String,
    pub description: String,
    pub company: String,
    pub location: String,
    pub publish_date: DateTime<Utc>,
    pub expiration_date: Option<DateTime<Utc>>,
    pub status: JobStatus,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

impl JobInput {
    pub fn title(&self) -> Option<&str> {
        non_empty(&self.title)
    }

    pub fn description(&self) -> Option<&str> {
        non_empty(&self.description)
    }

    pub fn company(&self) -> Option<&str> {
        non_empty(&self.company)
    }

    pub fn location(&self) -> Option<&str> {
        non_empty(&self.location)
    }

    /// Builds the record to insert. Returns None when any of title,
    /// description, company, location or expiration date is missing.
    /// New jobs are always published as active, now.
    pub fn to_new_job(&self, publish_date: DateTime<Utc>) -> Option<NewJob> {
        Some(NewJob {
            title: self.title()?.to_owned(),
            description: self.description()?.to_owned(),
            company: self.company()?.to_owned(),
            location: self.location()?.to_owned(),
            publish_date,
            expiration_date: Some(self.expiration_date?),
            status: JobStatus::Active,
        })
    }

    /// True when the body carries at least one field an update can apply.
    pub fn has_update_fields(&self) -> bool {
        self.title().is_some()
            || self.description().is_some()
            || self.company().is_some()
            || self.location().is_some()
            || self.expiration_date.is_some()
            || self.status.is_some()
    }
}
