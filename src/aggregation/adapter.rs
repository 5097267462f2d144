//! Conversion of internal and external jobs into the unified shape served by
//! the combined jobs endpoint.
use crate::external::ExternalJobTuple;
use crate::job::Job;
use chrono::{DateTime, Utc};
use serde::Serialize;

pub const NO_TITLE: &str = "No title provided";
pub const NO_COUNTRY: &str = "No country provided";
pub const NO_DESCRIPTION: &str = "No description provided";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnifiedJob {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publish_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<DateTime<Utc>>,
}

pub fn adapt_internal(job: &Job) -> UnifiedJob {
    UnifiedJob {
        title: job.title.clone(),
        company: Some(job.company.clone()),
        location: Some(job.location.clone()),
        salary: None,
        skills: None,
        description: Some(job.description.clone()),
        publish_date: Some(job.publish_date),
        expiration_date: job.expiration_date,
    }
}

/// Fills the gaps of an external job with fallbacks: a missing title or
/// location gets a placeholder, description is always the placeholder and
/// skills are always present.
pub fn adapt_external(job: ExternalJobTuple) -> UnifiedJob {
    UnifiedJob {
        title: job
            .title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| NO_TITLE.to_string()),
        company: None,
        location: Some(job.location.unwrap_or_else(|| NO_COUNTRY.to_string())),
        salary: job.salary,
        skills: Some(job.skills.unwrap_or_default()),
        description: Some(NO_DESCRIPTION.to_string()),
        publish_date: None,
        expiration_date: None,
    }
}
