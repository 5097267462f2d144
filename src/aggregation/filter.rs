//! Case-insensitive substring filtering of unified jobs.
use super::adapter::UnifiedJob;
use crate::job::{build_job_query, JobQuery};
use serde::Deserialize;

/// Which sources the combined listing draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobSource {
    Internal,
    External,
}

impl JobSource {
    /// Case-insensitive. Unknown names yield None, i.e. both sources.
    pub fn from_param(value: &str) -> Option<Self> {
        if value.eq_ignore_ascii_case("internal") {
            Some(JobSource::Internal)
        } else if value.eq_ignore_ascii_case("external") {
            Some(JobSource::External)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobFilter {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    /// None means both sources.
    pub source: Option<JobSource>,
}

/// Query string of the combined jobs listing.
#[derive(Debug, Default, Deserialize)]
pub struct ListJobsQuery {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub jobs: Option<String>,
}

fn set(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl From<ListJobsQuery> for JobFilter {
    fn from(query: ListJobsQuery) -> Self {
        JobFilter {
            title: set(query.title),
            company: set(query.company),
            location: set(query.location),
            description: set(query.description),
            source: query.jobs.as_deref().and_then(JobSource::from_param),
        }
    }
}

/// Keeps the items whose `field` contains `criterion`, ignoring case.
/// An unset or empty criterion keeps everything, an absent field never
/// matches a set criterion.
pub fn apply_filter<T, F>(items: Vec<T>, criterion: Option<&str>, field: F) -> Vec<T>
where
    F: Fn(&T) -> Option<&str>,
{
    let Some(criterion) = criterion.filter(|c| !c.is_empty()) else {
        return items;
    };
    let needle = criterion.to_lowercase();
    items
        .into_iter()
        .filter(|item| field(item).is_some_and(|value| value.to_lowercase().contains(&needle)))
        .collect()
}

impl JobFilter {
    /// Applies the four text criteria, ANDed.
    pub fn apply(&self, jobs: Vec<UnifiedJob>) -> Vec<UnifiedJob> {
        let jobs = apply_filter(jobs, self.title.as_deref(), |j| Some(j.title.as_str()));
        let jobs = apply_filter(jobs, self.company.as_deref(), |j| j.company.as_deref());
        let jobs = apply_filter(jobs, self.location.as_deref(), |j| j.location.as_deref());
        apply_filter(jobs, self.description.as_deref(), |j| {
            j.description.as_deref()
        })
    }

    /// The same criteria as a record store query.
    pub fn to_job_query(&self) -> JobQuery {
        build_job_query(
            self.title.as_deref(),
            self.company.as_deref(),
            self.location.as_deref(),
            self.description.as_deref(),
        )
    }
}
