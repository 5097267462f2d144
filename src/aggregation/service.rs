use super::adapter::{adapt_external, adapt_internal, UnifiedJob};
use super::filter::{JobFilter, JobSource};
use crate::external::{ExternalJobSource, SourceError};
use crate::job::JobStore;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum AggregationError {
    #[error("External jobs error: {0}")]
    External(#[from] SourceError),

    #[error("Job store error: {0}")]
    Store(#[from] anyhow::Error),
}

/// Combines internal and external jobs into one filtered listing.
#[derive(Clone)]
pub struct JobAggregator {
    job_store: Arc<dyn JobStore>,
    external_source: Arc<dyn ExternalJobSource>,
}

impl JobAggregator {
    pub fn new(
        job_store: Arc<dyn JobStore>,
        external_source: Arc<dyn ExternalJobSource>,
    ) -> Self {
        Self {
            job_store,
            external_source,
        }
    }

    /// External jobs in source order, adapted and filtered.
    pub async fn external_jobs(
        &self,
        filter: &JobFilter,
    ) -> Result<Vec<UnifiedJob>, AggregationError> {
        let tuples = self.external_source.fetch_jobs().await?;
        let jobs = tuples.into_iter().map(adapt_external).collect();
        Ok(filter.apply(jobs))
    }

    /// Internal jobs in id order. Filtering happens in the store.
    pub async fn internal_jobs(
        &self,
        filter: &JobFilter,
    ) -> Result<Vec<UnifiedJob>, AggregationError> {
        let jobs = self.job_store.list_jobs(&filter.to_job_query())?;
        Ok(jobs.iter().map(adapt_internal).collect())
    }

    /// Without a source selection both sources are queried concurrently and
    /// external jobs come first. A failure of either source fails the call.
    pub async fn get_combined_jobs(
        &self,
        filter: &JobFilter,
    ) -> Result<Vec<UnifiedJob>, AggregationError> {
        let jobs = match filter.source {
            Some(JobSource::External) => self.external_jobs(filter).await?,
            Some(JobSource::Internal) => self.internal_jobs(filter).await?,
            None => {
                let (mut external, internal) = tokio::try_join!(
                    self.external_jobs(filter),
                    self.internal_jobs(filter)
                )?;
                external.extend(internal);
                external
            }
        };
        debug!("Combined listing for {:?} has {} jobs", filter, jobs.len());
        Ok(jobs)
    }
}
