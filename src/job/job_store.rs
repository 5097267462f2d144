use super::job_models::{Job, JobInput, NewJob};
use super::job_query::JobQuery;
use anyhow::Result;

pub trait JobStore: Send + Sync {
    /// Returns the jobs matching every pattern of `query`, in insertion order.
    fn list_jobs(&self, query: &JobQuery) -> Result<Vec<Job>>;

    /// Returns Ok(None) if the job does not exist.
    fn get_job(&self, id: i64) -> Result<Option<Job>>;

    fn create_job(&self, job: NewJob) -> Result<Job>;

    /// Applies the non-empty fields of `update` to the job.
    /// Returns Ok(None) if the job does not exist.
    fn update_job(&self, id: i64, update: &JobInput) -> Result<Option<Job>>;

    /// Returns false if the job did not exist.
    fn delete_job(&self, id: i64) -> Result<bool>;
}
