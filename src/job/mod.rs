mod job_models;
mod job_query;
mod job_store;
mod sqlite_job_store;

pub use job_models::{Job, JobInput, JobStatus, NewJob};
pub use job_query::{build_job_query, FieldPattern, JobQuery, JobTextField, LOWER_FN};
pub use job_store::JobStore;
pub use sqlite_job_store::SqliteJobStore;
