mod adapter;
mod filter;
mod service;

pub use adapter::{adapt_external, adapt_internal, UnifiedJob, NO_COUNTRY, NO_DESCRIPTION, NO_TITLE};
pub use filter::{apply_filter, JobFilter, JobSource, ListJobsQuery};
pub use service::{AggregationError, JobAggregator};
