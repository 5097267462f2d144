mod client;
mod models;

pub use client::{ExternalJobSource, HttpExternalJobSource, SourceError};
pub use models::{ExternalJobTuple, ShapeError};
