//! Job board server library
//!
//! Exposes the internal modules for the binary and the end-to-end tests.

pub mod aggregation;
pub mod config;
pub mod external;
pub mod job;
pub mod server;
pub mod sqlite_persistence;
pub mod user;

pub use external::{ExternalJobSource, HttpExternalJobSource};
pub use job::{JobStore, SqliteJobStore};
pub use server::{run_server, RequestsLoggingLevel};
pub use user::{SqliteUserStore, UserRole, UserStore};
