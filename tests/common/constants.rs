//! Shared constants for end-to-end tests
//!
//! When seeded data changes, update only this file and fixtures.rs.

// ============================================================================
// Seeded Internal Jobs
// ============================================================================

/// Id of "Rust Backend Engineer" at Ferris Labs, Madrid
pub const SEEDED_JOB_ID: i64 = 1;
pub const SEEDED_JOB_TITLE: &str = "Rust Backend Engineer";
pub const SEEDED_JOB_COMPANY: &str = "Ferris Labs";

/// Id of "Frontend Developer" at Pixel Co, Lisbon
pub const SEEDED_JOB_2_ID: i64 = 2;
pub const SEEDED_JOB_2_TITLE: &str = "Frontend Developer";

pub const SEEDED_JOBS_COUNT: usize = 2;

// ============================================================================
// Stub External Jobs
// ============================================================================

pub const EXTERNAL_JOB_TITLE: &str = "Remote Go Developer";
pub const EXTERNAL_JOB_2_TITLE: &str = "Data Engineer";

/// Records served by the stub external API, one of them without a title
pub const EXTERNAL_JOBS_COUNT: usize = 3;

// ============================================================================
// Seeded Users
// ============================================================================

pub const SEEDED_USER_ID: i64 = 1;
pub const SEEDED_USERNAME: &str = "testuser";
pub const SEEDED_EMAIL: &str = "testuser@example.com";
pub const SEEDED_PASSWORD: &str = "testpass123";

// ============================================================================
// Timeouts
// ============================================================================

/// Maximum time to wait for the server to become ready
pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;

/// Interval between readiness checks
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 10;

/// Default request timeout for the test client
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Timeout the server uses when calling the external API
pub const EXTERNAL_TIMEOUT_SECS: u64 = 2;
