//! Domain models for the failure report.

pub mod failure_group;
pub mod job;
pub mod test_case;

// Re-export commonly used types
pub use failure_group::FailureGroup;
pub use job::JobRef;
pub use test_case::{CaseStatus, TestCaseRecord};
