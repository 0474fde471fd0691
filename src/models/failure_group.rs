//! Aggregated failure row written to a report sheet.

/// Column headers of a report sheet, in output order.
pub const COLUMNS: [&str; 3] = ["className", "count", "errorDetails"];

/// Failing test cases of one job that share a class and an error message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureGroup {
    /// Test class the failures belong to
    pub class_name: String,
    /// Number of failing cases in the group
    pub count: usize,
    /// Shared failure message; `None` when Jenkins reported no details
    pub error_details: Option<String>,
}
