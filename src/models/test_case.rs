//! Test case model representing one executed test in a build report.

/// Test case outcome as reported by Jenkins.
///
/// Unknown values are kept verbatim so the original string survives.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CaseStatus {
    Passed,
    Skipped,
    Failed,
    Fixed,
    Regression,
    Other(String),
}

impl CaseStatus {
    /// String representation used by the Jenkins API.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Passed => "PASSED",
            Self::Skipped => "SKIPPED",
            Self::Failed => "FAILED",
            Self::Fixed => "FIXED",
            Self::Regression => "REGRESSION",
            Self::Other(s) => s,
        }
    }

    /// Parse from string representation. Matching is case-sensitive.
    pub fn parse(s: &str) -> Self {
        match s {
            "PASSED" => Self::Passed,
            "SKIPPED" => Self::Skipped,
            "FAILED" => Self::Failed,
            "FIXED" => Self::Fixed,
            "REGRESSION" => Self::Regression,
            other => Self::Other(other.to_string()),
        }
    }

    /// True for the outcomes that count towards the failure report.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed | Self::Regression)
    }
}

impl std::fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One test case result extracted from a test report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCaseRecord {
    /// Execution outcome
    pub status: CaseStatus,
    /// Owning test class
    pub class_name: String,
    /// Test method name
    pub name: String,
    /// Failure message, absent for passing tests
    pub error_details: Option<String>,
}

impl TestCaseRecord {
    /// Create a new test case record.
    pub fn new(
        status: CaseStatus,
        class_name: impl Into<String>,
        name: impl Into<String>,
        error_details: Option<String>,
    ) -> Self {
        TestCaseRecord {
            status,
            class_name: class_name.into(),
            name: name.into(),
            error_details,
        }
    }
}
