//! JSON extraction service for parsing Jenkins test-report payloads.
//!
//! The payload is the response of
//! `testReport/api/json?tree=suites[cases[className,name,status,errorDetails]]`.
//! Suites and cases are flattened into a single list in document order.

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::info;

use crate::models::{CaseStatus, TestCaseRecord};

// ============================================================================
// Jenkins JSON Schema Structs
// ============================================================================

/// Root structure of a Jenkins test report.
#[derive(Debug, Deserialize)]
pub struct JenkinsTestReport {
    pub suites: Vec<JenkinsSuite>,
}

/// Jenkins test suite. Cases stay untyped so missing fields can be reported by name.
#[derive(Debug, Deserialize)]
pub struct JenkinsSuite {
    pub cases: Vec<Map<String, Value>>,
}

/// Extraction errors.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// Nothing to parse, typically because the fetch failed
    #[error("payload is empty")]
    EmptyPayload,

    /// Not JSON, or no `suites[].cases[]` structure
    #[error("failed to parse test report: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("case {case} of suite {suite} is missing field '{field}'")]
    MissingField {
        suite: usize,
        case: usize,
        field: &'static str,
    },

    #[error("case {case} of suite {suite} has invalid field '{field}': expected {expected}")]
    InvalidField {
        suite: usize,
        case: usize,
        field: &'static str,
        expected: &'static str,
    },
}

// ============================================================================
// Extraction Logic
// ============================================================================

/// Flatten a test-report payload into one record per test case.
pub fn extract(payload: &str) -> Result<Vec<TestCaseRecord>, ExtractError> {
    info!("Processing payload with size {}", payload.len());

    if payload.trim().is_empty() {
        return Err(ExtractError::EmptyPayload);
    }

    let report: JenkinsTestReport = serde_json::from_str(payload)?;

    let mut extracted = Vec::new();
    for (suite_idx, suite) in report.suites.iter().enumerate() {
        for (case_idx, case) in suite.cases.iter().enumerate() {
            extracted.push(parse_case(case, suite_idx, case_idx)?);
        }
    }

    info!("Extracted {} tests status lines.", extracted.len());
    Ok(extracted)
}

/// Build a record from one case object.
fn parse_case(
    case: &Map<String, Value>,
    suite: usize,
    idx: usize,
) -> Result<TestCaseRecord, ExtractError> {
    let status = CaseStatus::parse(string_field(case, "status", suite, idx)?);
    let class_name = string_field(case, "className", suite, idx)?;
    let name = string_field(case, "name", suite, idx)?;
    let error_details = match required_field(case, "errorDetails", suite, idx)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        _ => {
            return Err(ExtractError::InvalidField {
                suite,
                case: idx,
                field: "errorDetails",
                expected: "string or null",
            });
        }
    };

    Ok(TestCaseRecord::new(status, class_name, name, error_details))
}

fn required_field<'a>(
    case: &'a Map<String, Value>,
    field: &'static str,
    suite: usize,
    idx: usize,
) -> Result<&'a Value, ExtractError> {
    case.get(field).ok_or(ExtractError::MissingField {
        suite,
        case: idx,
        field,
    })
}

fn string_field<'a>(
    case: &'a Map<String, Value>,
    field: &'static str,
    suite: usize,
    idx: usize,
) -> Result<&'a str, ExtractError> {
    required_field(case, field, suite, idx)?
        .as_str()
        .ok_or(ExtractError::InvalidField {
            suite,
            case: idx,
            field,
            expected: "string",
        })
}
