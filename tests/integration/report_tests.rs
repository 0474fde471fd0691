//! Properties of extraction and aggregation over realistic payloads.

use jfr_lib::models::{FailureGroup, JobRef};
use jfr_lib::services::{aggregate, extract};
use serde_json::json;

use crate::test_helpers::SAMPLE_REPORT;

/// Build a payload with `sizes[i]` cases in suite `i`, cycling through statuses and errors.
fn generated_payload(sizes: &[usize]) -> String {
    let statuses = ["FAILED", "PASSED", "REGRESSION", "SKIPPED", "FIXED", "FAILED"];
    let suites: Vec<_> = sizes
        .iter()
        .enumerate()
        .map(|(s, &n)| {
            let cases: Vec<_> = (0..n)
                .map(|c| {
                    let error = match c % 3 {
                        0 => json!(null),
                        1 => json!("timeout"),
                        _ => json!(format!("assert {}", s)),
                    };
                    json!({
                        "className": format!("pkg.Class{}", c % 4),
                        "name": format!("s{}c{}", s, c),
                        "status": statuses[(s + c) % statuses.len()],
                        "errorDetails": error,
                        "age": c,
                    })
                })
                .collect();
            json!({ "name": format!("suite{}", s), "cases": cases })
        })
        .collect();
    json!({ "suites": suites }).to_string()
}

#[test]
fn test_sample_report_aggregates_to_single_row() {
    let records = extract(SAMPLE_REPORT).unwrap();
    let groups = aggregate(&records);

    assert_eq!(
        groups,
        vec![FailureGroup {
            class_name: "A".to_string(),
            count: 2,
            error_details: Some("boom".to_string()),
        }]
    );
}

#[test]
fn test_extraction_is_complete_and_ordered() {
    let sizes = [3, 0, 7, 1, 12];
    let records = extract(&generated_payload(&sizes)).unwrap();

    assert_eq!(records.len(), sizes.iter().sum::<usize>());

    let expected: Vec<String> = sizes
        .iter()
        .enumerate()
        .flat_map(|(s, &n)| (0..n).map(move |c| format!("s{}c{}", s, c)))
        .collect();
    let actual: Vec<String> = records.into_iter().map(|r| r.name).collect();
    assert_eq!(actual, expected);
}

#[test]
fn test_aggregation_counts_match_failing_records() {
    let records = extract(&generated_payload(&[20, 13, 8])).unwrap();
    let groups = aggregate(&records);

    let failing: Vec<_> = records.iter().filter(|r| r.status.is_failure()).collect();
    assert_eq!(
        groups.iter().map(|g| g.count).sum::<usize>(),
        failing.len()
    );

    for group in &groups {
        let members = failing
            .iter()
            .filter(|r| r.class_name == group.class_name && r.error_details == group.error_details)
            .count();
        assert!(members > 0);
        assert_eq!(group.count, members);
    }
}

#[test]
fn test_aggregation_is_sorted_descending() {
    let records = extract(&generated_payload(&[30, 17, 9, 4])).unwrap();
    let groups = aggregate(&records);

    assert!(groups.len() > 1);
    assert!(groups.windows(2).all(|w| w[0].count >= w[1].count));
}

#[test]
fn test_aggregation_is_idempotent() {
    let records = extract(&generated_payload(&[11, 5])).unwrap();

    assert_eq!(aggregate(&records), aggregate(&records));
}

#[test]
fn test_job_name_resolution() {
    let job = JobRef::parse("http://jenkins/view/xyz/job/your-project/10042/").unwrap();
    assert_eq!(job.short_name(), Some("your-project"));
    assert_eq!(job.sheet_name(), "your-project");

    let job = JobRef::parse("http://jenkins/job/abcdefghijklmnopqrstuvwxy/1/").unwrap();
    assert_eq!(job.sheet_name(), "fghijklmnopqrstuvwxy");
}
