//! Groups failing test cases by class and error message.

use std::collections::HashMap;

use crate::models::{FailureGroup, TestCaseRecord};

/// Count FAILED and REGRESSION cases per `(class, error details)` pair.
///
/// Groups are ordered by count, largest first. Equal counts keep the order in
/// which their first case appeared. Cases without error details share one
/// group per class.
pub fn aggregate(records: &[TestCaseRecord]) -> Vec<FailureGroup> {
    let mut index: HashMap<(&str, Option<&str>), usize> = HashMap::new();
    let mut groups: Vec<FailureGroup> = Vec::new();

    for record in records.iter().filter(|r| r.status.is_failure()) {
        let key = (record.class_name.as_str(), record.error_details.as_deref());
        match index.get(&key) {
            Some(&i) => groups[i].count += 1,
            None => {
                index.insert(key, groups.len());
                groups.push(FailureGroup {
                    class_name: record.class_name.clone(),
                    count: 1,
                    error_details: record.error_details.clone(),
                });
            }
        }
    }

    // sort_by is stable
    groups.sort_by(|a, b| b.count.cmp(&a.count));
    groups
}
