//! Custom assertion helpers over validation results.

use vk_core::config::{FieldIssue, ValidationError};

/// Assert that `field` is reported as missing.
pub fn assert_missing(err: &ValidationError, field: &str) {
    match err.get(field) {
        Some(e) => assert_eq!(e.issue, FieldIssue::Missing, "{field} should be missing"),
        None => panic!("{field} not reported; errors: {err}"),
    }
}

/// Assert that `field` is reported with a type mismatch, optionally checking
/// what was found.
pub fn assert_wrong_type(err: &ValidationError, field: &str, found: Option<&str>) {
    match err.get(field).map(|e| &e.issue) {
        Some(FieldIssue::WrongType { found: actual, .. }) => {
            if let Some(expected) = found {
                assert_eq!(actual, expected, "unexpected type reported for {field}");
            }
        }
        Some(other) => panic!("{field} reported as {other} instead of a type mismatch"),
        None => panic!("{field} not reported; errors: {err}"),
    }
}
