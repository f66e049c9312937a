//! Structural validation of parsed test cases
//!
//! Defects are reported as data; the caller decides whether to reject.

use crate::core::{ActionType, TestCase, ValidationReport};

/// Check a test case for structural defects. All defects are collected.
pub fn validate(test_case: &TestCase) -> ValidationReport {
    let mut errors = Vec::new();

    if test_case.title.trim().is_empty() {
        errors.push("Test case must have a title".to_string());
    }

    if test_case.steps.is_empty() {
        errors.push("Test case must have at least one step".to_string());
    }

    for (index, step) in test_case.steps.iter().enumerate() {
        let n = index + 1;
        if step.description.trim().is_empty() {
            errors.push(format!("Step {} must have a description", n));
        }
        // Recorder "view" phrasing is tolerated even when it was not classified
        if step.action == ActionType::Unknown
            && !step.description.to_lowercase().contains("view")
        {
            errors.push(format!("Step {} has an unknown action type", n));
        }
    }

    ValidationReport::from_errors(errors)
}
