//! Base contract for work orders

use std::sync::LazyLock;

use regex::Regex;
use validator::Validate;
use wo_core::error::ValidationErrors;
use wo_models::WorkOrderDetails;

use crate::base::{merge_field_errors, validate_present, Contract, ValidationResult};

/// Work order numbers: letters, digits, dashes, slashes and dots
static NUMBER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9./-]*$").unwrap()
});

/// Field rules every stored work order must satisfy
#[derive(Debug, Clone, Copy, Default)]
pub struct WorkOrderBaseContract;

impl WorkOrderBaseContract {
    pub fn new() -> Self {
        Self
    }

    pub fn validate_number(&self, number: &str, errors: &mut ValidationErrors) {
        if number.trim().is_empty() {
            errors.add("number", "can't be blank");
        } else if !NUMBER_PATTERN.is_match(number) {
            errors.add("number", "is invalid");
        }
    }

    pub fn validate_costs(&self, details: &WorkOrderDetails, errors: &mut ValidationErrors) {
        for (field, value) in [
            ("estimated_cost", details.estimated_cost),
            ("actual_cost", details.actual_cost),
        ] {
            if value.is_some_and(|v| v < 0.0) {
                errors.add(field, "must be greater than or equal to 0");
            }
        }
    }

    pub fn validate_dates(&self, details: &WorkOrderDetails, errors: &mut ValidationErrors) {
        if let (Some(start), Some(due)) = (details.start_date, details.due_date) {
            if due < start {
                errors.add("due_date", "must be on or after the start date");
            }
        }
    }
}

impl Contract<WorkOrderDetails> for WorkOrderBaseContract {
    fn validate(&self, details: &WorkOrderDetails) -> ValidationResult {
        let mut errors = ValidationErrors::new();

        validate_present("title", &details.title, &mut errors);
        self.validate_number(&details.number, &mut errors);
        if errors.is_empty() {
            merge_field_errors(&mut errors, details.validate());
        }
        self.validate_costs(details, &mut errors);
        self.validate_dates(details, &mut errors);

        errors.into_result()
    }
}
