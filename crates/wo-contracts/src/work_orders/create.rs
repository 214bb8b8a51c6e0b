//! Create contract for work orders

use wo_core::error::ValidationErrors;
use wo_models::WorkOrderDetails;

use super::base::WorkOrderBaseContract;
use crate::base::{Contract, ValidationResult};

/// Contract for creating a work order
///
/// On top of the base rules the number must not already be in use.
pub struct CreateWorkOrderContract<'a> {
    base: WorkOrderBaseContract,
    existing_numbers: &'a [String],
}

impl<'a> CreateWorkOrderContract<'a> {
    pub fn new(existing_numbers: &'a [String]) -> Self {
        Self {
            base: WorkOrderBaseContract::new(),
            existing_numbers,
        }
    }

    fn validate_unique_number(&self, number: &str, errors: &mut ValidationErrors) {
        let taken = self
            .existing_numbers
            .iter()
            .any(|n| n.eq_ignore_ascii_case(number.trim()));
        if taken {
            errors.add("number", "has already been taken");
        }
    }
}

impl<'a> Contract<WorkOrderDetails> for CreateWorkOrderContract<'a> {
    fn validate(&self, details: &WorkOrderDetails) -> ValidationResult {
        let mut errors = ValidationErrors::new();

        if let Err(base_errors) = self.base.validate(details) {
            errors.merge(base_errors);
        }
        self.validate_unique_number(&details.number, &mut errors);

        errors.into_result()
    }
}
