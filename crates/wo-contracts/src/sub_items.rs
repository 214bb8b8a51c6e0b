//! Sub-item contracts
//!
//! Run on new sub-items before they are appended, and on the merged result
//! of a patch before it replaces the stored entry.

use wo_core::error::ValidationErrors;
use wo_models::{
    Issue, Material, MaterialAssignment, Permit, Remark, SubItem, Task, WorkOrderItem,
};

use crate::base::{validate_present, Contract, ValidationResult};

/// Validates any sub-item variant
#[derive(Debug, Clone, Copy, Default)]
pub struct SubItemContract;

impl SubItemContract {
    fn validate_item(&self, item: &WorkOrderItem, errors: &mut ValidationErrors) {
        validate_present("description", &item.description, errors);
        if item.quantity <= 0.0 {
            errors.add("quantity", "must be greater than 0");
        }
        if item.unit_price.is_some_and(|p| p < 0.0) {
            errors.add("unit_price", "must be greater than or equal to 0");
        }
    }

    fn validate_material(&self, assignment: &MaterialAssignment, errors: &mut ValidationErrors) {
        if assignment.material.quantity() <= 0.0 {
            errors.add("quantity", "must be greater than 0");
        }
        match &assignment.material {
            Material::Purchasable(m) => {
                validate_present("name", &m.name, errors);
                if m.unit_cost.is_some_and(|c| c < 0.0) {
                    errors.add("unit_cost", "must be greater than or equal to 0");
                }
            }
            Material::Receivable(m) => {
                if m.client_material_id.is_nil() {
                    errors.add("client_material_id", "can't be blank");
                }
            }
        }
    }

    fn validate_task(&self, task: &Task, errors: &mut ValidationErrors) {
        validate_present("title", &task.title, errors);
        if let (Some(start), Some(due)) = (task.start_date, task.due_date) {
            if due < start {
                errors.add("due_date", "must be on or after the start date");
            }
        }
    }

    fn validate_issue(&self, issue: &Issue, errors: &mut ValidationErrors) {
        validate_present("title", &issue.title, errors);
        if issue.resolution_notes.is_some() && !issue.is_resolved() {
            errors.add("resolution_notes", "can only be set on resolved issues");
        }
    }

    fn validate_remark(&self, remark: &Remark, errors: &mut ValidationErrors) {
        validate_present("content", &remark.content, errors);
    }

    fn validate_permit(&self, permit: &Permit, errors: &mut ValidationErrors) {
        validate_present("permit_type", &permit.permit_type, errors);
        if let (Some(issued), Some(expires)) = (permit.issue_date, permit.expiry_date) {
            if expires < issued {
                errors.add("expiry_date", "must be on or after the issue date");
            }
        }
    }
}

impl Contract<SubItem> for SubItemContract {
    fn validate(&self, entity: &SubItem) -> ValidationResult {
        let mut errors = ValidationErrors::new();

        match entity {
            SubItem::Items(i) => self.validate_item(i, &mut errors),
            SubItem::Materials(m) => self.validate_material(m, &mut errors),
            SubItem::Tasks(t) => self.validate_task(t, &mut errors),
            SubItem::Issues(i) => self.validate_issue(i, &mut errors),
            SubItem::Remarks(r) => self.validate_remark(r, &mut errors),
            SubItem::Permits(p) => self.validate_permit(p, &mut errors),
        }

        errors.into_result()
    }
}
