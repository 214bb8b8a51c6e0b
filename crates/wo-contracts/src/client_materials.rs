//! Client material contracts

use std::sync::LazyLock;

use regex::Regex;
use validator::Validate;
use wo_core::error::{ValidationErrors, WoError};
use wo_core::result::WoResult;
use wo_core::traits::Id;
use wo_models::ClientMaterial;

use crate::base::{merge_field_errors, Contract, ValidationResult};

/// Catalogue codes: upper-case letters, digits, dashes and underscores
static CODE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z0-9][A-Z0-9_-]*$").unwrap()
});

/// Contract for registering a client material
pub struct CreateClientMaterialContract<'a> {
    existing_codes: &'a [String],
}

impl<'a> CreateClientMaterialContract<'a> {
    pub fn new(existing_codes: &'a [String]) -> Self {
        Self { existing_codes }
    }
}

impl<'a> Contract<ClientMaterial> for CreateClientMaterialContract<'a> {
    fn validate(&self, material: &ClientMaterial) -> ValidationResult {
        let mut errors = ValidationErrors::new();

        merge_field_errors(&mut errors, material.validate());
        if !material.code.is_empty() && !CODE_PATTERN.is_match(&material.code) {
            errors.add("code", "is invalid");
        }
        if self.existing_codes.iter().any(|c| c == &material.code) {
            errors.add("code", "has already been taken");
        }

        errors.into_result()
    }
}

/// Guard for deleting a client material
///
/// Deletion is refused while any work order still holds a receivable
/// material pointing at it. Nothing is cascaded.
pub struct DeleteClientMaterialContract<'a> {
    client_material_id: Id,
    /// Numbers of work orders referencing the material
    referencing_work_orders: &'a [String],
}

impl<'a> DeleteClientMaterialContract<'a> {
    pub fn new(client_material_id: Id, referencing_work_orders: &'a [String]) -> Self {
        Self {
            client_material_id,
            referencing_work_orders,
        }
    }

    pub fn check(&self) -> WoResult<()> {
        if self.referencing_work_orders.is_empty() {
            return Ok(());
        }
        Err(WoError::conflict(format!(
            "client material {} is referenced by receivable materials on work orders: {}",
            self.client_material_id,
            self.referencing_work_orders.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_valid_client_material() {
        let contract = CreateClientMaterialContract::new(&[]);
        assert!(contract.validate(&ClientMaterial::new("CM-001", "Copper pipe")).is_ok());
    }

    #[test]
    fn test_duplicate_and_malformed_codes() {
        let existing = vec!["CM-001".to_string()];
        let contract = CreateClientMaterialContract::new(&existing);

        let errors = contract
            .validate(&ClientMaterial::new("CM-001", "Copper pipe"))
            .unwrap_err();
        assert_eq!(errors.get("code"), Some(&vec!["has already been taken".to_string()]));

        let errors = contract
            .validate(&ClientMaterial::new("cm 2", "Valve"))
            .unwrap_err();
        assert!(errors.has_error("code"));
    }

    #[test]
    fn test_blank_fields() {
        let contract = CreateClientMaterialContract::new(&[]);
        let errors = contract.validate(&ClientMaterial::new("", "")).unwrap_err();
        assert!(errors.has_error("code"));
        assert!(errors.has_error("name"));
    }

    #[test]
    fn test_delete_guard() {
        let id = Uuid::new_v4();
        assert!(DeleteClientMaterialContract::new(id, &[]).check().is_ok());

        let refs = vec!["WO-7".to_string()];
        let err = DeleteClientMaterialContract::new(id, &refs).check().unwrap_err();
        assert!(err.is_conflict());
        assert!(err.to_string().contains("WO-7"));
    }
}
