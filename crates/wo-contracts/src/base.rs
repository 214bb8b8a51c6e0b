//! Base contract system

use wo_core::error::ValidationErrors;
pub use wo_core::result::ValidationResult;

/// Base contract trait
pub trait Contract<T>: Send + Sync {
    /// Validate the entity
    fn validate(&self, entity: &T) -> ValidationResult;
}

/// Fold `validator` derive output into our error collection
pub fn merge_field_errors(
    errors: &mut ValidationErrors,
    result: Result<(), validator::ValidationErrors>,
) {
    let Err(field_errors) = result else {
        return;
    };
    for (field, list) in field_errors.field_errors() {
        for error in list {
            let message = match &*error.code {
                "length" => "has an invalid length".to_string(),
                "range" => "is out of range".to_string(),
                other => error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("is invalid ({})", other)),
            };
            errors.add(field, message);
        }
    }
}

/// Presence check shared by all contracts
pub fn validate_present(field: &str, value: &str, errors: &mut ValidationErrors) {
    if value.trim().is_empty() {
        errors.add(field, "can't be blank");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_present() {
        let mut errors = ValidationErrors::new();
        validate_present("title", "   ", &mut errors);
        validate_present("number", "WO-1", &mut errors);
        assert!(errors.has_error("title"));
        assert!(!errors.has_error("number"));
    }
}
