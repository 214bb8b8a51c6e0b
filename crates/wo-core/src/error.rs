//! Core error types for Work Order RS
//!
//! Every lifecycle failure surfaces as one of these variants, raised before
//! the backing store is written.

use std::collections::HashMap;
use thiserror::Error;

/// Core error type for all work order operations
#[derive(Error, Debug)]
pub enum WoError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Invalid status transition from {from} to {to} (allowed: {allowed})")]
    InvalidTransition {
        from: String,
        to: String,
        allowed: String,
    },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Validation failed: {}", .0.full_messages().join(", "))]
    Validation(#[from] ValidationErrors),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl WoError {
    pub fn not_found(entity: &'static str, field: &'static str, value: impl ToString) -> Self {
        WoError::NotFound {
            entity,
            field,
            value: value.to_string(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        WoError::Conflict {
            message: message.into(),
        }
    }

    /// Stable machine-readable code for the error kind
    pub fn error_code(&self) -> &'static str {
        match self {
            WoError::NotFound { .. } => "not_found",
            WoError::InvalidTransition { .. } => "invalid_transition",
            WoError::Conflict { .. } => "conflict",
            WoError::Validation(_) => "validation_failed",
            WoError::Store(_) => "store_error",
            WoError::Config(_) => "configuration_error",
            WoError::Internal(_) => "internal_error",
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, WoError::NotFound { .. })
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, WoError::Conflict { .. })
    }
}

/// Validation errors collection
#[derive(Error, Debug, Default, Clone, PartialEq)]
#[error("Validation errors: {errors:?}")]
pub struct ValidationErrors {
    /// Field-specific errors: field_name -> Vec<error_messages>
    pub errors: HashMap<String, Vec<String>>,
    /// Base errors not tied to a specific field
    pub base_errors: Vec<String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    pub fn add_base(&mut self, message: impl Into<String>) {
        self.base_errors.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.base_errors.is_empty()
    }

    /// Check if there are errors for a specific field
    pub fn has_error(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    /// Get errors for a specific field
    pub fn get(&self, field: &str) -> Option<&Vec<String>> {
        self.errors.get(field)
    }

    pub fn merge(&mut self, other: ValidationErrors) {
        for (field, messages) in other.errors {
            self.errors.entry(field).or_default().extend(messages);
        }
        self.base_errors.extend(other.base_errors);
    }

    /// `Ok(())` when nothing was collected, otherwise the collected errors
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    /// Messages in "field message" form, base errors first, fields sorted
    pub fn full_messages(&self) -> Vec<String> {
        let mut messages = self.base_errors.clone();
        let mut fields: Vec<_> = self.errors.iter().collect();
        fields.sort_by(|a, b| a.0.cmp(b.0));
        for (field, field_messages) in fields {
            for msg in field_messages {
                messages.push(format!("{} {}", field, msg));
            }
        }
        messages
    }
}
