//! Result type aliases

use crate::error::{ValidationErrors, WoError};

/// Standard Result type for work order operations
pub type WoResult<T> = Result<T, WoError>;

/// Result of contract validation
pub type ValidationResult = Result<(), ValidationErrors>;
