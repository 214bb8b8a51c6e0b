//! Shallow merge of JSON patches over sub-items

use serde_json::{Map, Value};
use wo_core::error::{ValidationErrors, WoError};
use wo_core::result::WoResult;
use wo_models::SubItemRecord;

/// Patch object: top-level attribute name to new value
pub type SubItemPatch = Map<String, Value>;

/// Identity and audit attributes; the lifecycle manager owns these
const PROTECTED_ATTRIBUTES: &[&str] = &[
    "id",
    "workOrderId",
    "workOrderNumber",
    "createdBy",
    "createdDate",
    "assignedBy",
    "assignDate",
    "reportedBy",
    "reportedDate",
    "lastModifiedBy",
    "lastModifiedAt",
];

/// Overlay `patch` on `existing`, one level deep
///
/// Nested objects in the patch replace the stored value wholesale.
/// Identity, audit and unknown attributes are rejected.
pub fn merge_patch<T: SubItemRecord>(existing: &T, patch: &SubItemPatch) -> WoResult<T> {
    let mut value = serde_json::to_value(existing)
        .map_err(|e| WoError::Internal(format!("failed to serialize sub-item: {}", e)))?;
    let Value::Object(fields) = &mut value else {
        return Err(WoError::Internal("sub-item did not serialize to an object".into()));
    };

    let mut errors = ValidationErrors::new();
    for (attribute, new_value) in patch {
        if PROTECTED_ATTRIBUTES.contains(&attribute.as_str()) {
            errors.add(attribute.as_str(), "is not writable");
        } else if !fields.contains_key(attribute) {
            errors.add(attribute.as_str(), "is not a known attribute");
        } else {
            fields.insert(attribute.clone(), new_value.clone());
        }
    }
    errors.into_result()?;

    serde_json::from_value(value).map_err(|e| {
        let mut errors = ValidationErrors::new();
        errors.add_base(format!("Patch does not fit {}: {}", T::COLLECTION, e));
        WoError::Validation(errors)
    })
}
