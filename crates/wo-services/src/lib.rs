//! # wo-services
//!
//! Business logic services for Work Order RS.
//!
//! Services orchestrate contracts and stores: every operation loads the
//! aggregate, validates, computes the next state on a copy and writes it
//! back in a single `put`.
//!
//! ## Services
//!
//! - [`WorkOrderLifecycle`] - status changes and sub-item collection edits
//! - [`ClientMaterialService`] - client material catalogue with delete guard

pub mod patch;
pub mod work_orders;
pub mod client_materials;

pub use patch::{merge_patch, SubItemPatch};
pub use work_orders::WorkOrderLifecycle;
pub use client_materials::ClientMaterialService;
