//! # wo-contracts
//!
//! Contract validation for Work Order RS.
//!
//! Contracts validate payloads before the lifecycle manager touches the
//! backing store, and the status workflow decides which status changes are
//! legal.

pub mod base;
pub mod status_transition;
pub mod work_orders;
pub mod sub_items;
pub mod client_materials;

pub use base::*;
pub use status_transition::{can_transition_to, TransitionPolicy, WorkOrderWorkflow};
pub use sub_items::SubItemContract;
pub use client_materials::{CreateClientMaterialContract, DeleteClientMaterialContract};
pub use work_orders::{CreateWorkOrderContract, WorkOrderBaseContract};
