//! # wo-models
//!
//! Domain models for Work Order RS.
//!
//! The work order is the aggregate root; items, materials, tasks, issues,
//! remarks and permits live in collections it owns. Each model implements
//! the core traits from `wo-core` (Identifiable, Entity, Lockable).

pub use wo_core::traits::{Entity, Id, Identifiable, Lockable};

pub mod work_order;
pub mod status;
pub mod sub_item;
pub mod material;
pub mod task;
pub mod issue;
pub mod remark;
pub mod permit;
pub mod item;

// Re-exports for convenience
pub use work_order::{NewWorkOrder, WorkOrder, WorkOrderDetails};
pub use status::{Priority, Severity, WorkOrderStatus};
pub use sub_item::{Collection, SubItem, SubItemRecord};
pub use material::{
    ClientMaterial, Material, MaterialAssignment, PurchasableMaterial, PurchasableStatus,
    ReceivableMaterial, ReceivableStatus,
};
pub use task::{Task, TaskStatus};
pub use issue::{Issue, IssueStatus};
pub use remark::Remark;
pub use permit::{Permit, PermitStatus};
pub use item::WorkOrderItem;
