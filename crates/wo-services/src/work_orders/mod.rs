//! Work order services

mod lifecycle;
mod sub_items;

pub use lifecycle::WorkOrderLifecycle;
