//! Work order contracts

mod base;
mod create;

pub use base::WorkOrderBaseContract;
pub use create::CreateWorkOrderContract;
