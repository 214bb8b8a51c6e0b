//! Store traits
//!
//! Whole-aggregate contracts: a work order is always read and written as a
//! unit, never as a delta.

use async_trait::async_trait;
use wo_core::result::WoResult;
use wo_core::traits::Id;
use wo_models::{ClientMaterial, WorkOrder};

/// Work order backing store
#[async_trait]
pub trait WorkOrderStore: Send + Sync {
    /// Fetch an aggregate, `None` if absent
    async fn get(&self, id: Id) -> WoResult<Option<WorkOrder>>;

    /// Replace the stored aggregate and return what was stored
    ///
    /// Fails with `NotFound` when `id` is unknown. With optimistic locking
    /// enabled, fails with `Conflict` when `work_order.lock_version` differs
    /// from the stored one; a successful write bumps the version.
    async fn put(&self, id: Id, work_order: WorkOrder) -> WoResult<WorkOrder>;

    /// Insert a new aggregate, assigning an id when it has none
    async fn create(&self, work_order: WorkOrder) -> WoResult<WorkOrder>;

    /// Remove an aggregate; `false` when it did not exist
    async fn delete(&self, id: Id) -> WoResult<bool>;

    /// All aggregates in insertion order
    async fn list(&self) -> WoResult<Vec<WorkOrder>>;
}

/// Client material catalogue
#[async_trait]
pub trait ClientMaterialStore: Send + Sync {
    async fn get(&self, id: Id) -> WoResult<Option<ClientMaterial>>;

    async fn list(&self) -> WoResult<Vec<ClientMaterial>>;

    /// Insert, assigning an id when it has none
    async fn create(&self, material: ClientMaterial) -> WoResult<ClientMaterial>;

    /// Remove; `false` when it did not exist
    async fn delete(&self, id: Id) -> WoResult<bool>;
}
