//! In-memory stores

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, instrument};
use wo_core::config::StoreConfig;
use wo_core::error::WoError;
use wo_core::result::WoResult;
use wo_core::traits::{new_id, Entity, Id};
use wo_models::{ClientMaterial, WorkOrder};

use crate::repository::{ClientMaterialStore, WorkOrderStore};

/// In-memory work order store
pub struct MemoryWorkOrderStore {
    work_orders: RwLock<Vec<WorkOrder>>,
    optimistic_locking: bool,
}

impl Default for MemoryWorkOrderStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryWorkOrderStore {
    pub fn new() -> Self {
        Self {
            work_orders: RwLock::new(Vec::new()),
            optimistic_locking: true,
        }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new().with_optimistic_locking(config.optimistic_locking)
    }

    /// Toggle the `lock_version` comparison on `put`
    pub fn with_optimistic_locking(mut self, enabled: bool) -> Self {
        self.optimistic_locking = enabled;
        self
    }
}

#[async_trait]
impl WorkOrderStore for MemoryWorkOrderStore {
    async fn get(&self, id: Id) -> WoResult<Option<WorkOrder>> {
        let work_orders = self.work_orders.read().await;
        Ok(work_orders.iter().find(|w| w.id == Some(id)).cloned())
    }

    #[instrument(skip(self, work_order), fields(store = "memory"))]
    async fn put(&self, id: Id, mut work_order: WorkOrder) -> WoResult<WorkOrder> {
        let mut work_orders = self.work_orders.write().await;
        let slot = work_orders
            .iter_mut()
            .find(|w| w.id == Some(id))
            .ok_or_else(|| WoError::not_found(WorkOrder::TYPE_NAME, "id", id))?;

        if self.optimistic_locking && slot.lock_version != work_order.lock_version {
            return Err(WoError::conflict(format!(
                "work order {} was modified concurrently (expected version {}, found {})",
                id, work_order.lock_version, slot.lock_version
            )));
        }

        work_order.id = Some(id);
        work_order.lock_version = slot.lock_version + 1;
        *slot = work_order.clone();

        debug!(id = %id, lock_version = work_order.lock_version, "Work order written");
        Ok(work_order)
    }

    #[instrument(skip(self, work_order), fields(store = "memory"))]
    async fn create(&self, mut work_order: WorkOrder) -> WoResult<WorkOrder> {
        let mut work_orders = self.work_orders.write().await;
        let id = work_order.id.unwrap_or_else(new_id);
        if work_orders.iter().any(|w| w.id == Some(id)) {
            return Err(WoError::conflict(format!("work order {} already exists", id)));
        }

        work_order.id = Some(id);
        work_order.lock_version = 0;
        work_orders.push(work_order.clone());

        debug!(id = %id, number = %work_order.details.number, "Work order created");
        Ok(work_order)
    }

    async fn delete(&self, id: Id) -> WoResult<bool> {
        let mut work_orders = self.work_orders.write().await;
        let before = work_orders.len();
        work_orders.retain(|w| w.id != Some(id));
        Ok(work_orders.len() != before)
    }

    async fn list(&self) -> WoResult<Vec<WorkOrder>> {
        let work_orders = self.work_orders.read().await;
        Ok(work_orders.clone())
    }
}

/// In-memory client material catalogue
#[derive(Default)]
pub struct MemoryClientMaterialStore {
    materials: RwLock<Vec<ClientMaterial>>,
}

impl MemoryClientMaterialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ClientMaterialStore for MemoryClientMaterialStore {
    async fn get(&self, id: Id) -> WoResult<Option<ClientMaterial>> {
        let materials = self.materials.read().await;
        Ok(materials.iter().find(|m| m.id == Some(id)).cloned())
    }

    async fn list(&self) -> WoResult<Vec<ClientMaterial>> {
        let materials = self.materials.read().await;
        Ok(materials.clone())
    }

    async fn create(&self, mut material: ClientMaterial) -> WoResult<ClientMaterial> {
        let mut materials = self.materials.write().await;
        let id = material.id.unwrap_or_else(new_id);
        if materials.iter().any(|m| m.id == Some(id)) {
            return Err(WoError::conflict(format!(
                "{} {} already exists",
                ClientMaterial::TYPE_NAME,
                id
            )));
        }

        material.id = Some(id);
        material.created_date.get_or_insert_with(chrono::Utc::now);
        materials.push(material.clone());

        debug!(id = %id, code = %material.code, "Client material created");
        Ok(material)
    }

    async fn delete(&self, id: Id) -> WoResult<bool> {
        let mut materials = self.materials.write().await;
        let before = materials.len();
        materials.retain(|m| m.id != Some(id));
        Ok(materials.len() != before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wo_models::Task;

    #[tokio::test]
    async fn test_create_assigns_id_and_version() {
        let store = MemoryWorkOrderStore::new();
        let created = store.create(WorkOrder::new("WO-1", "Fix pump")).await.unwrap();

        let id = created.id.unwrap();
        assert_eq!(created.lock_version, 0);
        assert_eq!(store.get(id).await.unwrap(), Some(created));
    }

    #[tokio::test]
    async fn test_create_keeps_given_id_and_rejects_duplicates() {
        let store = MemoryWorkOrderStore::new();
        let id = new_id();
        let mut wo = WorkOrder::new("WO-1", "Fix pump");
        wo.id = Some(id);

        assert_eq!(store.create(wo.clone()).await.unwrap().id, Some(id));
        assert!(store.create(wo).await.unwrap_err().is_conflict());
    }

    #[tokio::test]
    async fn test_put_replaces_whole_aggregate() {
        let store = MemoryWorkOrderStore::new();
        let created = store.create(WorkOrder::new("WO-1", "Fix pump")).await.unwrap();
        let id = created.id.unwrap();

        let mut next = created.clone();
        next.tasks.push(Task::new("Drain tank"));
        let stored = store.put(id, next).await.unwrap();

        assert_eq!(stored.lock_version, 1);
        let fetched = store.get(id).await.unwrap().unwrap();
        assert_eq!(fetched.tasks.len(), 1);
        assert_eq!(fetched, stored);
    }

    #[tokio::test]
    async fn test_put_unknown_id() {
        let store = MemoryWorkOrderStore::new();
        let err = store.put(new_id(), WorkOrder::default()).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_stale_put_is_rejected() {
        let store = MemoryWorkOrderStore::new();
        let created = store.create(WorkOrder::new("WO-1", "Fix pump")).await.unwrap();
        let id = created.id.unwrap();

        let mut first = created.clone();
        first.details.title = "First writer".to_string();
        let mut second = created.clone();
        second.details.title = "Second writer".to_string();

        store.put(id, first).await.unwrap();
        let err = store.put(id, second).await.unwrap_err();
        assert!(err.is_conflict());

        let fetched = store.get(id).await.unwrap().unwrap();
        assert_eq!(fetched.details.title, "First writer");
        assert_eq!(fetched.lock_version, 1);
    }

    #[tokio::test]
    async fn test_last_write_wins_without_locking() {
        let store = MemoryWorkOrderStore::from_config(&StoreConfig {
            optimistic_locking: false,
        });
        let created = store.create(WorkOrder::new("WO-1", "Fix pump")).await.unwrap();
        let id = created.id.unwrap();

        let mut first = created.clone();
        first.details.title = "First writer".to_string();
        let mut second = created.clone();
        second.details.title = "Second writer".to_string();

        store.put(id, first).await.unwrap();
        store.put(id, second).await.unwrap();

        let fetched = store.get(id).await.unwrap().unwrap();
        assert_eq!(fetched.details.title, "Second writer");
    }

    #[tokio::test]
    async fn test_default_config_enables_locking() {
        let store = MemoryWorkOrderStore::from_config(&StoreConfig::default());
        let created = store.create(WorkOrder::new("WO-1", "Fix pump")).await.unwrap();
        let id = created.id.unwrap();

        store.put(id, created.clone()).await.unwrap();
        assert!(store.put(id, created).await.unwrap_err().is_conflict());
    }

    #[tokio::test]
    async fn test_delete_and_list() {
        let store = MemoryWorkOrderStore::new();
        let a = store.create(WorkOrder::new("WO-1", "A")).await.unwrap();
        store.create(WorkOrder::new("WO-2", "B")).await.unwrap();

        assert!(store.delete(a.id.unwrap()).await.unwrap());
        assert!(!store.delete(a.id.unwrap()).await.unwrap());

        let remaining = store.list().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].details.number, "WO-2");
    }

    #[tokio::test]
    async fn test_client_material_store() {
        let store = MemoryClientMaterialStore::new();
        let created = store
            .create(ClientMaterial::new("CM-1", "Copper pipe"))
            .await
            .unwrap();
        let id = created.id.unwrap();

        assert!(created.created_date.is_some());
        assert_eq!(store.list().await.unwrap().len(), 1);
        assert!(store.delete(id).await.unwrap());
        assert_eq!(store.get(id).await.unwrap(), None);
    }
}
