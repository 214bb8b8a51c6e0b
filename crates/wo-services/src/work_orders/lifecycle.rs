//! Work order lifecycle manager
//!
//! Every change to a work order goes through here as fetch, compute the
//! next aggregate from a copy, write the whole aggregate back. Every check
//! runs before the single `put`, so a failed call leaves the store as it was.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument};
use wo_contracts::{
    Contract, CreateWorkOrderContract, SubItemContract, TransitionPolicy, WorkOrderWorkflow,
};
use wo_core::config::{LifecycleConfig, MissingItemPolicy};
use wo_core::error::WoError;
use wo_core::result::WoResult;
use wo_core::traits::{Entity, Id, UserContext};
use wo_models::{Collection, NewWorkOrder, SubItem, WorkOrder, WorkOrderStatus};
use wo_store::WorkOrderStore;

use super::sub_items;
use crate::patch::SubItemPatch;

/// Mediates every change to a work order aggregate
pub struct WorkOrderLifecycle<S: WorkOrderStore, P: TransitionPolicy = WorkOrderWorkflow> {
    store: Arc<S>,
    policy: P,
    config: LifecycleConfig,
}

impl<S: WorkOrderStore> WorkOrderLifecycle<S> {
    pub fn new(store: Arc<S>, config: LifecycleConfig) -> Self {
        Self::with_policy(store, WorkOrderWorkflow, config)
    }
}

impl<S: WorkOrderStore, P: TransitionPolicy> WorkOrderLifecycle<S, P> {
    pub fn with_policy(store: Arc<S>, policy: P, config: LifecycleConfig) -> Self {
        Self {
            store,
            policy,
            config,
        }
    }

    pub fn config(&self) -> &LifecycleConfig {
        &self.config
    }

    fn actor<'a, U: UserContext + ?Sized>(&'a self, user: &'a U) -> &'a str {
        user.actor_or(&self.config.default_actor)
    }

    /// Record who last changed the work order's collections
    fn stamp_modified(work_order: &mut WorkOrder, actor: &str, at: DateTime<Utc>) {
        work_order.details.last_modified_by = Some(actor.to_string());
        work_order.details.last_modified_at = Some(at);
    }

    async fn load(&self, id: Id) -> WoResult<WorkOrder> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| WoError::not_found(WorkOrder::TYPE_NAME, "id", id))
    }

    /// Fetch a work order
    pub async fn get_work_order(&self, id: Id) -> WoResult<WorkOrder> {
        self.load(id).await
    }

    /// Create a work order in `Pending`
    #[instrument(skip(self, user, payload), fields(number = %payload.number))]
    pub async fn create_work_order<U: UserContext + ?Sized>(
        &self,
        user: &U,
        payload: NewWorkOrder,
    ) -> WoResult<WorkOrder> {
        let mut work_order = payload.into_work_order();
        work_order.details.status = WorkOrderStatus::Pending;
        work_order.details.created_by = self.actor(user).to_string();
        work_order.details.created_date = Some(Utc::now());

        let existing_numbers: Vec<String> = self
            .store
            .list()
            .await?
            .into_iter()
            .map(|w| w.details.number)
            .collect();
        CreateWorkOrderContract::new(&existing_numbers).validate(&work_order.details)?;

        let created = self.store.create(work_order).await?;
        info!(
            id = ?created.id,
            number = %created.details.number,
            created_by = %created.details.created_by,
            "Work order created"
        );
        Ok(created)
    }

    /// Delete a work order and everything it owns
    #[instrument(skip(self))]
    pub async fn delete_work_order(&self, id: Id) -> WoResult<()> {
        if !self.store.delete(id).await? {
            return Err(WoError::not_found(WorkOrder::TYPE_NAME, "id", id));
        }
        info!(id = %id, "Work order deleted");
        Ok(())
    }

    /// Move a work order to `new_status` if the workflow allows it
    ///
    /// Only `details.status` changes; everything else is written back as read.
    #[instrument(skip(self), fields(to = %new_status))]
    pub async fn update_status(&self, id: Id, new_status: WorkOrderStatus) -> WoResult<WorkOrder> {
        let current = self.load(id).await?;
        let from = current.details.status;
        self.policy.check_transition(from, new_status)?;

        let mut next = current;
        next.details.status = new_status;
        let stored = self.store.put(id, next).await?;

        info!(id = %id, from = %from, to = %new_status, "Work order status updated");
        Ok(stored)
    }

    /// Append a new sub-item to the collection its variant names
    ///
    /// The item gets a fresh id, the work order back-reference and creation
    /// audit fields from the caller (or the default actor).
    #[instrument(skip(self, user, item), fields(collection = %item.collection()))]
    pub async fn add_sub_item<U: UserContext + ?Sized>(
        &self,
        user: &U,
        id: Id,
        item: SubItem,
    ) -> WoResult<WorkOrder> {
        SubItemContract.validate(&item)?;

        let current = self.load(id).await?;
        let collection = item.collection();
        let actor = self.actor(user);
        let now = Utc::now();
        let mut next = current.clone();
        let item_id = sub_items::append(&mut next, id, item, actor, now);
        Self::stamp_modified(&mut next, actor, now);
        let stored = self.store.put(id, next).await?;

        info!(id = %id, item_id = %item_id, collection = %collection, "Sub-item added");
        Ok(stored)
    }

    /// Shallow-merge `patch` over an existing sub-item
    ///
    /// Sub-item edits also record the caller in `lastModifiedBy`/`lastModifiedAt`
    /// on the work order details.
    #[instrument(skip(self, user, patch))]
    pub async fn update_sub_item<U: UserContext + ?Sized>(
        &self,
        user: &U,
        id: Id,
        collection: Collection,
        item_id: Id,
        patch: &SubItemPatch,
    ) -> WoResult<WorkOrder> {
        let current = self.load(id).await?;
        let actor = self.actor(user);
        let now = Utc::now();
        let mut next = current.clone();
        let merged = sub_items::replace(&mut next, collection, item_id, patch, actor, now)?;
        SubItemContract.validate(&merged)?;
        Self::stamp_modified(&mut next, actor, now);
        let stored = self.store.put(id, next).await?;

        info!(id = %id, item_id = %item_id, collection = %collection, "Sub-item updated");
        Ok(stored)
    }

    /// Drop a sub-item from its collection
    ///
    /// An absent item is handled per `MissingItemPolicy`: `Ignore` returns the
    /// stored aggregate without writing, `Reject` fails with `NotFound`.
    #[instrument(skip(self, user))]
    pub async fn remove_sub_item<U: UserContext + ?Sized>(
        &self,
        user: &U,
        id: Id,
        collection: Collection,
        item_id: Id,
    ) -> WoResult<WorkOrder> {
        let current = self.load(id).await?;
        if !current.contains_sub_item(collection, item_id) {
            return match self.config.missing_item_policy {
                MissingItemPolicy::Ignore => {
                    debug!(
                        id = %id,
                        item_id = %item_id,
                        collection = %collection,
                        "Sub-item absent, nothing removed"
                    );
                    Ok(current)
                }
                MissingItemPolicy::Reject => {
                    Err(WoError::not_found(collection.entity_name(), "id", item_id))
                }
            };
        }

        let mut next = current.clone();
        sub_items::remove(&mut next, collection, item_id);
        Self::stamp_modified(&mut next, self.actor(user), Utc::now());
        let stored = self.store.put(id, next).await?;

        info!(id = %id, item_id = %item_id, collection = %collection, "Sub-item removed");
        Ok(stored)
    }
}
