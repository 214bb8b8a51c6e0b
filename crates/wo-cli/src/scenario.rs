//! Scenario files and their replay against in-memory stores
//!
//! A scenario seeds client materials and work orders, then lists operations
//! to run through the lifecycle manager. Work orders are addressed by number
//! and sub-items by position or id, so scenarios can be written by hand.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use wo_core::config::AppConfig;
use wo_core::error::WoError;
use wo_core::result::WoResult;
use wo_core::traits::{new_id, Caller, Entity, Id};
use wo_models::{ClientMaterial, Collection, NewWorkOrder, SubItem, WorkOrder, WorkOrderStatus};
use wo_services::{ClientMaterialService, SubItemPatch, WorkOrderLifecycle};
use wo_store::{
    ClientMaterialStore, MemoryClientMaterialStore, MemoryWorkOrderStore, WorkOrderStore,
};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Scenario {
    pub client_materials: Vec<ClientMaterial>,
    pub work_orders: Vec<WorkOrder>,
    pub operations: Vec<Operation>,
}

/// Position in a collection, or an item id
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
pub enum ItemRef {
    Index(usize),
    Id(Id),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum Operation {
    #[serde(rename_all = "camelCase")]
    CreateWorkOrder {
        caller: Option<String>,
        work_order: NewWorkOrder,
    },
    #[serde(rename_all = "camelCase")]
    UpdateStatus {
        work_order: String,
        status: WorkOrderStatus,
    },
    #[serde(rename_all = "camelCase")]
    AddSubItem {
        caller: Option<String>,
        work_order: String,
        sub_item: SubItem,
    },
    #[serde(rename_all = "camelCase")]
    UpdateSubItem {
        caller: Option<String>,
        work_order: String,
        collection: Collection,
        item: ItemRef,
        patch: SubItemPatch,
    },
    #[serde(rename_all = "camelCase")]
    RemoveSubItem {
        caller: Option<String>,
        work_order: String,
        collection: Collection,
        item: ItemRef,
    },
    #[serde(rename_all = "camelCase")]
    DeleteWorkOrder { work_order: String },
    CreateClientMaterial { material: ClientMaterial },
    DeleteClientMaterial { code: String },
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::CreateWorkOrder { .. } => "createWorkOrder",
            Operation::UpdateStatus { .. } => "updateStatus",
            Operation::AddSubItem { .. } => "addSubItem",
            Operation::UpdateSubItem { .. } => "updateSubItem",
            Operation::RemoveSubItem { .. } => "removeSubItem",
            Operation::DeleteWorkOrder { .. } => "deleteWorkOrder",
            Operation::CreateClientMaterial { .. } => "createClientMaterial",
            Operation::DeleteClientMaterial { .. } => "deleteClientMaterial",
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorReport {
    pub code: &'static str,
    pub message: String,
}

impl From<&WoError> for ErrorReport {
    fn from(err: &WoError) -> Self {
        Self {
            code: err.error_code(),
            message: err.to_string(),
        }
    }
}

/// What a single operation produced
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Outcome {
    pub step: usize,
    pub op: &'static str,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_order: Option<WorkOrder>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_material: Option<ClientMaterial>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorReport>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub outcomes: Vec<Outcome>,
    pub work_orders: Vec<WorkOrder>,
    pub client_materials: Vec<ClientMaterial>,
}

enum Applied {
    WorkOrder(WorkOrder),
    ClientMaterial(ClientMaterial),
    Deleted,
}

fn caller(login: &Option<String>) -> Caller {
    login.as_deref().map(Caller::new).unwrap_or_else(Caller::anonymous)
}

/// In-memory stores plus the services running the scenario
pub struct Replay {
    work_orders: Arc<MemoryWorkOrderStore>,
    materials: Arc<MemoryClientMaterialStore>,
    lifecycle: WorkOrderLifecycle<MemoryWorkOrderStore>,
    client_materials: ClientMaterialService<MemoryWorkOrderStore, MemoryClientMaterialStore>,
}

impl Replay {
    pub fn new(config: AppConfig) -> Self {
        let work_orders = Arc::new(MemoryWorkOrderStore::from_config(&config.store));
        let materials = Arc::new(MemoryClientMaterialStore::new());
        Self {
            lifecycle: WorkOrderLifecycle::new(work_orders.clone(), config.lifecycle),
            client_materials: ClientMaterialService::new(work_orders.clone(), materials.clone()),
            work_orders,
            materials,
        }
    }

    /// Load seed records straight into the stores, bypassing contracts
    ///
    /// Seeded sub-items without an id get one so operations can address them.
    pub async fn seed(&self, scenario: &Scenario) -> WoResult<()> {
        for material in &scenario.client_materials {
            self.materials.create(material.clone()).await?;
        }
        for work_order in &scenario.work_orders {
            let mut work_order = work_order.clone();
            work_order.id.get_or_insert_with(new_id);
            let assigned = work_order.assign_missing_sub_item_ids();
            if assigned > 0 {
                debug!(number = %work_order.details.number, assigned, "Assigned sub-item ids");
            }
            self.work_orders.create(work_order).await?;
        }
        info!(
            client_materials = scenario.client_materials.len(),
            work_orders = scenario.work_orders.len(),
            "Scenario seeded"
        );
        Ok(())
    }

    /// Seed, run every operation in order and collect the final state
    ///
    /// A failing operation is recorded and the replay moves on.
    pub async fn run(&self, scenario: Scenario) -> WoResult<Report> {
        self.seed(&scenario).await?;

        let mut outcomes = Vec::with_capacity(scenario.operations.len());
        for (step, operation) in scenario.operations.into_iter().enumerate() {
            let op = operation.name();
            let mut outcome = Outcome {
                step,
                op,
                ..Outcome::default()
            };
            match self.apply(operation).await {
                Ok(applied) => {
                    debug!(step, op, "Operation applied");
                    outcome.ok = true;
                    match applied {
                        Applied::WorkOrder(wo) => outcome.work_order = Some(wo),
                        Applied::ClientMaterial(cm) => outcome.client_material = Some(cm),
                        Applied::Deleted => {}
                    }
                }
                Err(err) => {
                    warn!(step, op, error = %err, "Operation failed");
                    outcome.error = Some(ErrorReport::from(&err));
                }
            }
            outcomes.push(outcome);
        }

        Ok(Report {
            outcomes,
            work_orders: self.work_orders.list().await?,
            client_materials: self.materials.list().await?,
        })
    }

    async fn apply(&self, operation: Operation) -> WoResult<Applied> {
        let applied = match operation {
            Operation::CreateWorkOrder { caller: login, work_order } => Applied::WorkOrder(
                self.lifecycle
                    .create_work_order(&caller(&login), work_order)
                    .await?,
            ),
            Operation::UpdateStatus { work_order, status } => {
                let id = self.work_order_id(&work_order).await?;
                Applied::WorkOrder(self.lifecycle.update_status(id, status).await?)
            }
            Operation::AddSubItem {
                caller: login,
                work_order,
                sub_item,
            } => {
                let id = self.work_order_id(&work_order).await?;
                Applied::WorkOrder(
                    self.lifecycle
                        .add_sub_item(&caller(&login), id, sub_item)
                        .await?,
                )
            }
            Operation::UpdateSubItem {
                caller: login,
                work_order,
                collection,
                item,
                patch,
            } => {
                let id = self.work_order_id(&work_order).await?;
                let item_id = self.item_id(id, collection, item).await?;
                Applied::WorkOrder(
                    self.lifecycle
                        .update_sub_item(&caller(&login), id, collection, item_id, &patch)
                        .await?,
                )
            }
            Operation::RemoveSubItem {
                caller: login,
                work_order,
                collection,
                item,
            } => {
                let id = self.work_order_id(&work_order).await?;
                let item_id = self.item_id(id, collection, item).await?;
                Applied::WorkOrder(
                    self.lifecycle
                        .remove_sub_item(&caller(&login), id, collection, item_id)
                        .await?,
                )
            }
            Operation::DeleteWorkOrder { work_order } => {
                let id = self.work_order_id(&work_order).await?;
                self.lifecycle.delete_work_order(id).await?;
                Applied::Deleted
            }
            Operation::CreateClientMaterial { material } => {
                Applied::ClientMaterial(self.client_materials.create(material).await?)
            }
            Operation::DeleteClientMaterial { code } => {
                let id = self
                    .client_materials
                    .list()
                    .await?
                    .into_iter()
                    .find(|m| m.code == code)
                    .and_then(|m| m.id)
                    .ok_or_else(|| WoError::not_found(ClientMaterial::TYPE_NAME, "code", &code))?;
                self.client_materials.delete(id).await?;
                Applied::Deleted
            }
        };
        Ok(applied)
    }

    async fn work_order_id(&self, number: &str) -> WoResult<Id> {
        self.work_orders
            .list()
            .await?
            .into_iter()
            .find(|w| w.details.number == number)
            .and_then(|w| w.id)
            .ok_or_else(|| WoError::not_found(WorkOrder::TYPE_NAME, "number", number))
    }

    async fn item_id(
        &self,
        work_order_id: Id,
        collection: Collection,
        item: ItemRef,
    ) -> WoResult<Id> {
        match item {
            ItemRef::Id(id) => Ok(id),
            ItemRef::Index(index) => self
                .lifecycle
                .get_work_order(work_order_id)
                .await?
                .sub_item_ids(collection)
                .get(index)
                .copied()
                .ok_or_else(|| WoError::not_found(collection.entity_name(), "index", index)),
        }
    }
}
