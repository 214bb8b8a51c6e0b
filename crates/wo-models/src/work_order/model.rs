//! Work Order aggregate

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;
use wo_core::traits::{new_id, Entity, Id, Identifiable, Lockable};

use crate::issue::Issue;
use crate::item::WorkOrderItem;
use crate::material::MaterialAssignment;
use crate::permit::Permit;
use crate::remark::Remark;
use crate::status::{Priority, WorkOrderStatus};
use crate::sub_item::{Collection, SubItemRecord};
use crate::task::Task;

/// Work order aggregate root
///
/// The work order owns all of its sub-item collections. Nothing inside it is
/// changed in place in the store; every change replaces the whole aggregate.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkOrder {
    pub id: Option<Id>,
    pub details: WorkOrderDetails,
    #[serde(default)]
    pub items: Vec<WorkOrderItem>,
    #[serde(default)]
    pub materials: Vec<MaterialAssignment>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub issues: Vec<Issue>,
    #[serde(default)]
    pub remarks: Vec<Remark>,
    #[serde(default)]
    pub permits: Vec<Permit>,
    /// Incremented by the store on every successful write
    #[serde(default)]
    pub lock_version: i32,
}

/// Descriptive, scheduling, cost and audit fields of a work order
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Validate)]
#[serde(rename_all = "camelCase")]
pub struct WorkOrderDetails {
    #[validate(length(min = 1, max = 50))]
    pub number: String,
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    pub description: Option<String>,
    /// Client reference (name or external code)
    pub client: Option<String>,
    pub location: Option<String>,
    #[serde(default)]
    pub status: WorkOrderStatus,
    #[serde(default)]
    pub priority: Priority,
    pub category: Option<String>,
    #[serde(default)]
    #[validate(range(min = 0, max = 100))]
    pub completion_percentage: i32,
    pub receive_date: Option<NaiveDate>,
    pub start_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub completion_date: Option<NaiveDate>,
    pub estimated_cost: Option<f64>,
    pub actual_cost: Option<f64>,
    #[serde(default)]
    pub created_by: String,
    pub created_date: Option<DateTime<Utc>>,
    pub last_modified_by: Option<String>,
    pub last_modified_at: Option<DateTime<Utc>>,
}

impl WorkOrder {
    pub fn new(number: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            details: WorkOrderDetails {
                number: number.into(),
                title: title.into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    pub fn status(&self) -> WorkOrderStatus {
        self.details.status
    }

    pub fn number(&self) -> &str {
        &self.details.number
    }

    /// Ids currently present in a collection, in order
    pub fn sub_item_ids(&self, collection: Collection) -> Vec<Id> {
        fn ids<T: Identifiable>(items: &[T]) -> Vec<Id> {
            items.iter().filter_map(Identifiable::id).collect()
        }
        match collection {
            Collection::Items => ids(&self.items),
            Collection::Materials => ids(&self.materials),
            Collection::Tasks => ids(&self.tasks),
            Collection::Issues => ids(&self.issues),
            Collection::Remarks => ids(&self.remarks),
            Collection::Permits => ids(&self.permits),
        }
    }

    pub fn contains_sub_item(&self, collection: Collection, item_id: Id) -> bool {
        self.sub_item_ids(collection).contains(&item_id)
    }

    /// Give every sub-item without an id a fresh one and link it to this
    /// work order; returns how many were assigned
    pub fn assign_missing_sub_item_ids(&mut self) -> usize {
        fn fill<T: SubItemRecord>(work_order: &mut WorkOrder) -> usize {
            let owner = work_order.id;
            let number = work_order.details.number.clone();
            let mut assigned = 0;
            for record in T::collection_mut(work_order) {
                if record.id().is_none() {
                    record.set_id(new_id());
                    if let Some(owner) = owner {
                        record.set_work_order_id(owner);
                    }
                    record.set_work_order_number(&number);
                    assigned += 1;
                }
            }
            assigned
        }

        fill::<WorkOrderItem>(self)
            + fill::<MaterialAssignment>(self)
            + fill::<Task>(self)
            + fill::<Issue>(self)
            + fill::<Remark>(self)
            + fill::<Permit>(self)
    }

    /// Client material ids referenced by receivable materials
    pub fn referenced_client_materials(&self) -> impl Iterator<Item = Id> + '_ {
        self.materials
            .iter()
            .filter_map(|m| m.material.client_material_id())
    }
}

impl Identifiable for WorkOrder {
    fn id(&self) -> Option<Id> {
        self.id
    }
}

impl Lockable for WorkOrder {
    fn lock_version(&self) -> i32 {
        self.lock_version
    }
}

impl Entity for WorkOrder {
    const TYPE_NAME: &'static str = "WorkOrder";
}
