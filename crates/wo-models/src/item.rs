//! Billable line items of a work order

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use wo_core::traits::{Id, Identifiable};

use crate::sub_item::{Collection, SubItemRecord};
use crate::work_order::WorkOrder;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkOrderItem {
    pub id: Option<Id>,
    pub work_order_id: Option<Id>,
    pub description: String,
    pub quantity: f64,
    pub unit: Option<String>,
    pub unit_price: Option<f64>,
    #[serde(default)]
    pub created_by: String,
    pub created_date: Option<DateTime<Utc>>,
}

impl WorkOrderItem {
    pub fn new(description: impl Into<String>, quantity: f64) -> Self {
        Self {
            id: None,
            work_order_id: None,
            description: description.into(),
            quantity,
            unit: None,
            unit_price: None,
            created_by: String::new(),
            created_date: None,
        }
    }

    pub fn with_unit_price(mut self, unit_price: f64) -> Self {
        self.unit_price = Some(unit_price);
        self
    }

    /// Quantity times unit price, when priced
    pub fn line_total(&self) -> Option<f64> {
        self.unit_price.map(|price| price * self.quantity)
    }
}

impl Identifiable for WorkOrderItem {
    fn id(&self) -> Option<Id> {
        self.id
    }
}

impl SubItemRecord for WorkOrderItem {
    const COLLECTION: Collection = Collection::Items;

    fn set_id(&mut self, id: Id) {
        self.id = Some(id);
    }

    fn set_work_order_id(&mut self, work_order_id: Id) {
        self.work_order_id = Some(work_order_id);
    }

    fn stamp_created(&mut self, actor: &str, at: DateTime<Utc>) {
        self.created_by = actor.to_string();
        self.created_date = Some(at);
    }

    fn collection(work_order: &WorkOrder) -> &Vec<Self> {
        &work_order.items
    }

    fn collection_mut(work_order: &mut WorkOrder) -> &mut Vec<Self> {
        &mut work_order.items
    }
}
