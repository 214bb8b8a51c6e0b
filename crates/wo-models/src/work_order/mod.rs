//! Work order aggregate and its creation payload

pub mod model;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub use model::{WorkOrder, WorkOrderDetails};

use crate::status::Priority;

/// Payload for creating a work order
///
/// Status is not part of the payload; new work orders start `Pending`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewWorkOrder {
    pub number: String,
    pub title: String,
    pub description: Option<String>,
    pub client: Option<String>,
    pub location: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    pub category: Option<String>,
    pub receive_date: Option<NaiveDate>,
    pub start_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub estimated_cost: Option<f64>,
}

impl NewWorkOrder {
    pub fn new(number: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_client(mut self, client: impl Into<String>) -> Self {
        self.client = Some(client.into());
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_dates(mut self, start_date: NaiveDate, due_date: NaiveDate) -> Self {
        self.start_date = Some(start_date);
        self.due_date = Some(due_date);
        self
    }

    pub fn with_estimated_cost(mut self, cost: f64) -> Self {
        self.estimated_cost = Some(cost);
        self
    }

    /// Build the unsaved aggregate described by this payload
    pub fn into_work_order(self) -> WorkOrder {
        WorkOrder {
            details: WorkOrderDetails {
                number: self.number,
                title: self.title,
                description: self.description,
                client: self.client,
                location: self.location,
                priority: self.priority,
                category: self.category,
                receive_date: self.receive_date,
                start_date: self.start_date,
                due_date: self.due_date,
                estimated_cost: self.estimated_cost,
                ..Default::default()
            },
            ..Default::default()
        }
    }
}
