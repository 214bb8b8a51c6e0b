//! Issues reported against a work order

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use wo_core::traits::{Id, Identifiable};

use crate::status::{Priority, Severity};
use crate::sub_item::{Collection, SubItemRecord};
use crate::work_order::WorkOrder;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub id: Option<Id>,
    pub work_order_id: Option<Id>,
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub severity: Severity,
    #[serde(default)]
    pub status: IssueStatus,
    pub reported_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub reported_by: String,
    pub resolution_date: Option<NaiveDate>,
    pub resolution_notes: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum IssueStatus {
    #[default]
    Open,
    InProgress,
    Resolved,
    Closed,
}

impl Issue {
    pub fn new(title: impl Into<String>, severity: Severity) -> Self {
        Self {
            id: None,
            work_order_id: None,
            title: title.into(),
            description: None,
            priority: Priority::default(),
            severity,
            status: IssueStatus::default(),
            reported_date: None,
            reported_by: String::new(),
            resolution_date: None,
            resolution_notes: None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self.status, IssueStatus::Resolved | IssueStatus::Closed)
    }
}

impl Identifiable for Issue {
    fn id(&self) -> Option<Id> {
        self.id
    }
}

impl SubItemRecord for Issue {
    const COLLECTION: Collection = Collection::Issues;

    fn set_id(&mut self, id: Id) {
        self.id = Some(id);
    }

    fn set_work_order_id(&mut self, work_order_id: Id) {
        self.work_order_id = Some(work_order_id);
    }

    fn stamp_created(&mut self, actor: &str, at: DateTime<Utc>) {
        self.reported_by = actor.to_string();
        self.reported_date = Some(at);
    }

    fn collection(work_order: &WorkOrder) -> &Vec<Self> {
        &work_order.issues
    }

    fn collection_mut(work_order: &mut WorkOrder) -> &mut Vec<Self> {
        &mut work_order.issues
    }
}
