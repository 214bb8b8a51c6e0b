//! Tasks planned on a work order

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use wo_core::traits::{Id, Identifiable};

use crate::status::Priority;
use crate::sub_item::{Collection, SubItemRecord};
use crate::work_order::WorkOrder;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Option<Id>,
    pub work_order_id: Option<Id>,
    pub title: String,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub created_by: String,
    pub created_date: Option<DateTime<Utc>>,
    pub last_modified_by: Option<String>,
    pub last_modified_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

impl Task {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: None,
            work_order_id: None,
            title: title.into(),
            description: None,
            start_date: None,
            due_date: None,
            priority: Priority::default(),
            status: TaskStatus::default(),
            completed: false,
            created_by: String::new(),
            created_date: None,
            last_modified_by: None,
            last_modified_at: None,
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }
}

impl Identifiable for Task {
    fn id(&self) -> Option<Id> {
        self.id
    }
}

impl SubItemRecord for Task {
    const COLLECTION: Collection = Collection::Tasks;

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

    fn stamp_modified(&mut self, actor: &str, at: DateTime<Utc>) {
        self.last_modified_by = Some(actor.to_string());
        self.last_modified_at = Some(at);
    }

    fn collection(work_order: &WorkOrder) -> &Vec<Self> {
        &work_order.tasks
    }

    fn collection_mut(work_order: &mut WorkOrder) -> &mut Vec<Self> {
        &mut work_order.tasks
    }
}
