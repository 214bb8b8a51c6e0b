//! Free-text remarks on a work order

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use wo_core::traits::{Id, Identifiable};

use crate::sub_item::{Collection, SubItemRecord};
use crate::work_order::WorkOrder;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Remark {
    pub id: Option<Id>,
    pub work_order_id: Option<Id>,
    pub content: String,
    /// Free-form category such as "general" or "safety"
    #[serde(rename = "type", default)]
    pub remark_type: String,
    #[serde(default)]
    pub created_by: String,
    pub created_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub people_involved: Vec<String>,
}

impl Remark {
    pub fn new(content: impl Into<String>, remark_type: impl Into<String>) -> Self {
        Self {
            id: None,
            work_order_id: None,
            content: content.into(),
            remark_type: remark_type.into(),
            created_by: String::new(),
            created_date: None,
            people_involved: Vec::new(),
        }
    }

    pub fn with_people(mut self, people: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.people_involved = people.into_iter().map(Into::into).collect();
        self
    }
}

impl Identifiable for Remark {
    fn id(&self) -> Option<Id> {
        self.id
    }
}

impl SubItemRecord for Remark {
    const COLLECTION: Collection = Collection::Remarks;

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
        &work_order.remarks
    }

    fn collection_mut(work_order: &mut WorkOrder) -> &mut Vec<Self> {
        &mut work_order.remarks
    }
}
