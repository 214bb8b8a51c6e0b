//! Permits required to carry out a work order

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use wo_core::traits::{Id, Identifiable};

use crate::sub_item::{Collection, SubItemRecord};
use crate::work_order::WorkOrder;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Permit {
    pub id: Option<Id>,
    pub work_order_id: Option<Id>,
    pub permit_type: String,
    pub permit_number: Option<String>,
    pub issuing_authority: Option<String>,
    pub issue_date: Option<NaiveDate>,
    pub expiry_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: PermitStatus,
    #[serde(default)]
    pub created_by: String,
    pub created_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PermitStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    Expired,
}

impl Permit {
    pub fn new(permit_type: impl Into<String>) -> Self {
        Self {
            id: None,
            work_order_id: None,
            permit_type: permit_type.into(),
            permit_number: None,
            issuing_authority: None,
            issue_date: None,
            expiry_date: None,
            status: PermitStatus::default(),
            created_by: String::new(),
            created_date: None,
        }
    }

    pub fn with_validity(mut self, issue_date: NaiveDate, expiry_date: NaiveDate) -> Self {
        self.issue_date = Some(issue_date);
        self.expiry_date = Some(expiry_date);
        self
    }
}

impl Identifiable for Permit {
    fn id(&self) -> Option<Id> {
        self.id
    }
}

impl SubItemRecord for Permit {
    const COLLECTION: Collection = Collection::Permits;

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
        &work_order.permits
    }

    fn collection_mut(work_order: &mut WorkOrder) -> &mut Vec<Self> {
        &mut work_order.permits
    }
}
