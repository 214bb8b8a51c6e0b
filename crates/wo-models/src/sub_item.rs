//! Sub-items: entries of the collections owned by a work order

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use wo_core::traits::{Id, Identifiable};

use crate::issue::Issue;
use crate::item::WorkOrderItem;
use crate::material::MaterialAssignment;
use crate::permit::Permit;
use crate::remark::Remark;
use crate::task::Task;
use crate::work_order::WorkOrder;

/// Names of the collections a work order owns
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Items,
    Materials,
    Tasks,
    Issues,
    Remarks,
    Permits,
}

impl Collection {
    pub const ALL: [Collection; 6] = [
        Collection::Items,
        Collection::Materials,
        Collection::Tasks,
        Collection::Issues,
        Collection::Remarks,
        Collection::Permits,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Items => "items",
            Self::Materials => "materials",
            Self::Tasks => "tasks",
            Self::Issues => "issues",
            Self::Remarks => "remarks",
            Self::Permits => "permits",
        }
    }

    /// Entity name used in `NotFound` errors
    pub fn entity_name(&self) -> &'static str {
        match self {
            Self::Items => "WorkOrderItem",
            Self::Materials => "MaterialAssignment",
            Self::Tasks => "Task",
            Self::Issues => "Issue",
            Self::Remarks => "Remark",
            Self::Permits => "Permit",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Collection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Collection::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("unknown collection '{}'", s))
    }
}

/// A record stored in one of the work order's collections
pub trait SubItemRecord:
    Identifiable + Clone + Serialize + DeserializeOwned + Send + Sync
{
    const COLLECTION: Collection;

    fn set_id(&mut self, id: Id);

    /// Back-reference to the owning work order
    fn set_work_order_id(&mut self, work_order_id: Id);

    /// Denormalized copy of the owning work order's number, where kept
    fn set_work_order_number(&mut self, _number: &str) {}

    /// Fill creation audit fields
    fn stamp_created(&mut self, actor: &str, at: DateTime<Utc>);

    /// Fill modification audit fields, where kept
    fn stamp_modified(&mut self, _actor: &str, _at: DateTime<Utc>) {}

    fn collection(work_order: &WorkOrder) -> &Vec<Self>;

    fn collection_mut(work_order: &mut WorkOrder) -> &mut Vec<Self>;
}

/// A new or existing sub-item, tagged with the collection it belongs to
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "collection", content = "item", rename_all = "lowercase")]
pub enum SubItem {
    Items(WorkOrderItem),
    Materials(MaterialAssignment),
    Tasks(Task),
    Issues(Issue),
    Remarks(Remark),
    Permits(Permit),
}

impl SubItem {
    pub fn collection(&self) -> Collection {
        match self {
            SubItem::Items(_) => Collection::Items,
            SubItem::Materials(_) => Collection::Materials,
            SubItem::Tasks(_) => Collection::Tasks,
            SubItem::Issues(_) => Collection::Issues,
            SubItem::Remarks(_) => Collection::Remarks,
            SubItem::Permits(_) => Collection::Permits,
        }
    }

    pub fn id(&self) -> Option<Id> {
        match self {
            SubItem::Items(i) => i.id(),
            SubItem::Materials(m) => m.id(),
            SubItem::Tasks(t) => t.id(),
            SubItem::Issues(i) => i.id(),
            SubItem::Remarks(r) => r.id(),
            SubItem::Permits(p) => p.id(),
        }
    }
}

impl From<WorkOrderItem> for SubItem {
    fn from(item: WorkOrderItem) -> Self {
        SubItem::Items(item)
    }
}

impl From<MaterialAssignment> for SubItem {
    fn from(material: MaterialAssignment) -> Self {
        SubItem::Materials(material)
    }
}

impl From<Task> for SubItem {
    fn from(task: Task) -> Self {
        SubItem::Tasks(task)
    }
}

impl From<Issue> for SubItem {
    fn from(issue: Issue) -> Self {
        SubItem::Issues(issue)
    }
}

impl From<Remark> for SubItem {
    fn from(remark: Remark) -> Self {
        SubItem::Remarks(remark)
    }
}

impl From<Permit> for SubItem {
    fn from(permit: Permit) -> Self {
        SubItem::Permits(permit)
    }
}
