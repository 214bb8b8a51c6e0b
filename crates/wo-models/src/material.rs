//! Materials assigned to work orders, and the client material catalogue

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;
use wo_core::traits::{Entity, Id, Identifiable};

use crate::sub_item::{Collection, SubItemRecord};
use crate::work_order::WorkOrder;

/// A material put on a work order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MaterialAssignment {
    pub id: Option<Id>,
    pub work_order_id: Option<Id>,
    /// Number of the owning work order at assignment time
    pub work_order_number: Option<String>,
    pub material: Material,
    pub assign_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub assigned_by: String,
}

/// Material payload, discriminated by `materialType`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "materialType", rename_all = "camelCase")]
pub enum Material {
    /// Bought by the contractor
    Purchasable(PurchasableMaterial),
    /// Supplied by the client
    Receivable(ReceivableMaterial),
}

impl Material {
    pub fn quantity(&self) -> f64 {
        match self {
            Material::Purchasable(m) => m.quantity,
            Material::Receivable(m) => m.quantity,
        }
    }

    pub fn client_material_id(&self) -> Option<Id> {
        match self {
            Material::Receivable(m) => Some(m.client_material_id),
            Material::Purchasable(_) => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PurchasableMaterial {
    pub name: String,
    pub description: Option<String>,
    pub quantity: f64,
    pub unit: Option<String>,
    pub unit_cost: Option<f64>,
    pub supplier: Option<String>,
    #[serde(default)]
    pub status: PurchasableStatus,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum PurchasableStatus {
    #[default]
    Pending,
    Ordered,
    Delivered,
    InUse,
    Used,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReceivableMaterial {
    pub client_material_id: Id,
    pub description: Option<String>,
    pub quantity: f64,
    pub unit: Option<String>,
    #[serde(default)]
    pub status: ReceivableStatus,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ReceivableStatus {
    #[default]
    Pending,
    Ordered,
    Received,
    Used,
}

impl MaterialAssignment {
    pub fn purchasable(name: impl Into<String>, quantity: f64) -> Self {
        Self::with_material(Material::Purchasable(PurchasableMaterial {
            name: name.into(),
            description: None,
            quantity,
            unit: None,
            unit_cost: None,
            supplier: None,
            status: PurchasableStatus::default(),
        }))
    }

    pub fn receivable(client_material_id: Id, quantity: f64) -> Self {
        Self::with_material(Material::Receivable(ReceivableMaterial {
            client_material_id,
            description: None,
            quantity,
            unit: None,
            status: ReceivableStatus::default(),
        }))
    }

    fn with_material(material: Material) -> Self {
        Self {
            id: None,
            work_order_id: None,
            work_order_number: None,
            material,
            assign_date: None,
            assigned_by: String::new(),
        }
    }
}

impl Identifiable for MaterialAssignment {
    fn id(&self) -> Option<Id> {
        self.id
    }
}

impl SubItemRecord for MaterialAssignment {
    const COLLECTION: Collection = Collection::Materials;

    fn set_id(&mut self, id: Id) {
        self.id = Some(id);
    }

    fn set_work_order_id(&mut self, work_order_id: Id) {
        self.work_order_id = Some(work_order_id);
    }

    fn set_work_order_number(&mut self, number: &str) {
        self.work_order_number = Some(number.to_string());
    }

    fn stamp_created(&mut self, actor: &str, at: DateTime<Utc>) {
        self.assigned_by = actor.to_string();
        self.assign_date = Some(at);
    }

    fn collection(work_order: &WorkOrder) -> &Vec<Self> {
        &work_order.materials
    }

    fn collection_mut(work_order: &mut WorkOrder) -> &mut Vec<Self> {
        &mut work_order.materials
    }
}

/// Client-specific material code referenced by receivable materials
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ClientMaterial {
    pub id: Option<Id>,
    /// Unique catalogue code
    #[validate(length(min = 1, max = 50))]
    pub code: String,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub description: Option<String>,
    pub unit: Option<String>,
    pub created_date: Option<DateTime<Utc>>,
}

impl ClientMaterial {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: None,
            code: code.into(),
            name: name.into(),
            description: None,
            unit: None,
            created_date: None,
        }
    }
}

impl Identifiable for ClientMaterial {
    fn id(&self) -> Option<Id> {
        self.id
    }
}

impl Entity for ClientMaterial {
    const TYPE_NAME: &'static str = "ClientMaterial";
}
