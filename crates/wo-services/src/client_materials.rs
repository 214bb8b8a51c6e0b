//! Client material catalogue service
//!
//! Client materials are referenced by receivable materials on work orders.
//! Deleting one that is still referenced is refused.

use std::sync::Arc;

use tracing::{info, instrument, warn};
use wo_contracts::{Contract, CreateClientMaterialContract, DeleteClientMaterialContract};
use wo_core::error::WoError;
use wo_core::result::WoResult;
use wo_core::traits::{Entity, Id};
use wo_models::ClientMaterial;
use wo_store::{ClientMaterialStore, WorkOrderStore};

pub struct ClientMaterialService<W: WorkOrderStore, C: ClientMaterialStore> {
    work_orders: Arc<W>,
    materials: Arc<C>,
}

impl<W: WorkOrderStore, C: ClientMaterialStore> ClientMaterialService<W, C> {
    pub fn new(work_orders: Arc<W>, materials: Arc<C>) -> Self {
        Self {
            work_orders,
            materials,
        }
    }

    #[instrument(skip(self, material), fields(code = %material.code))]
    pub async fn create(&self, material: ClientMaterial) -> WoResult<ClientMaterial> {
        let existing_codes: Vec<String> = self
            .materials
            .list()
            .await?
            .into_iter()
            .map(|m| m.code)
            .collect();
        CreateClientMaterialContract::new(&existing_codes).validate(&material)?;

        let created = self.materials.create(material).await?;
        info!(id = ?created.id, code = %created.code, "Client material created");
        Ok(created)
    }

    pub async fn get(&self, id: Id) -> WoResult<ClientMaterial> {
        self.materials
            .get(id)
            .await?
            .ok_or_else(|| WoError::not_found(ClientMaterial::TYPE_NAME, "id", id))
    }

    pub async fn list(&self) -> WoResult<Vec<ClientMaterial>> {
        self.materials.list().await
    }

    /// Numbers of work orders holding a receivable material for `id`
    pub async fn referencing_work_orders(&self, id: Id) -> WoResult<Vec<String>> {
        Ok(self
            .work_orders
            .list()
            .await?
            .into_iter()
            .filter(|wo| wo.referenced_client_materials().any(|cm| cm == id))
            .map(|wo| wo.details.number)
            .collect())
    }

    /// Delete a client material unless a work order still references it
    #[instrument(skip(self))]
    pub async fn delete(&self, id: Id) -> WoResult<()> {
        let material = self.get(id).await?;

        let referencing = self.referencing_work_orders(id).await?;
        if let Err(err) = DeleteClientMaterialContract::new(id, &referencing).check() {
            warn!(
                id = %id,
                code = %material.code,
                references = referencing.len(),
                "Client material still in use"
            );
            return Err(err);
        }

        if !self.materials.delete(id).await? {
            return Err(WoError::not_found(ClientMaterial::TYPE_NAME, "id", id));
        }
        info!(id = %id, code = %material.code, "Client material deleted");
        Ok(())
    }
}
