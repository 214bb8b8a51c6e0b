//! End-to-end lifecycle behaviour against in-memory and mocked stores

use std::sync::Arc;

use async_trait::async_trait;
use mockall::mock;
use serde_json::json;
use wo_contracts::can_transition_to;
use wo_core::config::LifecycleConfig;
use wo_core::error::WoError;
use wo_core::result::WoResult;
use wo_core::traits::{new_id, Caller, Id};
use wo_models::{
    ClientMaterial, Collection, Issue, MaterialAssignment, NewWorkOrder, Permit, Remark, Severity,
    SubItem, Task, WorkOrder, WorkOrderItem, WorkOrderStatus,
};
use wo_services::{ClientMaterialService, SubItemPatch, WorkOrderLifecycle};
use wo_store::{MemoryClientMaterialStore, MemoryWorkOrderStore, WorkOrderStore};

mock! {
    pub Store {}

    #[async_trait]
    impl WorkOrderStore for Store {
        async fn get(&self, id: Id) -> WoResult<Option<WorkOrder>>;
        async fn put(&self, id: Id, work_order: WorkOrder) -> WoResult<WorkOrder>;
        async fn create(&self, work_order: WorkOrder) -> WoResult<WorkOrder>;
        async fn delete(&self, id: Id) -> WoResult<bool>;
        async fn list(&self) -> WoResult<Vec<WorkOrder>>;
    }
}

fn memory_lifecycle() -> (Arc<MemoryWorkOrderStore>, WorkOrderLifecycle<MemoryWorkOrderStore>) {
    let store = Arc::new(MemoryWorkOrderStore::new());
    let lifecycle = WorkOrderLifecycle::new(store.clone(), LifecycleConfig::default());
    (store, lifecycle)
}

fn stored_work_order(status: WorkOrderStatus) -> WorkOrder {
    let mut wo = WorkOrder::new("WO-100", "Overhaul chiller");
    wo.id = Some(new_id());
    wo.details.status = status;
    wo.tasks.push({
        let mut task = Task::new("Isolate power");
        task.id = Some(new_id());
        task
    });
    wo
}

/// Mocked store serving `wo` on `get` that must never be written
fn read_only_store(wo: WorkOrder) -> MockStore {
    let mut store = MockStore::new();
    store
        .expect_get()
        .returning(move |_| Ok(Some(wo.clone())));
    store.expect_put().times(0);
    store
}

fn read_only_lifecycle(wo: WorkOrder) -> WorkOrderLifecycle<MockStore> {
    WorkOrderLifecycle::new(Arc::new(read_only_store(wo)), LifecycleConfig::default())
}

fn patch(value: serde_json::Value) -> SubItemPatch {
    value.as_object().cloned().unwrap()
}

#[tokio::test]
async fn status_grid_matches_workflow() {
    for from in WorkOrderStatus::ALL {
        for to in WorkOrderStatus::ALL {
            let (store, lifecycle) = memory_lifecycle();
            let created = store.create(stored_work_order(from)).await.unwrap();
            let id = created.id.unwrap();

            let result = lifecycle.update_status(id, to).await;
            let stored = store.get(id).await.unwrap().unwrap();

            if can_transition_to(from, to) {
                let updated = result.unwrap();
                assert_eq!(stored.status(), to);
                assert_eq!(updated, stored);

                let mut expected = created.clone();
                expected.details.status = to;
                expected.lock_version = stored.lock_version;
                assert_eq!(stored, expected, "{from} -> {to} changed more than the status");
            } else {
                assert!(
                    matches!(result, Err(WoError::InvalidTransition { .. })),
                    "{from} -> {to} should be rejected"
                );
                assert_eq!(stored, created);
            }
        }
    }
}

#[tokio::test]
async fn rejected_transition_never_writes() {
    let wo = stored_work_order(WorkOrderStatus::InProgress);
    let id = wo.id.unwrap();
    let lifecycle = read_only_lifecycle(wo);

    let err = lifecycle.update_status(id, WorkOrderStatus::Pending).await.unwrap_err();
    assert!(err.to_string().contains("in-progress"));
    assert!(err.to_string().contains("pending"));
}

#[tokio::test]
async fn work_order_scenario() {
    let (_, lifecycle) = memory_lifecycle();
    let wo1 = lifecycle
        .create_work_order(&Caller::new("planner"), NewWorkOrder::new("WO-1", "Replace pump"))
        .await
        .unwrap();
    let id = wo1.id.unwrap();
    assert_eq!(wo1.status(), WorkOrderStatus::Pending);

    let wo1 = lifecycle.update_status(id, WorkOrderStatus::InProgress).await.unwrap();
    assert_eq!(wo1.status(), WorkOrderStatus::InProgress);

    let err = lifecycle.update_status(id, WorkOrderStatus::Pending).await.unwrap_err();
    assert_eq!(err.error_code(), "invalid_transition");
    assert_eq!(
        lifecycle.get_work_order(id).await.unwrap().status(),
        WorkOrderStatus::InProgress
    );
}

#[tokio::test]
async fn add_then_remove_restores_every_collection() {
    let (_, lifecycle) = memory_lifecycle();
    let user = Caller::new("jdoe");
    let id = lifecycle
        .create_work_order(&user, NewWorkOrder::new("WO-2", "Paint corridor"))
        .await
        .unwrap()
        .id
        .unwrap();

    let items: Vec<SubItem> = vec![
        WorkOrderItem::new("Primer", 2.0).into(),
        MaterialAssignment::purchasable("Paint", 12.0).into(),
        Task::new("Mask skirting").into(),
        Issue::new("Damp patch", Severity::Major).into(),
        Remark::new("Keys at reception", "access").into(),
        Permit::new("hot-work").into(),
    ];

    for item in items {
        let collection = item.collection();
        let before = lifecycle.get_work_order(id).await.unwrap();

        let added = lifecycle.add_sub_item(&user, id, item).await.unwrap();
        let ids = added.sub_item_ids(collection);
        assert_eq!(ids.len(), before.sub_item_ids(collection).len() + 1);
        let new_item = *ids.last().unwrap();

        let removed = lifecycle
            .remove_sub_item(&user, id, collection, new_item)
            .await
            .unwrap();
        assert_eq!(removed.sub_item_ids(collection), before.sub_item_ids(collection));
    }
}

#[tokio::test]
async fn add_material_scenario_stamps_caller() {
    let (_, lifecycle) = memory_lifecycle();
    let id = lifecycle
        .create_work_order(&Caller::anonymous(), NewWorkOrder::new("WO-3", "Pour slab"))
        .await
        .unwrap()
        .id
        .unwrap();

    let wo = lifecycle
        .add_sub_item(
            &Caller::new("site-lead"),
            id,
            MaterialAssignment::purchasable("Cement", 40.0).into(),
        )
        .await
        .unwrap();
    assert_eq!(wo.materials.len(), 1);
    assert_eq!(wo.materials[0].assigned_by, "site-lead");

    let wo = lifecycle
        .add_sub_item(
            &Caller::anonymous(),
            id,
            MaterialAssignment::purchasable("Sand", 10.0).into(),
        )
        .await
        .unwrap();
    assert_eq!(wo.materials[1].assigned_by, "system");
    assert_ne!(wo.materials[0].id, wo.materials[1].id);
}

#[tokio::test]
async fn invalid_sub_item_is_rejected_before_store_access() {
    let mut store = MockStore::new();
    store.expect_get().times(0);
    store.expect_put().times(0);
    let lifecycle = WorkOrderLifecycle::new(Arc::new(store), LifecycleConfig::default());

    let err = lifecycle
        .add_sub_item(&Caller::new("jdoe"), new_id(), Task::new("").into())
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "validation_failed");
}

#[tokio::test]
async fn update_missing_item_does_not_write() {
    let wo = stored_work_order(WorkOrderStatus::Pending);
    let id = wo.id.unwrap();
    let lifecycle = read_only_lifecycle(wo);

    let rename = patch(json!({ "title": "Renamed" }));
    let err = lifecycle
        .update_sub_item(&Caller::new("jdoe"), id, Collection::Tasks, new_id(), &rename)
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn update_with_protected_attribute_does_not_write() {
    let wo = stored_work_order(WorkOrderStatus::Pending);
    let id = wo.id.unwrap();
    let task_id = wo.tasks[0].id.unwrap();
    let lifecycle = read_only_lifecycle(wo);

    let reparent = patch(json!({ "workOrderId": new_id() }));
    let err = lifecycle
        .update_sub_item(&Caller::new("jdoe"), id, Collection::Tasks, task_id, &reparent)
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "validation_failed");
}

#[tokio::test]
async fn patch_failing_validation_does_not_write() {
    let mut wo = stored_work_order(WorkOrderStatus::InProgress);
    let mut cement = MaterialAssignment::purchasable("Cement", 20.0);
    cement.id = Some(new_id());
    wo.materials.push(cement);
    let id = wo.id.unwrap();
    let task_id = wo.tasks[0].id.unwrap();
    let material_id = wo.materials[0].id.unwrap();
    let lifecycle = read_only_lifecycle(wo);
    let user = Caller::new("jdoe");

    let blank_title = patch(json!({ "title": "" }));
    let err = lifecycle
        .update_sub_item(&user, id, Collection::Tasks, task_id, &blank_title)
        .await
        .unwrap_err();
    match err {
        WoError::Validation(errors) => assert!(errors.has_error("title")),
        other => panic!("unexpected error: {other}"),
    }

    let no_cement = patch(json!({
        "material": { "materialType": "purchasable", "name": "Cement", "quantity": 0.0 }
    }));
    let err = lifecycle
        .update_sub_item(&user, id, Collection::Materials, material_id, &no_cement)
        .await
        .unwrap_err();
    match err {
        WoError::Validation(errors) => assert!(errors.has_error("quantity")),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn forged_audit_fields_do_not_write() {
    let wo = stored_work_order(WorkOrderStatus::Pending);
    let id = wo.id.unwrap();
    let task_id = wo.tasks[0].id.unwrap();
    let lifecycle = read_only_lifecycle(wo);

    let forged = patch(json!({ "createdBy": "mallory", "createdDate": null }));
    let err = lifecycle
        .update_sub_item(&Caller::new("mallory"), id, Collection::Tasks, task_id, &forged)
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "validation_failed");
}

#[tokio::test]
async fn collection_edits_record_last_modifier() {
    let (store, lifecycle) = memory_lifecycle();
    let id = lifecycle
        .create_work_order(&Caller::new("planner"), NewWorkOrder::new("WO-6", "Reglaze"))
        .await
        .unwrap()
        .id
        .unwrap();
    let lead = Caller::new("lead");

    let wo = lifecycle.add_sub_item(&lead, id, Task::new("a").into()).await.unwrap();
    let task_id = wo.tasks[0].id.unwrap();
    let wo = lifecycle
        .update_sub_item(&lead, id, Collection::Tasks, task_id, &patch(json!({ "title": "b" })))
        .await
        .unwrap();
    assert_eq!(wo.details.last_modified_by.as_deref(), Some("lead"));
    assert!(wo.details.last_modified_at.is_some());
    assert_eq!(wo.details.created_by, "planner");

    let wo = lifecycle
        .remove_sub_item(&Caller::new("auditor"), id, Collection::Tasks, task_id)
        .await
        .unwrap();
    assert_eq!(wo.details.last_modified_by.as_deref(), Some("auditor"));
    assert_eq!(store.get(id).await.unwrap().unwrap(), wo);
}

#[tokio::test]
async fn remove_missing_item_is_a_no_op() {
    let wo = stored_work_order(WorkOrderStatus::Pending);
    let id = wo.id.unwrap();
    let lifecycle = read_only_lifecycle(wo.clone());

    let returned = lifecycle
        .remove_sub_item(&Caller::new("jdoe"), id, Collection::Tasks, new_id())
        .await
        .unwrap();
    assert_eq!(returned, wo);
}

#[tokio::test]
async fn unknown_work_order_is_not_found() {
    let mut store = MockStore::new();
    store.expect_get().returning(|_| Ok(None));
    store.expect_put().times(0);
    let lifecycle = WorkOrderLifecycle::new(Arc::new(store), LifecycleConfig::default());
    let id = new_id();

    let user = Caller::new("jdoe");

    let err = lifecycle.update_status(id, WorkOrderStatus::InProgress).await.unwrap_err();
    assert!(err.is_not_found());
    assert!(lifecycle
        .add_sub_item(&Caller::new("jdoe"), id, Task::new("Check").into())
        .await
        .unwrap_err()
        .is_not_found());
    let err = lifecycle
        .remove_sub_item(&user, id, Collection::Permits, new_id())
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn store_failure_is_propagated() {
    let wo = stored_work_order(WorkOrderStatus::Pending);
    let id = wo.id.unwrap();
    let mut store = MockStore::new();
    store.expect_get().returning(move |_| Ok(Some(wo.clone())));
    store
        .expect_put()
        .times(1)
        .returning(|_, _| Err(WoError::Store("disk full".into())));
    let lifecycle = WorkOrderLifecycle::new(Arc::new(store), LifecycleConfig::default());

    let err = lifecycle.update_status(id, WorkOrderStatus::InProgress).await.unwrap_err();
    assert_eq!(err.error_code(), "store_error");
}

#[tokio::test]
async fn concurrent_writer_is_detected() {
    let (store, lifecycle) = memory_lifecycle();
    let id = lifecycle
        .create_work_order(&Caller::new("jdoe"), NewWorkOrder::new("WO-4", "Rewire panel"))
        .await
        .unwrap()
        .id
        .unwrap();

    let stale = store.get(id).await.unwrap().unwrap();
    lifecycle
        .add_sub_item(&Caller::new("jdoe"), id, Task::new("Label breakers").into())
        .await
        .unwrap();

    let err = store.put(id, stale).await.unwrap_err();
    assert!(err.is_conflict());
    assert_eq!(store.get(id).await.unwrap().unwrap().tasks.len(), 1);
}

#[tokio::test]
async fn referenced_client_material_cannot_be_deleted() {
    let work_orders = Arc::new(MemoryWorkOrderStore::new());
    let catalogue = Arc::new(MemoryClientMaterialStore::new());
    let lifecycle = WorkOrderLifecycle::new(work_orders.clone(), LifecycleConfig::default());
    let materials = ClientMaterialService::new(work_orders.clone(), catalogue);
    let user = Caller::new("jdoe");

    let cm = materials.create(ClientMaterial::new("CM-CABLE", "Armoured cable")).await.unwrap();
    let cm_id = cm.id.unwrap();
    let id = lifecycle
        .create_work_order(&user, NewWorkOrder::new("WO-5", "Run feeder"))
        .await
        .unwrap()
        .id
        .unwrap();
    let wo = lifecycle
        .add_sub_item(&user, id, MaterialAssignment::receivable(cm_id, 50.0).into())
        .await
        .unwrap();
    let before = work_orders.list().await.unwrap();

    let err = materials.delete(cm_id).await.unwrap_err();
    assert!(err.is_conflict());
    assert!(err.to_string().contains("WO-5"));
    assert_eq!(materials.list().await.unwrap(), vec![cm]);
    assert_eq!(work_orders.list().await.unwrap(), before);

    let material_id = wo.materials[0].id.unwrap();
    lifecycle
        .remove_sub_item(&user, id, Collection::Materials, material_id)
        .await
        .unwrap();
    materials.delete(cm_id).await.unwrap();
    assert!(materials.list().await.unwrap().is_empty());
}
