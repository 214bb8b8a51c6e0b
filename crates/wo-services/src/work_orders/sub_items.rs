//! Collection edits on a work order copy
//!
//! These functions only touch the aggregate they are handed; persisting it
//! is up to the caller.

use chrono::{DateTime, Utc};
use wo_core::error::WoError;
use wo_core::result::WoResult;
use wo_core::traits::{new_id, Id};
use wo_models::{
    Collection, Issue, MaterialAssignment, Permit, Remark, SubItem, SubItemRecord, Task,
    WorkOrder, WorkOrderItem,
};

use crate::patch::{merge_patch, SubItemPatch};

/// Append `item` to its collection and return the id it was given
pub(crate) fn append(
    work_order: &mut WorkOrder,
    work_order_id: Id,
    item: SubItem,
    actor: &str,
    at: DateTime<Utc>,
) -> Id {
    match item {
        SubItem::Items(r) => push(work_order, work_order_id, r, actor, at),
        SubItem::Materials(r) => push(work_order, work_order_id, r, actor, at),
        SubItem::Tasks(r) => push(work_order, work_order_id, r, actor, at),
        SubItem::Issues(r) => push(work_order, work_order_id, r, actor, at),
        SubItem::Remarks(r) => push(work_order, work_order_id, r, actor, at),
        SubItem::Permits(r) => push(work_order, work_order_id, r, actor, at),
    }
}

/// Merge `patch` into the entry `item_id` and return the merged entry
pub(crate) fn replace(
    work_order: &mut WorkOrder,
    collection: Collection,
    item_id: Id,
    patch: &SubItemPatch,
    actor: &str,
    at: DateTime<Utc>,
) -> WoResult<SubItem> {
    match collection {
        Collection::Items => {
            replace_in::<WorkOrderItem>(work_order, item_id, patch, actor, at).map(SubItem::from)
        }
        Collection::Materials => {
            replace_in::<MaterialAssignment>(work_order, item_id, patch, actor, at)
                .map(SubItem::from)
        }
        Collection::Tasks => {
            replace_in::<Task>(work_order, item_id, patch, actor, at).map(SubItem::from)
        }
        Collection::Issues => {
            replace_in::<Issue>(work_order, item_id, patch, actor, at).map(SubItem::from)
        }
        Collection::Remarks => {
            replace_in::<Remark>(work_order, item_id, patch, actor, at).map(SubItem::from)
        }
        Collection::Permits => {
            replace_in::<Permit>(work_order, item_id, patch, actor, at).map(SubItem::from)
        }
    }
}

/// Drop every entry with `item_id` from the collection
pub(crate) fn remove(work_order: &mut WorkOrder, collection: Collection, item_id: Id) {
    match collection {
        Collection::Items => retain_others::<WorkOrderItem>(work_order, item_id),
        Collection::Materials => retain_others::<MaterialAssignment>(work_order, item_id),
        Collection::Tasks => retain_others::<Task>(work_order, item_id),
        Collection::Issues => retain_others::<Issue>(work_order, item_id),
        Collection::Remarks => retain_others::<Remark>(work_order, item_id),
        Collection::Permits => retain_others::<Permit>(work_order, item_id),
    }
}

fn push<T: SubItemRecord>(
    work_order: &mut WorkOrder,
    work_order_id: Id,
    mut record: T,
    actor: &str,
    at: DateTime<Utc>,
) -> Id {
    let item_id = new_id();
    record.set_id(item_id);
    record.set_work_order_id(work_order_id);
    record.set_work_order_number(&work_order.details.number);
    record.stamp_created(actor, at);
    T::collection_mut(work_order).push(record);
    item_id
}

fn replace_in<T: SubItemRecord>(
    work_order: &mut WorkOrder,
    item_id: Id,
    patch: &SubItemPatch,
    actor: &str,
    at: DateTime<Utc>,
) -> WoResult<T> {
    let entries = T::collection_mut(work_order);
    let index = entries
        .iter()
        .position(|r| r.id() == Some(item_id))
        .ok_or_else(|| WoError::not_found(T::COLLECTION.entity_name(), "id", item_id))?;

    let mut merged = merge_patch(&entries[index], patch)?;
    merged.stamp_modified(actor, at);
    entries[index] = merged.clone();
    Ok(merged)
}

fn retain_others<T: SubItemRecord>(work_order: &mut WorkOrder, item_id: Id) {
    T::collection_mut(work_order).retain(|r| r.id() != Some(item_id));
}
