//! # wo-store
//!
//! Backing store layer for Work Order RS.
//!
//! The lifecycle manager only ever talks to the [`WorkOrderStore`] and
//! [`ClientMaterialStore`] traits; stores are injected, never global.
//! This crate provides:
//!
//! - The store contracts (`get`, `put`, `create`, `delete`, `list`)
//! - In-memory implementations for tests and the replay CLI
//! - Optimistic locking on `put` via the aggregate's `lock_version`
//!
//! ## Example
//!
//! ```ignore
//! use wo_store::{MemoryWorkOrderStore, WorkOrderStore};
//!
//! let store = MemoryWorkOrderStore::new();
//! let created = store.create(WorkOrder::new("WO-1", "Fix pump")).await?;
//! let fetched = store.get(created.id.unwrap()).await?;
//! ```

pub mod repository;
pub mod memory;

// Re-exports
pub use repository::{ClientMaterialStore, WorkOrderStore};
pub use memory::{MemoryClientMaterialStore, MemoryWorkOrderStore};
