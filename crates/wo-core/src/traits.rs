//! Core traits shared by models, contracts, stores and services

use uuid::Uuid;

/// Opaque identifier for work orders, sub-items and client materials
pub type Id = Uuid;

/// Actor recorded in audit fields when the caller has no identity
pub const SYSTEM_ACTOR: &str = "system";

/// Generate a fresh identifier
pub fn new_id() -> Id {
    Uuid::new_v4()
}

/// Trait for entities that have an identifier once persisted
pub trait Identifiable {
    fn id(&self) -> Option<Id>;
    fn is_persisted(&self) -> bool {
        self.id().is_some()
    }
    fn is_new_record(&self) -> bool {
        !self.is_persisted()
    }
}

/// Trait for lockable entities (optimistic locking)
pub trait Lockable {
    fn lock_version(&self) -> i32;
}

/// Base trait for all domain entities
pub trait Entity: Identifiable + Send + Sync {
    /// Human-readable type name for error messages
    const TYPE_NAME: &'static str;
}

/// Identity of the acting caller, used for audit fields
pub trait UserContext: Send + Sync {
    /// Login of the caller; `None` for unattended/system calls
    fn login(&self) -> Option<&str>;

    /// Login, falling back to the given default actor
    fn actor_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.login().filter(|l| !l.is_empty()).unwrap_or(default)
    }
}

/// A caller with a fixed login (or none)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Caller {
    login: Option<String>,
}

impl Caller {
    pub fn new(login: impl Into<String>) -> Self {
        Self {
            login: Some(login.into()),
        }
    }

    pub fn anonymous() -> Self {
        Self { login: None }
    }
}

impl UserContext for Caller {
    fn login(&self) -> Option<&str> {
        self.login.as_deref()
    }
}
