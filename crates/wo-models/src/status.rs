//! Work order status and the shared priority/severity scales

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle state of a work order
///
/// New work orders always start in `Pending`. Which moves are legal is
/// decided by the status transition policy in `wo-contracts`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum WorkOrderStatus {
    #[default]
    Pending,
    InProgress,
    OnHold,
    Completed,
    Cancelled,
    ClosedWithFinalApprovalPending,
}

impl WorkOrderStatus {
    pub const ALL: [WorkOrderStatus; 6] = [
        WorkOrderStatus::Pending,
        WorkOrderStatus::InProgress,
        WorkOrderStatus::OnHold,
        WorkOrderStatus::Completed,
        WorkOrderStatus::Cancelled,
        WorkOrderStatus::ClosedWithFinalApprovalPending,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in-progress",
            Self::OnHold => "on-hold",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::ClosedWithFinalApprovalPending => "closed-with-final-approval-pending",
        }
    }

    /// Whether work is finished or abandoned
    pub fn is_closed(&self) -> bool {
        matches!(
            self,
            Self::Completed | Self::Cancelled | Self::ClosedWithFinalApprovalPending
        )
    }
}

impl fmt::Display for WorkOrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Minor,
    Major,
    Critical,
}
