//! Status transition policy for work orders
//!
//! | from                               | allowed targets                  |
//! |------------------------------------|----------------------------------|
//! | pending                            | in-progress, cancelled           |
//! | in-progress                        | on-hold, completed, cancelled    |
//! | on-hold                            | in-progress, cancelled           |
//! | completed                          | in-progress                      |
//! | cancelled                          | pending                          |
//! | closed-with-final-approval-pending | (terminal)                       |

use wo_core::error::WoError;
use wo_core::result::WoResult;
use wo_models::WorkOrderStatus;

use WorkOrderStatus::*;

/// Decides which status changes are legal
pub trait TransitionPolicy: Send + Sync {
    /// Targets reachable from `from` in one step
    fn allowed_transitions(&self, from: WorkOrderStatus) -> &'static [WorkOrderStatus];

    fn can_transition_to(&self, current: WorkOrderStatus, target: WorkOrderStatus) -> bool {
        self.allowed_transitions(current).contains(&target)
    }

    /// `InvalidTransition` unless the move is in the table
    fn check_transition(&self, current: WorkOrderStatus, target: WorkOrderStatus) -> WoResult<()> {
        if self.can_transition_to(current, target) {
            return Ok(());
        }
        let allowed = self.allowed_transitions(current);
        Err(WoError::InvalidTransition {
            from: current.to_string(),
            to: target.to_string(),
            allowed: if allowed.is_empty() {
                "none".to_string()
            } else {
                allowed
                    .iter()
                    .map(WorkOrderStatus::as_str)
                    .collect::<Vec<_>>()
                    .join(", ")
            },
        })
    }
}

/// The fixed work order workflow
#[derive(Debug, Clone, Copy, Default)]
pub struct WorkOrderWorkflow;

impl TransitionPolicy for WorkOrderWorkflow {
    fn allowed_transitions(&self, from: WorkOrderStatus) -> &'static [WorkOrderStatus] {
        match from {
            Pending => &[InProgress, Cancelled],
            InProgress => &[OnHold, Completed, Cancelled],
            OnHold => &[InProgress, Cancelled],
            Completed => &[InProgress],
            Cancelled => &[Pending],
            ClosedWithFinalApprovalPending => &[],
        }
    }
}

/// Shorthand for the fixed workflow
pub fn can_transition_to(current: WorkOrderStatus, target: WorkOrderStatus) -> bool {
    WorkOrderWorkflow.can_transition_to(current, target)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALLOWED: &[(WorkOrderStatus, WorkOrderStatus)] = &[
        (Pending, InProgress),
        (Pending, Cancelled),
        (InProgress, OnHold),
        (InProgress, Completed),
        (InProgress, Cancelled),
        (OnHold, InProgress),
        (OnHold, Cancelled),
        (Completed, InProgress),
        (Cancelled, Pending),
    ];

    #[test]
    fn test_full_grid() {
        for from in WorkOrderStatus::ALL {
            for to in WorkOrderStatus::ALL {
                let expected = ALLOWED.contains(&(from, to));
                assert_eq!(
                    can_transition_to(from, to),
                    expected,
                    "{} -> {} should be {}",
                    from,
                    to,
                    expected
                );
            }
        }
    }

    #[test]
    fn test_self_transitions_rejected() {
        for status in WorkOrderStatus::ALL {
            assert!(!can_transition_to(status, status));
        }
    }

    #[test]
    fn test_final_approval_is_terminal() {
        assert!(WorkOrderWorkflow
            .allowed_transitions(ClosedWithFinalApprovalPending)
            .is_empty());
        let err = WorkOrderWorkflow
            .check_transition(ClosedWithFinalApprovalPending, InProgress)
            .unwrap_err();
        assert!(err.to_string().contains("allowed: none"));
    }

    #[test]
    fn test_check_transition_message() {
        let err = WorkOrderWorkflow.check_transition(InProgress, Pending).unwrap_err();
        match err {
            WoError::InvalidTransition { from, to, allowed } => {
                assert_eq!(from, "in-progress");
                assert_eq!(to, "pending");
                assert_eq!(allowed, "on-hold, completed, cancelled");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(WorkOrderWorkflow.check_transition(Pending, InProgress).is_ok());
    }
}
