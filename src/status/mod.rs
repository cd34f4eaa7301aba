//! Order status state machine.
//!
//! ```text
//! composing ──▶ pending ──▶ in-progress ──▶ ready ──▶ served
//!                  ▲  │          │
//!                  └──┼──────────┘ (pause)
//!                     ▼          ▼
//!                   cancelled ◀──┘
//! ```
//!
//! `served` and `cancelled` are terminal. Self-transitions are rejected.

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    Composing,
    Pending,
    InProgress,
    Ready,
    #[serde(alias = "completed")]
    Served,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 6] = [
        OrderStatus::Composing,
        OrderStatus::Pending,
        OrderStatus::InProgress,
        OrderStatus::Ready,
        OrderStatus::Served,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Composing => "composing",
            OrderStatus::Pending => "pending",
            OrderStatus::InProgress => "in-progress",
            OrderStatus::Ready => "ready",
            OrderStatus::Served => "served",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Served | OrderStatus::Cancelled)
    }

    /// Statuses that show up on the kitchen board.
    pub fn is_kitchen_visible(&self) -> bool {
        matches!(
            self,
            OrderStatus::Pending | OrderStatus::InProgress | OrderStatus::Ready
        )
    }

    /// Lines may only change before the kitchen has picked the order up.
    pub fn allows_line_edits(&self) -> bool {
        matches!(self, OrderStatus::Composing | OrderStatus::Pending)
    }

    pub fn can_transition_to(&self, to: OrderStatus) -> bool {
        can_transition(*self, to)
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("Illegal transition: {from} -> {to}")]
pub struct IllegalTransition {
    pub from: OrderStatus,
    pub to: OrderStatus,
}

/// Every status reachable from `from` in one step.
pub fn next_states(from: OrderStatus) -> &'static [OrderStatus] {
    use OrderStatus::*;
    match from {
        Composing => &[Pending],
        Pending => &[InProgress, Cancelled],
        InProgress => &[Ready, Pending, Cancelled],
        Ready => &[Served],
        Served | Cancelled => &[],
    }
}

pub fn can_transition(from: OrderStatus, to: OrderStatus) -> bool {
    next_states(from).contains(&to)
}

pub fn transition(from: OrderStatus, to: OrderStatus) -> Result<OrderStatus, IllegalTransition> {
    if can_transition(from, to) {
        Ok(to)
    } else {
        Err(IllegalTransition { from, to })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use OrderStatus::*;

    #[test]
    fn allowed_edges() {
        let allowed = [
            (Composing, Pending),
            (Pending, InProgress),
            (InProgress, Ready),
            (Ready, Served),
            (InProgress, Pending),
            (Pending, Cancelled),
            (InProgress, Cancelled),
        ];

        for from in OrderStatus::ALL {
            for to in OrderStatus::ALL {
                let expected = allowed.contains(&(from, to));
                assert_eq!(
                    can_transition(from, to),
                    expected,
                    "{from} -> {to} should be {}",
                    if expected { "allowed" } else { "rejected" }
                );
            }
        }
    }

    #[test]
    fn pending_cannot_skip_to_ready() {
        assert!(!can_transition(Pending, Ready));
        assert!(can_transition(Pending, InProgress));
        assert_eq!(
            transition(Pending, Ready),
            Err(IllegalTransition {
                from: Pending,
                to: Ready
            })
        );
    }

    #[test]
    fn terminal_states_are_dead_ends() {
        for status in [Served, Cancelled] {
            assert!(status.is_terminal());
            assert!(next_states(status).is_empty());
        }
        assert!(!Ready.is_terminal());
    }

    #[test]
    fn self_transitions_are_rejected() {
        for status in OrderStatus::ALL {
            assert!(transition(status, status).is_err());
        }
    }

    #[test]
    fn kitchen_and_edit_windows() {
        let kitchen: Vec<_> = OrderStatus::ALL
            .into_iter()
            .filter(OrderStatus::is_kitchen_visible)
            .collect();
        assert_eq!(kitchen, vec![Pending, InProgress, Ready]);

        assert!(Composing.allows_line_edits());
        assert!(Pending.allows_line_edits());
        assert!(!InProgress.allows_line_edits());
    }

    #[test]
    fn serde_names_are_kebab_case() {
        assert_eq!(serde_json::to_string(&InProgress).unwrap(), "\"in-progress\"");
        let legacy: OrderStatus = serde_json::from_str("\"completed\"").unwrap();
        assert_eq!(legacy, Served);
    }
}
