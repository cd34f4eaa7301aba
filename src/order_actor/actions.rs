//! Custom actions for the Order actor.
//!
//! Once submitted, an [`Order`](crate::model::Order) only changes through these
//! actions. Each one carries the version the caller last read; see
//! [`OrderClient`](crate::clients::OrderClient) for the versioned entry points.

use crate::model::{LineOp, PaymentMethod};
use crate::status::OrderStatus;

#[derive(Debug, Clone, PartialEq)]
pub enum OrderAction {
    /// Moves the order through the status state machine.
    ///
    /// First entry into `in-progress` stamps `started_at`.
    Transition(OrderStatus),
    /// Edits lines while the order is still pending. Applied all-or-nothing.
    UpdateLines(Vec<LineOp>),
    /// Records payment. Rejected for cancelled or already-paid orders.
    MarkPaid(PaymentMethod),
}
