//! Error types for the Order actor.

use crate::access::{AccessDenied, Capability, Role};
use crate::catalog::CatalogError;
use crate::framework::FrameworkError;
use crate::model::ValidationError;
use crate::status::{IllegalTransition, OrderStatus};
use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// Composition or line-edit input was rejected.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("Illegal transition: {from} -> {to}")]
    IllegalTransition { from: OrderStatus, to: OrderStatus },

    /// The caller's version is stale. Re-read and retry.
    #[error("Concurrent modification of {id}: expected version {expected}, found {actual}")]
    ConcurrentModification {
        id: String,
        expected: u64,
        actual: u64,
    },

    /// Lines are frozen once the kitchen has started.
    #[error("Order {id} is locked in status {status}")]
    OrderLocked { id: String, status: OrderStatus },

    #[error("Order {id} is not finished (status {status})")]
    NotTerminal { id: String, status: OrderStatus },

    #[error("Payment rejected: {0}")]
    PaymentRejected(String),

    #[error("Order not found: {0}")]
    NotFound(String),

    #[error("Duplicate order id: {0}")]
    DuplicateId(String),

    #[error("Order ids exhausted")]
    IdsExhausted,

    #[error("Role {role} may not {capability}")]
    Forbidden { role: Role, capability: Capability },

    #[error("Status {0} has no kitchen queue")]
    NotKitchenStatus(OrderStatus),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<IllegalTransition> for OrderError {
    fn from(e: IllegalTransition) -> Self {
        OrderError::IllegalTransition {
            from: e.from,
            to: e.to,
        }
    }
}

impl From<AccessDenied> for OrderError {
    fn from(e: AccessDenied) -> Self {
        OrderError::Forbidden {
            role: e.role,
            capability: e.capability,
        }
    }
}

impl From<FrameworkError<OrderError>> for OrderError {
    fn from(e: FrameworkError<OrderError>) -> Self {
        match e {
            FrameworkError::Entity(inner) => inner,
            FrameworkError::NotFound(id) => OrderError::NotFound(id),
            FrameworkError::DuplicateId(id) => OrderError::DuplicateId(id),
            FrameworkError::IdsExhausted => OrderError::IdsExhausted,
            FrameworkError::ConcurrentModification {
                id,
                expected,
                actual,
            } => OrderError::ConcurrentModification {
                id,
                expected,
                actual,
            },
            e @ (FrameworkError::ActorClosed | FrameworkError::ActorDropped) => {
                OrderError::ActorCommunicationError(e.to_string())
            }
        }
    }
}
