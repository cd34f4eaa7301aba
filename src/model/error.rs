use crate::model::{LineId, MenuItemId};
use thiserror::Error;

/// Rejections raised while composing or editing order lines.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationError {
    #[error("Order has no lines")]
    EmptyOrder,

    #[error("Dine-in order needs a table")]
    MissingTable,

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    #[error("Invalid selection for {item}: {reason}")]
    InvalidSelection { item: MenuItemId, reason: String },

    #[error("Menu item unavailable: {0}")]
    UnavailableItem(MenuItemId),

    #[error("Line not found: {0}")]
    LineNotFound(LineId),

    #[error("No line ids left on this order")]
    LineIdsExhausted,
}
