//! Pure data structures for menu items, orders, and money.
//!
//! [`Order`] is the aggregate managed by the order store; see
//! [`crate::order_actor`] for its [`ActorEntity`](crate::framework::ActorEntity) implementation.

pub mod error;
pub mod menu;
pub mod money;
pub mod order;

pub use error::*;
pub use menu::*;
pub use money::*;
pub use order::*;

pub use crate::status::OrderStatus;
