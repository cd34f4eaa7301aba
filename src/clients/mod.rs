//! Type-safe wrappers around [`ResourceClient`](crate::framework::ResourceClient), plus
//! the role-checked [`StaffTerminal`] front door.

pub mod actor_client;
pub mod order_client;
pub mod terminal;

pub use actor_client::*;
pub use order_client::*;
pub use terminal::*;
