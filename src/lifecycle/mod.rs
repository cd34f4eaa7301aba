//! Runtime orchestration: starting the order store, wiring its dependencies, handing
//! out staff terminals, and shutting everything down.

pub mod pos_system;
pub mod tracing;

pub use self::tracing::*;
pub use pos_system::*;
