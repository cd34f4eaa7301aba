//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter filtered by
//! `RUST_LOG`. Module paths are hidden (`with_target(false)`); the actor tags its own
//! lines with `entity_type` instead.
//!
//! ## What Gets Traced
//!
//! - **Actor lifecycle**: `Actor started`, `Shutdown` with the final store size
//! - **Store operations**: `Created`, `Action ok`, `Deleted`, and their failures with `%id`
//!   and the committed `version`
//! - **Client calls**: `#[instrument]` spans on every `OrderClient`, `StaffTerminal` and
//!   `KitchenScheduler` method, carrying the acting `role`
//! - **Access**: `Access denied` warnings naming the role and capability
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run
//!
//! # Full payloads at entry points
//! RUST_LOG=debug cargo run
//!
//! # Store internals only
//! RUST_LOG=kitchen_orders::framework=debug cargo run
//! ```
//!
//! With `RUST_LOG=info` an order's life reads:
//!
//! ```text
//! INFO Actor started entity_type="Order"
//! INFO submit_to: create_order: Sending create_order to actor
//! INFO Created entity_type="Order" id=order_1 size=1
//! INFO transition_status{role=kitchen ...}: Action ok entity_type="Order" id=order_1 version=2
//! WARN transition_status{role=waiter ...}: Access denied role=waiter capability=MarkReady
//! ```
//!
//! `RUST_LOG=debug` adds one payload line per entry point, for example
//! `DEBUG create_order called params=OrderCreate { .. }`, plus the per-request
//! `Create` / `Action` / `List` lines from the actor.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // Don't show module paths - we use entity_type instead
        .compact()
        .init();
}
