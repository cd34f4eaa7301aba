//! # Kitchen Orders
//!
//! > **The order lifecycle and kitchen queue of a restaurant point of sale.**
//!
//! Staff compose orders from a menu catalog, submit them into a versioned order store,
//! drive them through the kitchen (`pending → in-progress → ready → served`), and watch a
//! kitchen board that orders tickets by priority and age and flags the ones running late.
//!
//! ## 🏗️ Design
//!
//! ### One writer, many readers
//! The order store is a single [`ResourceActor`](framework::ResourceActor) task. Every write
//! goes through its mailbox and carries the version the caller last read; a stale version
//! is rejected as [`ConcurrentModification`](order_actor::OrderError::ConcurrentModification),
//! never merged. Reads come back as cloned snapshots.
//!
//! ### All-or-nothing writes
//! Actions run on a copy of the stored order and are committed only on success, so a
//! batch of line edits either lands completely or not at all.
//!
//! ### Time is injected
//! Nothing ticks in the background. Elapsed, remaining and overdue figures are computed
//! on each read from a [`Clock`](clock::Clock); tests drive a
//! [`ManualClock`](clock::ManualClock).
//!
//! ### Roles at the edge
//! The store and the state machine are role-agnostic. [`StaffTerminal`](clients::StaffTerminal)
//! checks each request against an [`AccessPolicy`](access::AccessPolicy) before it is sent.
//!
//! ## 🗺️ Module Tour
//!
//! - [`framework`]: generic versioned actor, client, and mock.
//! - [`model`], [`status`]: orders, menu items, money, and the status state machine.
//! - [`pricing`], [`composer`]: line pricing, totals, and draft composition.
//! - [`order_actor`], [`clients`]: the order store and its typed clients.
//! - [`kitchen`]: queue ordering and timing.
//! - [`catalog`], [`access`], [`config`], [`clock`]: collaborators and ambient pieces.
//! - [`lifecycle`]: wiring, tracing setup, and shutdown.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! RUST_LOG=info cargo run
//! cargo test
//! ```

pub mod access;
pub mod catalog;
pub mod clients;
pub mod clock;
pub mod composer;
pub mod config;
pub mod framework;
pub mod kitchen;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod pricing;
pub mod status;
