//! Generic actor framework for keyed, versioned resource stores.
//!
//! # Main Components
//!
//! - [`ActorEntity`] - Trait that aggregates implement to be managed by an actor
//! - [`ResourceActor`] - Single-writer actor owning the store
//! - [`ResourceClient`] - Type-safe client for talking to the actor
//! - [`Versioned`] - Entity plus its optimistic-concurrency version
//! - [`FrameworkError`] - Store-level failures
//!
//! # Testing
//!
//! See [`mock`] module for utilities to test clients without spawning full actors.

pub mod core;
pub mod mock;

pub use core::*;
