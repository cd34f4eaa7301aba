//! Order store: the [`ActorEntity`](crate::framework::ActorEntity) implementation for
//! [`Order`], its actions, errors, and runtime context.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::catalog::Catalog;
use crate::clients::OrderClient;
use crate::clock::Clock;
use crate::config::PosConfig;
use crate::framework::ResourceActor;
use crate::model::Order;
use crate::pricing::PricingEngine;
use std::sync::Arc;

/// Dependencies injected into the order actor (and shared with composers).
#[derive(Clone)]
pub struct OrderContext {
    pub catalog: Arc<dyn Catalog>,
    pub clock: Arc<dyn Clock>,
    pub pricing: PricingEngine,
    /// Estimate used when no line carries its own.
    pub default_prep_minutes: u32,
}

impl OrderContext {
    pub fn new(catalog: Arc<dyn Catalog>, clock: Arc<dyn Clock>, config: &PosConfig) -> Self {
        Self {
            catalog,
            clock,
            pricing: PricingEngine::new(config.tax_rate),
            default_prep_minutes: config.default_prep_minutes,
        }
    }
}

/// Creates a new Order actor and its client.
pub fn new(mailbox_capacity: usize) -> (ResourceActor<Order>, OrderClient) {
    let (actor, generic_client) = ResourceActor::new(mailbox_capacity);
    (actor, OrderClient::new(generic_client))
}
