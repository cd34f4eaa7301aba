//! # Staff Terminal
//!
//! The entry point a logged-in staff member works through. Every operation checks the
//! member's role against the [`AccessPolicy`] first; a denied request never reaches the
//! store.

use crate::access::{AccessPolicy, Capability, Role};
use crate::catalog::{Catalog, CatalogFilter};
use crate::clients::OrderClient;
use crate::composer::OrderComposer;
use crate::framework::Versioned;
use crate::kitchen::{KitchenBoard, KitchenScheduler, KitchenTicket};
use crate::model::{LineOp, MenuItem, Order, OrderFilter, OrderId, PaymentMethod};
use crate::order_actor::{OrderContext, OrderError};
use crate::status::OrderStatus;
use std::sync::Arc;
use tracing::{instrument, warn};

#[derive(Clone)]
pub struct StaffTerminal {
    role: Role,
    policy: Arc<AccessPolicy>,
    orders: OrderClient,
    kitchen: KitchenScheduler,
    ctx: OrderContext,
}

impl StaffTerminal {
    pub fn new(
        role: Role,
        policy: Arc<AccessPolicy>,
        orders: OrderClient,
        kitchen: KitchenScheduler,
        ctx: OrderContext,
    ) -> Self {
        Self {
            role,
            policy,
            orders,
            kitchen,
            ctx,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    fn require(&self, capability: Capability) -> Result<(), OrderError> {
        self.policy.authorize(self.role, capability).map_err(|denied| {
            warn!(role = %denied.role, capability = %denied.capability, "Access denied");
            OrderError::from(denied)
        })
    }

    pub fn browse_menu(&self, filter: &CatalogFilter) -> Result<Vec<MenuItem>, OrderError> {
        self.require(Capability::BrowseMenu)?;
        Ok(self.ctx.catalog.list_available_items(filter))
    }

    /// Starts a new draft.
    pub fn compose_order(&self) -> Result<OrderComposer, OrderError> {
        self.require(Capability::ComposeOrder)?;
        Ok(OrderComposer::new(self.ctx.clone()))
    }

    #[instrument(skip(self, composer), fields(role = %self.role))]
    pub async fn submit(&self, composer: &mut OrderComposer) -> Result<OrderId, OrderError> {
        self.require(Capability::ComposeOrder)?;
        composer.submit_to(&self.orders).await
    }

    #[instrument(skip(self), fields(role = %self.role))]
    pub async fn get_order(&self, id: OrderId) -> Result<Versioned<Order>, OrderError> {
        self.require(Capability::ViewOrders)?;
        self.orders.get_order(id).await
    }

    #[instrument(skip(self), fields(role = %self.role))]
    pub async fn list_orders(&self, filter: &OrderFilter) -> Result<Vec<Versioned<Order>>, OrderError> {
        self.require(Capability::ViewOrders)?;
        self.orders.list_orders(filter).await
    }

    #[instrument(skip(self), fields(role = %self.role))]
    pub async fn transition_status(
        &self,
        id: OrderId,
        to: OrderStatus,
        expected_version: u64,
    ) -> Result<Versioned<Order>, OrderError> {
        self.require(Capability::for_transition(to))?;
        self.orders.transition_status(id, to, expected_version).await
    }

    #[instrument(skip(self, ops), fields(role = %self.role))]
    pub async fn update_line_items(
        &self,
        id: OrderId,
        ops: Vec<LineOp>,
        expected_version: u64,
    ) -> Result<Versioned<Order>, OrderError> {
        self.require(Capability::EditOrder)?;
        self.orders.update_line_items(id, ops, expected_version).await
    }

    #[instrument(skip(self), fields(role = %self.role))]
    pub async fn mark_paid(
        &self,
        id: OrderId,
        method: PaymentMethod,
        expected_version: u64,
    ) -> Result<Versioned<Order>, OrderError> {
        self.require(Capability::TakePayment)?;
        self.orders.mark_paid(id, method, expected_version).await
    }

    #[instrument(skip(self), fields(role = %self.role))]
    pub async fn delete_order(&self, id: OrderId) -> Result<Versioned<Order>, OrderError> {
        self.require(Capability::DeleteOrder)?;
        self.orders.delete_order(id).await
    }

    #[instrument(skip(self), fields(role = %self.role))]
    pub async fn kitchen_queue(&self, status: OrderStatus) -> Result<Vec<KitchenTicket>, OrderError> {
        self.require(Capability::ViewKitchenQueue)?;
        self.kitchen.queue_for(status).await
    }

    #[instrument(skip(self), fields(role = %self.role))]
    pub async fn kitchen_board(&self) -> Result<KitchenBoard, OrderError> {
        self.require(Capability::ViewKitchenQueue)?;
        self.kitchen.board().await
    }

    #[instrument(skip(self), fields(role = %self.role))]
    pub async fn overdue_count(&self) -> Result<usize, OrderError> {
        self.require(Capability::ViewKitchenQueue)?;
        self.kitchen.overdue_count().await
    }
}
