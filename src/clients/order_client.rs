//! # Order Client
//!
//! High-level API for the order store. Every write takes the version the caller last
//! read and fails with [`OrderError::ConcurrentModification`] if someone else got there
//! first.

use crate::clients::actor_client::ActorClient;
use crate::framework::{FrameworkError, ResourceClient, Versioned};
use crate::model::{LineOp, Order, OrderCreate, OrderFilter, OrderId, PaymentMethod};
use crate::order_actor::{OrderAction, OrderError};
use crate::status::OrderStatus;
use async_trait::async_trait;
use tracing::{debug, info, instrument};

/// Client for interacting with the Order actor.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, params))]
    pub async fn create_order(&self, params: OrderCreate) -> Result<OrderId, OrderError> {
        debug!(?params, "create_order called");
        info!("Sending create_order to actor");
        self.inner.create(params).await.map_err(OrderError::from)
    }

    /// Like [`ActorClient::get`], but a missing order is an error.
    #[instrument(skip(self))]
    pub async fn get_order(&self, id: OrderId) -> Result<Versioned<Order>, OrderError> {
        self.get(id)
            .await?
            .ok_or_else(|| OrderError::NotFound(id.to_string()))
    }

    #[instrument(skip(self))]
    pub async fn transition_status(
        &self,
        id: OrderId,
        to: OrderStatus,
        expected_version: u64,
    ) -> Result<Versioned<Order>, OrderError> {
        self.perform(id, expected_version, OrderAction::Transition(to))
            .await
    }

    #[instrument(skip(self, ops))]
    pub async fn update_line_items(
        &self,
        id: OrderId,
        ops: Vec<LineOp>,
        expected_version: u64,
    ) -> Result<Versioned<Order>, OrderError> {
        debug!(?ops, "update_line_items called");
        self.perform(id, expected_version, OrderAction::UpdateLines(ops))
            .await
    }

    #[instrument(skip(self))]
    pub async fn mark_paid(
        &self,
        id: OrderId,
        method: PaymentMethod,
        expected_version: u64,
    ) -> Result<Versioned<Order>, OrderError> {
        self.perform(id, expected_version, OrderAction::MarkPaid(method))
            .await
    }

    /// Removes a served or cancelled order.
    #[instrument(skip(self))]
    pub async fn delete_order(&self, id: OrderId) -> Result<Versioned<Order>, OrderError> {
        self.delete(id).await
    }

    /// Orders matching `filter`, in submission order.
    #[instrument(skip(self))]
    pub async fn list_orders(&self, filter: &OrderFilter) -> Result<Vec<Versioned<Order>>, OrderError> {
        let mut orders = self.list().await?;
        orders.retain(|order| filter.matches(order));
        Ok(orders)
    }

    async fn perform(
        &self,
        id: OrderId,
        expected_version: u64,
        action: OrderAction,
    ) -> Result<Versioned<Order>, OrderError> {
        self.inner
            .perform_action(id, expected_version, action)
            .await
            .map_err(OrderError::from)
    }
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError<OrderError>) -> Self::Error {
        OrderError::from(e)
    }
}
