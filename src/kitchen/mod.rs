//! # Kitchen Scheduler
//!
//! Read-only view of the order store for kitchen staff. Every query takes a fresh
//! snapshot from the store and reads the injected [`Clock`] once, so tickets in one
//! response agree on "now". Nothing is cached between calls.

pub mod queue;
pub mod timing;

pub use queue::*;
pub use timing::*;

use crate::clients::{ActorClient, OrderClient};
use crate::clock::Clock;
use crate::order_actor::OrderError;
use crate::status::OrderStatus;
use std::sync::Arc;
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct KitchenScheduler {
    orders: OrderClient,
    clock: Arc<dyn Clock>,
}

impl KitchenScheduler {
    pub fn new(orders: OrderClient, clock: Arc<dyn Clock>) -> Self {
        Self { orders, clock }
    }

    /// Tickets for one kitchen column (`pending`, `in-progress` or `ready`).
    #[instrument(skip(self))]
    pub async fn queue_for(&self, status: OrderStatus) -> Result<Vec<KitchenTicket>, OrderError> {
        if !status.is_kitchen_visible() {
            return Err(OrderError::NotKitchenStatus(status));
        }
        let snapshot = self.orders.list().await?;
        let queue = build_queue(&snapshot, status, self.clock.now());
        debug!(size = queue.len(), "Queue built");
        Ok(queue)
    }

    /// In-progress orders that have run past their estimate.
    #[instrument(skip(self))]
    pub async fn overdue_count(&self) -> Result<usize, OrderError> {
        let snapshot = self.orders.list().await?;
        let now = self.clock.now();
        Ok(snapshot.iter().filter(|order| is_overdue(order, now)).count())
    }

    #[instrument(skip(self))]
    pub async fn board(&self) -> Result<KitchenBoard, OrderError> {
        let snapshot = self.orders.list().await?;
        let board = build_board(&snapshot, self.clock.now());
        debug!(stats = ?board.stats, "Board built");
        Ok(board)
    }
}
