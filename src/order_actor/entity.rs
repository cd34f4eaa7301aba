//! [`ActorEntity`] implementation for [`Order`].
//!
//! The store hands every action a copy of the order; returning an error from any
//! step below discards the copy, so no partial edit is ever committed.

use super::actions::OrderAction;
use super::{OrderContext, OrderError};
use crate::catalog::Catalog;
use crate::clock::Clock;
use crate::composer::LineEditor;
use crate::framework::ActorEntity;
use crate::model::{
    round_money, LineOp, Order, OrderCreate, OrderId, PaymentMethod, PaymentState,
    ValidationError,
};
use crate::status::{self, OrderStatus};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::debug;

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Action = OrderAction;
    type Context = OrderContext;
    type Error = OrderError;

    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, OrderError> {
        params.validate()?;
        Ok(Order::new(id, params))
    }

    /// Prices, totals and the kitchen estimate are always the store's own figures,
    /// whatever the payload claimed.
    async fn on_create(&mut self, ctx: &OrderContext) -> Result<(), OrderError> {
        for line in self.lines.iter_mut() {
            if line.quantity == 0 {
                return Err(ValidationError::InvalidQuantity(0).into());
            }
            let item = ctx.catalog.get_menu_item(line.menu_item_id)?;
            line.unit_price = ctx
                .pricing
                .unit_price(&item, &line.modifiers, line.size.as_ref())?;
            line.line_total = round_money(line.unit_price * Decimal::from(line.quantity));
        }

        let totals = ctx.pricing.totals(self.lines.as_slice());
        let estimate = self.lines.estimated_prep_minutes(ctx.default_prep_minutes);
        if totals != self.totals || estimate != self.estimated_prep_minutes {
            debug!(
                id = %self.id,
                claimed = %self.totals.total,
                computed = %totals.total,
                "Replacing submitted totals"
            );
        }
        self.totals = totals;
        self.estimated_prep_minutes = estimate;
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: OrderAction,
        ctx: &OrderContext,
    ) -> Result<(), OrderError> {
        match action {
            OrderAction::Transition(to) => self.apply_transition(to, ctx.clock.now()),
            OrderAction::UpdateLines(ops) => self.apply_line_ops(ops, ctx),
            OrderAction::MarkPaid(method) => self.mark_paid(method, ctx.clock.now()),
        }
    }

    /// Only served or cancelled orders may leave the store.
    async fn on_delete(&self, _ctx: &OrderContext) -> Result<(), OrderError> {
        if self.status.is_terminal() {
            Ok(())
        } else {
            Err(OrderError::NotTerminal {
                id: self.id.to_string(),
                status: self.status,
            })
        }
    }
}

impl Order {
    fn apply_transition(&mut self, to: OrderStatus, now: DateTime<Utc>) -> Result<(), OrderError> {
        self.status = status::transition(self.status, to)?;
        if to == OrderStatus::InProgress && self.started_at.is_none() {
            self.started_at = Some(now);
        }
        debug!(id = %self.id, status = %self.status, "Status changed");
        Ok(())
    }

    fn apply_line_ops(&mut self, ops: Vec<LineOp>, ctx: &OrderContext) -> Result<(), OrderError> {
        if !self.status.allows_line_edits() {
            return Err(OrderError::OrderLocked {
                id: self.id.to_string(),
                status: self.status,
            });
        }

        let editor = LineEditor::new(ctx.catalog.as_ref(), &ctx.pricing);
        for op in ops {
            editor.apply(&mut self.lines, op)?;
        }
        if self.lines.is_empty() {
            return Err(ValidationError::EmptyOrder.into());
        }

        self.totals = ctx.pricing.totals(self.lines.as_slice());
        self.estimated_prep_minutes = self.lines.estimated_prep_minutes(ctx.default_prep_minutes);
        Ok(())
    }

    fn mark_paid(&mut self, method: PaymentMethod, now: DateTime<Utc>) -> Result<(), OrderError> {
        if self.status == OrderStatus::Cancelled {
            return Err(OrderError::PaymentRejected(format!(
                "{} was cancelled",
                self.id
            )));
        }
        if self.payment.is_paid() {
            return Err(OrderError::PaymentRejected(format!(
                "{} is already paid",
                self.id
            )));
        }
        self.payment = PaymentState::Paid {
            method,
            paid_at: now,
        };
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{demo_menu, Catalog};
    use crate::clock::SystemClock;
    use crate::model::{Channel, LineId, LineItems, MenuItemId, OrderTotals, Priority};
    use crate::pricing::PricingEngine;
    use chrono::{Duration, TimeZone};
    use std::sync::Arc;

    fn ctx() -> OrderContext {
        OrderContext {
            catalog: Arc::new(demo_menu()) as Arc<dyn Catalog>,
            clock: Arc::new(SystemClock) as Arc<dyn Clock>,
            pricing: PricingEngine::default(),
            default_prep_minutes: 15,
        }
    }

    fn pending_order() -> Order {
        let ctx = ctx();
        let mut lines = LineItems::default();
        LineEditor::new(ctx.catalog.as_ref(), &ctx.pricing)
            .apply(&mut lines, LineOp::add(MenuItemId(1), 1))
            .unwrap();
        let totals = ctx.pricing.totals(lines.as_slice());
        Order::from_create_params(
            OrderId(1),
            OrderCreate {
                created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
                channel: Channel::Takeaway,
                table: None,
                customer: Some("Sam".to_string()),
                phone: None,
                notes: None,
                priority: Priority::Medium,
                estimated_prep_minutes: 12,
                lines,
                totals,
            },
        )
        .unwrap()
    }

    #[test]
    fn create_rejects_invalid_payload() {
        let err = Order::from_create_params(
            OrderId(1),
            OrderCreate {
                created_at: Utc::now(),
                channel: Channel::DineIn,
                table: None,
                customer: None,
                phone: None,
                notes: None,
                priority: Priority::Low,
                estimated_prep_minutes: 15,
                lines: LineItems::default(),
                totals: OrderTotals::default(),
            },
        )
        .unwrap_err();
        assert_eq!(err, OrderError::Validation(ValidationError::EmptyOrder));
    }

    #[test]
    fn started_at_is_stamped_once() {
        let mut order = pending_order();
        let t0 = Utc.with_ymd_and_hms(2024, 5, 1, 12, 5, 0).unwrap();

        order.apply_transition(OrderStatus::InProgress, t0).unwrap();
        assert_eq!(order.started_at, Some(t0));

        order
            .apply_transition(OrderStatus::Pending, t0 + Duration::minutes(3))
            .unwrap();
        order
            .apply_transition(OrderStatus::InProgress, t0 + Duration::minutes(9))
            .unwrap();
        assert_eq!(order.started_at, Some(t0));
    }

    #[test]
    fn illegal_transition_is_reported() {
        let mut order = pending_order();
        let err = order
            .apply_transition(OrderStatus::Served, Utc::now())
            .unwrap_err();
        assert_eq!(
            err,
            OrderError::IllegalTransition {
                from: OrderStatus::Pending,
                to: OrderStatus::Served
            }
        );
    }

    #[test]
    fn line_edits_lock_once_cooking() {
        let ctx = ctx();
        let mut order = pending_order();
        order
            .apply_line_ops(vec![LineOp::add(MenuItemId(2), 1)], &ctx)
            .unwrap();
        assert_eq!(order.lines.len(), 2);
        assert_eq!(order.estimated_prep_minutes, 18);
        assert_eq!(order.totals, ctx.pricing.totals(order.lines.as_slice()));

        order
            .apply_transition(OrderStatus::InProgress, Utc::now())
            .unwrap();
        let err = order
            .apply_line_ops(vec![LineOp::add(MenuItemId(3), 1)], &ctx)
            .unwrap_err();
        assert!(matches!(err, OrderError::OrderLocked { status: OrderStatus::InProgress, .. }));
    }

    #[test]
    fn line_edits_are_locked_from_in_progress_onward() {
        let ctx = ctx();
        let ops = || {
            vec![
                LineOp::add(MenuItemId(3), 1),
                LineOp::SetLineNotes {
                    line_id: LineId(1),
                    notes: Some("well done".to_string()),
                },
            ]
        };

        for status in [
            OrderStatus::InProgress,
            OrderStatus::Ready,
            OrderStatus::Served,
            OrderStatus::Cancelled,
        ] {
            let mut order = pending_order();
            order.status = status;
            let before = order.clone();

            let err = order.apply_line_ops(ops(), &ctx).unwrap_err();
            assert_eq!(
                err,
                OrderError::OrderLocked {
                    id: "order_1".to_string(),
                    status
                },
                "{status}"
            );
            assert_eq!(order, before, "{status}");
        }
    }

    #[tokio::test]
    async fn create_replaces_submitted_prices_and_estimate() {
        let ctx = ctx();
        let mut order = pending_order();
        let expected = order.clone();
        order.totals = OrderTotals {
            subtotal: crate::model::cents(1),
            tax: crate::model::cents(0),
            total: crate::model::cents(1),
        };
        order.estimated_prep_minutes = 0;
        order.lines.iter_mut().for_each(|line| {
            line.unit_price = crate::model::cents(1);
            line.line_total = crate::model::cents(1);
        });

        order.on_create(&ctx).await.unwrap();
        assert_eq!(order, expected);
        assert_eq!(order.totals.total, crate::model::cents(1403));
        assert_eq!(order.estimated_prep_minutes, 12);
    }

    #[tokio::test]
    async fn create_rejects_zero_quantity_lines() {
        let ctx = ctx();
        let mut order = pending_order();
        order.lines.iter_mut().for_each(|line| line.quantity = 0);

        assert_eq!(
            order.on_create(&ctx).await,
            Err(OrderError::Validation(ValidationError::InvalidQuantity(0)))
        );
    }

    #[test]
    fn removing_every_line_is_rejected() {
        let ctx = ctx();
        let mut order = pending_order();
        let err = order
            .apply_line_ops(
                vec![LineOp::SetQuantity {
                    line_id: LineId(1),
                    quantity: 0,
                }],
                &ctx,
            )
            .unwrap_err();
        assert_eq!(err, OrderError::Validation(ValidationError::EmptyOrder));
    }

    #[test]
    fn payment_is_recorded_once() {
        let mut order = pending_order();
        let now = Utc::now();
        order.mark_paid(PaymentMethod::Card, now).unwrap();
        assert_eq!(
            order.payment,
            PaymentState::Paid {
                method: PaymentMethod::Card,
                paid_at: now
            }
        );
        assert!(matches!(
            order.mark_paid(PaymentMethod::Cash, now),
            Err(OrderError::PaymentRejected(_))
        ));

        let mut cancelled = pending_order();
        cancelled
            .apply_transition(OrderStatus::Cancelled, now)
            .unwrap();
        assert!(matches!(
            cancelled.mark_paid(PaymentMethod::Cash, now),
            Err(OrderError::PaymentRejected(_))
        ));
    }
}
