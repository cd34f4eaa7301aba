//! # Order Composer
//!
//! Builds an order draft line by line before it is handed to the store.
//!
//! Totals are recomputed after every line mutation, so `draft().totals` is always
//! consistent with `draft().lines`. [`OrderComposer::submit`] validates the draft and
//! produces the [`OrderCreate`] payload; [`OrderComposer::submit_to`] hands it to the
//! store and clears the draft once the store has accepted it. A rejected submission
//! leaves the draft as it was.

pub mod lines;

pub use lines::LineEditor;

use crate::clients::OrderClient;
use crate::clock::Clock;
use crate::model::{
    validate_submission, Channel, LineId, LineItems, MenuItemId, OrderCreate, OrderId,
    OrderTotals, Priority,
};
use crate::order_actor::{OrderContext, OrderError};
use crate::status::OrderStatus;
use serde::Serialize;
use tracing::{debug, instrument};

/// An order that has not been submitted yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OrderDraft {
    pub channel: Channel,
    pub table: Option<String>,
    pub customer: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
    pub priority: Priority,
    pub lines: LineItems,
    pub totals: OrderTotals,
}

impl OrderDraft {
    pub fn status(&self) -> OrderStatus {
        OrderStatus::Composing
    }
}

pub struct OrderComposer {
    draft: OrderDraft,
    ctx: OrderContext,
}

impl OrderComposer {
    pub fn new(ctx: OrderContext) -> Self {
        Self {
            draft: OrderDraft::default(),
            ctx,
        }
    }

    pub fn draft(&self) -> &OrderDraft {
        &self.draft
    }

    /// Adds a fresh line. Modifier and size names must belong to the item.
    pub fn add_line(
        &mut self,
        menu_item_id: MenuItemId,
        quantity: i64,
        modifiers: &[&str],
        size: Option<&str>,
    ) -> Result<LineId, OrderError> {
        let editor = LineEditor::new(self.ctx.catalog.as_ref(), &self.ctx.pricing);
        let id = editor.add_line(
            &mut self.draft.lines,
            menu_item_id,
            quantity,
            modifiers,
            size,
            None,
        )?;
        self.recompute_totals();
        Ok(id)
    }

    /// Quantity `<= 0` removes the line.
    pub fn set_line_quantity(&mut self, line_id: LineId, quantity: i64) -> Result<(), OrderError> {
        lines::set_line_quantity(&mut self.draft.lines, line_id, quantity)?;
        self.recompute_totals();
        Ok(())
    }

    pub fn remove_line(&mut self, line_id: LineId) -> Result<(), OrderError> {
        lines::remove_line(&mut self.draft.lines, line_id)?;
        self.recompute_totals();
        Ok(())
    }

    pub fn set_line_notes(
        &mut self,
        line_id: LineId,
        notes: impl Into<String>,
    ) -> Result<(), OrderError> {
        lines::set_line_notes(&mut self.draft.lines, line_id, Some(notes.into()))?;
        Ok(())
    }

    pub fn set_channel(&mut self, channel: Channel) {
        self.draft.channel = channel;
    }

    pub fn set_table(&mut self, table: impl Into<String>) {
        self.draft.table = lines::normalize_text(Some(table.into()));
    }

    pub fn set_customer(&mut self, customer: impl Into<String>) {
        self.draft.customer = lines::normalize_text(Some(customer.into()));
    }

    pub fn set_phone(&mut self, phone: impl Into<String>) {
        self.draft.phone = lines::normalize_text(Some(phone.into()));
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.draft.notes = lines::normalize_text(Some(notes.into()));
    }

    pub fn set_priority(&mut self, priority: Priority) {
        self.draft.priority = priority;
    }

    /// Validates the draft and builds the store payload, stamped with the current time.
    pub fn submit(&self) -> Result<OrderCreate, OrderError> {
        let draft = &self.draft;
        validate_submission(draft.channel, draft.table.as_deref(), &draft.lines)?;

        Ok(OrderCreate {
            created_at: self.ctx.clock.now(),
            channel: draft.channel,
            table: draft.table.clone(),
            customer: draft.customer.clone(),
            phone: draft.phone.clone(),
            notes: draft.notes.clone(),
            priority: draft.priority,
            estimated_prep_minutes: draft.lines.estimated_prep_minutes(self.ctx.default_prep_minutes),
            lines: draft.lines.clone(),
            totals: draft.totals,
        })
    }

    /// Submits the draft to the store and returns the allocated id.
    ///
    /// On success the composer starts over with an empty draft, so submitting again
    /// fails with `EmptyOrder` instead of creating a second order. On failure the
    /// draft is kept for correction.
    #[instrument(skip(self, orders))]
    pub async fn submit_to(&mut self, orders: &OrderClient) -> Result<OrderId, OrderError> {
        let payload = self.submit()?;
        debug!(lines = payload.lines.len(), total = %payload.totals.total, "Submitting draft");
        let id = orders.create_order(payload).await?;
        self.draft = OrderDraft::default();
        Ok(id)
    }

    fn recompute_totals(&mut self) {
        self.draft.totals = self.ctx.pricing.totals(self.draft.lines.as_slice());
    }
}
