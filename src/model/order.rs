use crate::model::{MenuItemId, Modifier, Money, SizeOption, ValidationError};
use crate::status::OrderStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OrderId(pub u32);

impl From<u32> for OrderId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "order_{}", self.0)
    }
}

/// Identifies a line within one order. Never reused, even after removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LineId(pub u32);

impl Display for LineId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line_{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Channel {
    #[default]
    DineIn,
    Takeaway,
    Delivery,
}

/// Kitchen urgency. Ordering is `Low < Medium < High`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentMethod {
    Cash,
    Card,
    Mobile,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "kebab-case")]
pub enum PaymentState {
    #[default]
    Unpaid,
    Paid {
        method: PaymentMethod,
        paid_at: DateTime<Utc>,
    },
}

impl PaymentState {
    pub fn is_paid(&self) -> bool {
        matches!(self, PaymentState::Paid { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLineItem {
    pub id: LineId,
    pub menu_item_id: MenuItemId,
    /// Item name at the time the line was added.
    pub name: String,
    pub quantity: u32,
    pub modifiers: Vec<Modifier>,
    pub size: Option<SizeOption>,
    pub unit_price: Money,
    pub line_total: Money,
    pub notes: Option<String>,
    pub prep_minutes: Option<u32>,
}

/// The lines of a draft or order, plus the allocator for fresh line ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItems {
    items: Vec<OrderLineItem>,
    next_line_id: u32,
}

impl Default for LineItems {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            next_line_id: 1,
        }
    }
}

impl LineItems {
    pub fn as_slice(&self) -> &[OrderLineItem] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, OrderLineItem> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, OrderLineItem> {
        self.items.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: LineId) -> Option<&OrderLineItem> {
        self.items.iter().find(|line| line.id == id)
    }

    pub fn get_mut(&mut self, id: LineId) -> Result<&mut OrderLineItem, ValidationError> {
        self.items
            .iter_mut()
            .find(|line| line.id == id)
            .ok_or(ValidationError::LineNotFound(id))
    }

    pub fn allocate_id(&mut self) -> Result<LineId, ValidationError> {
        let id = LineId(self.next_line_id);
        self.next_line_id = self
            .next_line_id
            .checked_add(1)
            .ok_or(ValidationError::LineIdsExhausted)?;
        Ok(id)
    }

    pub fn push(&mut self, line: OrderLineItem) {
        self.items.push(line);
    }

    /// Returns the removed line, if it was present.
    pub fn remove(&mut self, id: LineId) -> Option<OrderLineItem> {
        let index = self.items.iter().position(|line| line.id == id)?;
        Some(self.items.remove(index))
    }

    /// Longest per-line estimate, if any line carries one.
    pub fn max_prep_minutes(&self) -> Option<u32> {
        self.items.iter().filter_map(|line| line.prep_minutes).max()
    }

    /// Kitchen estimate for the whole order: the slowest line, else `default`.
    pub fn estimated_prep_minutes(&self, default: u32) -> u32 {
        self.max_prep_minutes()
            .filter(|minutes| *minutes > 0)
            .unwrap_or(default)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderTotals {
    pub subtotal: Money,
    pub tax: Money,
    pub total: Money,
}

/// One edit to the lines of a stored order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
pub enum LineOp {
    AddLine {
        menu_item_id: MenuItemId,
        quantity: i64,
        #[serde(default)]
        modifiers: Vec<String>,
        #[serde(default)]
        size: Option<String>,
        #[serde(default)]
        notes: Option<String>,
    },
    SetQuantity {
        line_id: LineId,
        quantity: i64,
    },
    RemoveLine {
        line_id: LineId,
    },
    SetLineNotes {
        line_id: LineId,
        notes: Option<String>,
    },
}

impl LineOp {
    /// Shorthand for adding `quantity` of an item with no options.
    pub fn add(menu_item_id: MenuItemId, quantity: i64) -> Self {
        LineOp::AddLine {
            menu_item_id,
            quantity,
            modifiers: Vec::new(),
            size: None,
            notes: None,
        }
    }
}

/// The validated payload produced by submitting a draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderCreate {
    pub created_at: DateTime<Utc>,
    pub channel: Channel,
    pub table: Option<String>,
    pub customer: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
    pub priority: Priority,
    pub estimated_prep_minutes: u32,
    pub lines: LineItems,
    pub totals: OrderTotals,
}

impl OrderCreate {
    /// Submission rules shared by the composer and the store.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_submission(self.channel, self.table.as_deref(), &self.lines)
    }
}

pub fn validate_submission(
    channel: Channel,
    table: Option<&str>,
    lines: &LineItems,
) -> Result<(), ValidationError> {
    if lines.is_empty() {
        return Err(ValidationError::EmptyOrder);
    }
    let has_table = table.is_some_and(|t| !t.trim().is_empty());
    if channel == Channel::DineIn && !has_table {
        return Err(ValidationError::MissingTable);
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub created_at: DateTime<Utc>,
    pub channel: Channel,
    pub table: Option<String>,
    pub customer: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
    pub status: OrderStatus,
    pub priority: Priority,
    pub estimated_prep_minutes: u32,
    pub started_at: Option<DateTime<Utc>>,
    pub lines: LineItems,
    pub totals: OrderTotals,
    pub payment: PaymentState,
}

impl Order {
    /// Builds a pending order from a submission.
    pub fn new(id: OrderId, params: OrderCreate) -> Self {
        Self {
            id,
            created_at: params.created_at,
            channel: params.channel,
            table: params.table,
            customer: params.customer,
            phone: params.phone,
            notes: params.notes,
            status: OrderStatus::Pending,
            priority: params.priority,
            estimated_prep_minutes: params.estimated_prep_minutes,
            started_at: None,
            lines: params.lines,
            totals: params.totals,
            payment: PaymentState::Unpaid,
        }
    }
}

/// Selection criteria for listing orders. Empty fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
    pub channel: Option<Channel>,
    /// Case-insensitive match against customer name or table.
    pub search: Option<String>,
}

impl OrderFilter {
    pub fn status(status: OrderStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn matches(&self, order: &Order) -> bool {
        if self.status.is_some_and(|s| s != order.status) {
            return false;
        }
        if self.channel.is_some_and(|c| c != order.channel) {
            return false;
        }
        match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(term) => {
                let term = term.to_lowercase();
                [order.customer.as_deref(), order.table.as_deref()]
                    .into_iter()
                    .flatten()
                    .any(|field| field.to_lowercase().contains(&term))
            }
        }
    }
}
