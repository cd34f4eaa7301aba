//! Deterministic pricing for order lines and order totals.
//!
//! `unit_price = base + Σ modifier deltas + size delta`,
//! `line_total = round(unit_price × quantity)`,
//! `tax = round(subtotal × tax_rate)`, `total = subtotal + tax`.

use crate::model::{
    round_money, MenuItem, Modifier, Money, OrderLineItem, OrderTotals, SizeOption,
    ValidationError,
};
use rust_decimal::Decimal;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricingEngine {
    tax_rate: Decimal,
}

impl Default for PricingEngine {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TAX_RATE)
    }
}

impl PricingEngine {
    /// 8%.
    pub const DEFAULT_TAX_RATE: Decimal = Decimal::from_parts(8, 0, 0, false, 2);

    pub fn new(tax_rate: Decimal) -> Self {
        Self { tax_rate }
    }

    pub fn tax_rate(&self) -> Decimal {
        self.tax_rate
    }

    /// Price of one unit with the given selection.
    pub fn unit_price(
        &self,
        item: &MenuItem,
        modifiers: &[Modifier],
        size: Option<&SizeOption>,
    ) -> Result<Money, ValidationError> {
        if !item.available {
            return Err(ValidationError::UnavailableItem(item.id));
        }
        check_selection(item, modifiers, size)?;

        let deltas: Money = modifiers.iter().map(|m| m.price_delta).sum();
        let size_delta = size.map_or(Decimal::ZERO, |s| s.price_delta);
        Ok(item.base_price + deltas + size_delta)
    }

    /// Line total for `quantity` units.
    pub fn price(
        &self,
        item: &MenuItem,
        quantity: i64,
        modifiers: &[Modifier],
        size: Option<&SizeOption>,
    ) -> Result<Money, ValidationError> {
        if quantity < 1 {
            return Err(ValidationError::InvalidQuantity(quantity));
        }
        let unit = self.unit_price(item, modifiers, size)?;
        Ok(round_money(unit * Decimal::from(quantity)))
    }

    pub fn totals(&self, lines: &[OrderLineItem]) -> OrderTotals {
        let subtotal = round_money(lines.iter().map(|line| line.line_total).sum());
        let tax = round_money(subtotal * self.tax_rate);
        OrderTotals {
            subtotal,
            tax,
            total: subtotal + tax,
        }
    }

    /// Turns modifier and size names into the item's own option values.
    pub fn resolve_selection(
        &self,
        item: &MenuItem,
        modifier_names: &[&str],
        size_name: Option<&str>,
    ) -> Result<(Vec<Modifier>, Option<SizeOption>), ValidationError> {
        let modifiers = modifier_names
            .iter()
            .map(|name| {
                item.find_modifier(name)
                    .cloned()
                    .ok_or_else(|| invalid(item, format!("unknown modifier '{name}'")))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let size = size_name
            .map(|name| {
                item.find_size(name)
                    .cloned()
                    .ok_or_else(|| invalid(item, format!("unknown size '{name}'")))
            })
            .transpose()?;

        check_selection(item, &modifiers, size.as_ref())?;
        Ok((modifiers, size))
    }
}

fn check_selection(
    item: &MenuItem,
    modifiers: &[Modifier],
    size: Option<&SizeOption>,
) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for modifier in modifiers {
        if !item.modifiers.contains(modifier) {
            return Err(invalid(item, format!("modifier '{}' not offered", modifier.name)));
        }
        if !modifier.repeatable && !seen.insert(modifier.name.as_str()) {
            return Err(invalid(item, format!("modifier '{}' selected twice", modifier.name)));
        }
    }
    if let Some(size) = size {
        if !item.sizes.contains(size) {
            return Err(invalid(item, format!("size '{}' not offered", size.name)));
        }
    }
    Ok(())
}

fn invalid(item: &MenuItem, reason: String) -> ValidationError {
    ValidationError::InvalidSelection {
        item: item.id,
        reason,
    }
}
