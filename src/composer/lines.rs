//! Line-item editing shared by the draft composer and the stored order.

use crate::catalog::Catalog;
use crate::model::{
    round_money, LineId, LineItems, LineOp, MenuItemId, OrderLineItem, ValidationError,
};
use crate::order_actor::OrderError;
use crate::pricing::PricingEngine;
use rust_decimal::Decimal;

/// Applies line edits, resolving new lines against the catalog.
pub struct LineEditor<'a> {
    catalog: &'a dyn Catalog,
    pricing: &'a PricingEngine,
}

impl<'a> LineEditor<'a> {
    pub fn new(catalog: &'a dyn Catalog, pricing: &'a PricingEngine) -> Self {
        Self { catalog, pricing }
    }

    /// Applies one op. Returns the id of the new line for `AddLine`.
    pub fn apply(&self, lines: &mut LineItems, op: LineOp) -> Result<Option<LineId>, OrderError> {
        match op {
            LineOp::AddLine {
                menu_item_id,
                quantity,
                modifiers,
                size,
                notes,
            } => {
                let names: Vec<&str> = modifiers.iter().map(String::as_str).collect();
                self.add_line(lines, menu_item_id, quantity, &names, size.as_deref(), notes)
                    .map(Some)
            }
            LineOp::SetQuantity { line_id, quantity } => {
                set_line_quantity(lines, line_id, quantity)?;
                Ok(None)
            }
            LineOp::RemoveLine { line_id } => {
                remove_line(lines, line_id)?;
                Ok(None)
            }
            LineOp::SetLineNotes { line_id, notes } => {
                set_line_notes(lines, line_id, notes)?;
                Ok(None)
            }
        }
    }

    pub fn add_line(
        &self,
        lines: &mut LineItems,
        menu_item_id: MenuItemId,
        quantity: i64,
        modifiers: &[&str],
        size: Option<&str>,
        notes: Option<String>,
    ) -> Result<LineId, OrderError> {
        let item = self.catalog.get_menu_item(menu_item_id)?;
        if !item.available {
            return Err(ValidationError::UnavailableItem(item.id).into());
        }
        let (modifiers, size) = self.pricing.resolve_selection(&item, modifiers, size)?;
        let line_total = self.pricing.price(&item, quantity, &modifiers, size.as_ref())?;
        let unit_price = self.pricing.unit_price(&item, &modifiers, size.as_ref())?;
        let quantity = to_quantity(quantity)?;

        let id = lines.allocate_id()?;
        lines.push(OrderLineItem {
            id,
            menu_item_id: item.id,
            name: item.name,
            quantity,
            modifiers,
            size,
            unit_price,
            line_total,
            notes: normalize_text(notes),
            prep_minutes: item.prep_minutes,
        });
        Ok(id)
    }
}

/// Quantity `<= 0` removes the line; removing an absent line is a no-op.
pub fn set_line_quantity(
    lines: &mut LineItems,
    line_id: LineId,
    quantity: i64,
) -> Result<(), ValidationError> {
    if quantity <= 0 {
        lines.remove(line_id);
        return Ok(());
    }
    let quantity = to_quantity(quantity)?;
    let line = lines.get_mut(line_id)?;
    line.quantity = quantity;
    line.line_total = round_money(line.unit_price * Decimal::from(quantity));
    Ok(())
}

pub fn remove_line(lines: &mut LineItems, line_id: LineId) -> Result<(), ValidationError> {
    lines
        .remove(line_id)
        .map(|_| ())
        .ok_or(ValidationError::LineNotFound(line_id))
}

pub fn set_line_notes(
    lines: &mut LineItems,
    line_id: LineId,
    notes: Option<String>,
) -> Result<(), ValidationError> {
    lines.get_mut(line_id)?.notes = normalize_text(notes);
    Ok(())
}

/// Blank text is stored as `None`.
pub fn normalize_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn to_quantity(quantity: i64) -> Result<u32, ValidationError> {
    u32::try_from(quantity)
        .ok()
        .filter(|q| *q >= 1)
        .ok_or(ValidationError::InvalidQuantity(quantity))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::demo_menu;
    use crate::model::cents;

    #[test]
    fn set_quantity_recomputes_line_total() {
        let catalog = demo_menu();
        let pricing = PricingEngine::default();
        let editor = LineEditor::new(&catalog, &pricing);
        let mut lines = LineItems::default();

        let id = editor
            .add_line(&mut lines, MenuItemId(4), 1, &["Extra Shot", "Extra Shot"], Some("Large"), None)
            .unwrap();
        assert_eq!(lines.get(id).unwrap().unit_price, cents(799));

        set_line_quantity(&mut lines, id, 3).unwrap();
        assert_eq!(lines.get(id).unwrap().line_total, cents(2397));
    }

    #[test]
    fn zero_quantity_removes_and_is_idempotent() {
        let catalog = demo_menu();
        let pricing = PricingEngine::default();
        let editor = LineEditor::new(&catalog, &pricing);
        let mut lines = LineItems::default();

        let id = editor
            .apply(&mut lines, LineOp::add(MenuItemId(3), 2))
            .unwrap()
            .unwrap();
        set_line_quantity(&mut lines, id, 0).unwrap();
        assert!(lines.is_empty());
        set_line_quantity(&mut lines, id, -1).unwrap();

        assert_eq!(
            set_line_quantity(&mut lines, id, 2),
            Err(ValidationError::LineNotFound(id))
        );
        assert_eq!(remove_line(&mut lines, id), Err(ValidationError::LineNotFound(id)));
    }

    #[test]
    fn notes_are_trimmed_and_blank_notes_cleared() {
        let catalog = demo_menu();
        let pricing = PricingEngine::default();
        let editor = LineEditor::new(&catalog, &pricing);
        let mut lines = LineItems::default();

        let id = editor
            .add_line(&mut lines, MenuItemId(5), 1, &[], None, Some("  extra spicy ".to_string()))
            .unwrap();
        assert_eq!(lines.get(id).unwrap().notes.as_deref(), Some("extra spicy"));

        set_line_notes(&mut lines, id, Some("   ".to_string())).unwrap();
        assert_eq!(lines.get(id).unwrap().notes, None);
    }

    #[test]
    fn unknown_item_is_a_catalog_error() {
        let catalog = demo_menu();
        let pricing = PricingEngine::default();
        let editor = LineEditor::new(&catalog, &pricing);
        let mut lines = LineItems::default();

        let err = editor
            .add_line(&mut lines, MenuItemId(404), 1, &[], None, None)
            .unwrap_err();
        assert!(matches!(err, OrderError::Catalog(_)));
        assert!(lines.is_empty());
    }
}
