//! Read-only menu catalog.
//!
//! The order core only ever reads from a [`Catalog`]. [`InMemoryCatalog`] backs the
//! demo binary and the tests.

use crate::model::{cents, MenuItem, MenuItemId, Modifier, SizeOption};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    #[error("Menu item not found: {0}")]
    NotFound(MenuItemId),
}

/// Narrows [`Catalog::list_available_items`]. Empty fields match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogFilter {
    pub category: Option<String>,
    /// Case-insensitive match on name or description.
    pub search: Option<String>,
}

impl CatalogFilter {
    pub fn matches(&self, item: &MenuItem) -> bool {
        let category_ok = self
            .category
            .as_deref()
            .is_none_or(|category| item.category.eq_ignore_ascii_case(category));
        let search_ok = self
            .search
            .as_deref()
            .is_none_or(|term| item.matches_search(term.trim()));
        category_ok && search_ok
    }
}

pub trait Catalog: Send + Sync {
    fn get_menu_item(&self, id: MenuItemId) -> Result<MenuItem, CatalogError>;

    /// Available items matching `filter`, in id order.
    fn list_available_items(&self, filter: &CatalogFilter) -> Vec<MenuItem>;
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    items: BTreeMap<MenuItemId, MenuItem>,
}

impl InMemoryCatalog {
    pub fn new(items: impl IntoIterator<Item = MenuItem>) -> Self {
        Self {
            items: items.into_iter().map(|item| (item.id, item)).collect(),
        }
    }

    /// Adds or replaces an item.
    pub fn insert(&mut self, item: MenuItem) {
        self.items.insert(item.id, item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Catalog for InMemoryCatalog {
    fn get_menu_item(&self, id: MenuItemId) -> Result<MenuItem, CatalogError> {
        self.items.get(&id).cloned().ok_or(CatalogError::NotFound(id))
    }

    fn list_available_items(&self, filter: &CatalogFilter) -> Vec<MenuItem> {
        self.items
            .values()
            .filter(|item| item.available && filter.matches(item))
            .cloned()
            .collect()
    }
}

/// The house menu used by the demo binary.
pub fn demo_menu() -> InMemoryCatalog {
    InMemoryCatalog::new([
        MenuItem::new(MenuItemId(1), "Classic Cheeseburger", "burgers", cents(1299))
            .with_description("Juicy beef patty with cheese, lettuce, tomato, and special sauce")
            .with_modifier(Modifier::new("Remove Onion", cents(0)))
            .with_modifier(Modifier::new("Extra Cheese", cents(150)))
            .with_modifier(Modifier::new("Bacon", cents(200)))
            .with_modifier(Modifier::new("Side Fries", cents(399)))
            .with_size(SizeOption::new("Regular", cents(0)))
            .with_size(SizeOption::new("Large", cents(200)))
            .with_prep_minutes(12),
        MenuItem::new(MenuItemId(2), "Margherita Pizza", "pizza", cents(1899))
            .with_description("Fresh mozzarella, tomato sauce, and basil")
            .with_modifier(Modifier::new("Extra Cheese", cents(200)))
            .with_modifier(Modifier::new("Pepperoni", cents(300)))
            .with_modifier(Modifier::new("Mushrooms", cents(150)))
            .with_size(SizeOption::new("Medium (12\")", cents(0)))
            .with_size(SizeOption::new("Large (16\")", cents(400)))
            .with_prep_minutes(18),
        MenuItem::new(MenuItemId(3), "Caesar Salad", "salads", cents(999))
            .with_description("Fresh romaine lettuce, parmesan cheese, croutons, and caesar dressing")
            .with_modifier(Modifier::new("Extra Dressing", cents(50)))
            .with_modifier(Modifier::new("Grilled Chicken", cents(400)))
            .with_modifier(Modifier::new("Shrimp", cents(500)))
            .with_prep_minutes(8),
        MenuItem::new(MenuItemId(4), "Iced Latte", "drinks", cents(499))
            .with_description("Smooth espresso with cold milk and ice")
            .with_modifier(Modifier::new("Extra Shot", cents(100)).repeatable())
            .with_modifier(Modifier::new("Vanilla Syrup", cents(50)))
            .with_modifier(Modifier::new("Caramel Syrup", cents(50)))
            .with_modifier(Modifier::new("Whipped Cream", cents(75)))
            .with_size(SizeOption::new("Regular", cents(0)))
            .with_size(SizeOption::new("Large", cents(100)))
            .with_prep_minutes(3),
        MenuItem::new(MenuItemId(5), "California Roll", "sushi", cents(1499))
            .with_description("Crab, avocado, and cucumber roll")
            .with_modifier(Modifier::new("Extra Avocado", cents(150)))
            .with_modifier(Modifier::new("Spicy Mayo", cents(50)))
            .with_modifier(Modifier::new("Soy Sauce", cents(0)))
            .with_prep_minutes(10),
        MenuItem::new(MenuItemId(6), "Chocolate Lava Cake", "desserts", cents(899))
            .with_description("Warm chocolate cake with molten center, served with vanilla ice cream")
            .with_modifier(Modifier::new("Extra Ice Cream", cents(150)))
            .with_modifier(Modifier::new("Strawberry Sauce", cents(75)))
            .with_modifier(Modifier::new("Whipped Cream", cents(50)))
            .with_prep_minutes(10),
        MenuItem::new(MenuItemId(7), "Craft Beer Selection", "alcohol", cents(699))
            .with_description("Local craft beers on tap")
            .with_modifier(Modifier::new("Pint", cents(0)))
            .with_modifier(Modifier::new("Half Pint", cents(-100))),
    ])
}
