use crate::model::Money;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MenuItemId(pub u32);

impl From<u32> for MenuItemId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for MenuItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "item_{}", self.0)
    }
}

/// An optional add-on. `price_delta` may be negative ("Half Pint").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Modifier {
    pub name: String,
    pub price_delta: Money,
    /// Whether the same modifier may be picked more than once on one line.
    #[serde(default)]
    pub repeatable: bool,
}

impl Modifier {
    pub fn new(name: impl Into<String>, price_delta: Money) -> Self {
        Self {
            name: name.into(),
            price_delta,
            repeatable: false,
        }
    }

    pub fn repeatable(mut self) -> Self {
        self.repeatable = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeOption {
    pub name: String,
    pub price_delta: Money,
}

impl SizeOption {
    pub fn new(name: impl Into<String>, price_delta: Money) -> Self {
        Self {
            name: name.into(),
            price_delta,
        }
    }
}

/// A sellable catalog entry. Owned by the catalog; orders keep snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: MenuItemId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub base_price: Money,
    pub category: String,
    pub available: bool,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
    #[serde(default)]
    pub sizes: Vec<SizeOption>,
    /// Kitchen estimate for one line of this item.
    #[serde(default)]
    pub prep_minutes: Option<u32>,
}

impl MenuItem {
    /// Creates an available item with no options.
    pub fn new(
        id: MenuItemId,
        name: impl Into<String>,
        category: impl Into<String>,
        base_price: Money,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            base_price,
            category: category.into(),
            available: true,
            modifiers: Vec::new(),
            sizes: Vec::new(),
            prep_minutes: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers.push(modifier);
        self
    }

    pub fn with_size(mut self, size: SizeOption) -> Self {
        self.sizes.push(size);
        self
    }

    pub fn with_prep_minutes(mut self, minutes: u32) -> Self {
        self.prep_minutes = Some(minutes);
        self
    }

    pub fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }

    pub fn find_modifier(&self, name: &str) -> Option<&Modifier> {
        self.modifiers.iter().find(|m| m.name == name)
    }

    pub fn find_size(&self, name: &str) -> Option<&SizeOption> {
        self.sizes.iter().find(|s| s.name == name)
    }

    /// Case-insensitive match on name or description.
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.name.to_lowercase().contains(&term)
            || self
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&term))
    }
}
