//! Menu Item Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Menu item stored under `menu:<id>`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub description: String,
    /// Price in currency unit
    pub price: f64,
    #[serde(default = "default_true")]
    pub available: bool,
    #[serde(default)]
    pub image: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

impl MenuItem {
    /// Build a new item from a validated create payload
    pub fn from_create(id: String, data: MenuItemCreate, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: data.name.unwrap_or_default(),
            category: data.category.unwrap_or_default(),
            description: data.description.unwrap_or_default(),
            price: data.price.unwrap_or_default(),
            available: data.available.unwrap_or(true),
            image: data.image.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge a partial update. `id` and `created_at` never change.
    pub fn apply_update(&mut self, data: MenuItemUpdate, now: DateTime<Utc>) {
        if let Some(name) = data.name {
            self.name = name;
        }
        if let Some(category) = data.category {
            self.category = category;
        }
        if let Some(description) = data.description {
            self.description = description;
        }
        if let Some(price) = data.price {
            self.price = price;
        }
        if let Some(available) = data.available {
            self.available = available;
        }
        if let Some(image) = data.image {
            self.image = image;
        }
        self.updated_at = now;
    }

    /// Case-insensitive match on name or description
    pub fn matches_search(&self, term: &str) -> bool {
        let needle = term.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
    }
}

/// Create menu item payload
///
/// Fields are optional at the serde level so missing ones surface as a
/// validation error instead of a body rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuItemCreate {
    pub name: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub available: Option<bool>,
    pub image: Option<String>,
}

/// Update menu item payload (all optional)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuItemUpdate {
    pub name: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub available: Option<bool>,
    pub image: Option<String>,
}

/// Menu listing filters (`?category=&search=`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuQuery {
    /// `None` or `"all"` disables the category filter
    pub category: Option<String>,
    pub search: Option<String>,
}

impl MenuQuery {
    pub fn matches(&self, item: &MenuItem) -> bool {
        if let Some(category) = self.category.as_deref()
            && !category.is_empty()
            && category != "all"
            && item.category != category
        {
            return false;
        }
        match self.search.as_deref() {
            Some(term) if !term.is_empty() => item.matches_search(term),
            _ => true,
        }
    }
}
