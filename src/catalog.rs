//! Service catalogs
//!
//! Static, read-only menus shared by every attendee and worker of a vendor.
//! Prices and alcohol flags follow the festival's standard bar and food
//! truck offering; preparation times are simulated holds in milliseconds.

use rand::seq::SliceRandom;
use rand::Rng;
use std::time::Duration;

/// One orderable item on a catalog
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogItem {
    /// Item name, unique within its catalog
    pub name: String,
    /// List price
    pub price: f64,
    /// Whether the item contains alcohol
    pub contains_alcohol: bool,
    /// Simulated preparation hold
    pub prep_time: Duration,
}

impl CatalogItem {
    /// Create a catalog item with a preparation time in milliseconds
    pub fn new(name: impl Into<String>, price: f64, contains_alcohol: bool, prep_ms: u64) -> Self {
        Self {
            name: name.into(),
            price,
            contains_alcohol,
            prep_time: Duration::from_millis(prep_ms),
        }
    }
}

/// A named, immutable collection of catalog items
#[derive(Debug, Clone)]
pub struct Catalog {
    /// Catalog name, used in logs
    pub name: String,
    items: Vec<CatalogItem>,
}

impl Catalog {
    /// Create a catalog from a list of items
    pub fn new(name: impl Into<String>, items: Vec<CatalogItem>) -> Self {
        Self { name: name.into(), items }
    }

    /// The standard bar menu
    pub fn bar() -> Self {
        Self::new(
            "Bar Menu",
            vec![
                CatalogItem::new("Soda", 3.50, false, 50),
                CatalogItem::new("Water", 3.00, false, 50),
                CatalogItem::new("Beer", 5.50, true, 80),
                CatalogItem::new("Wine", 6.00, true, 90),
                CatalogItem::new("Whiskey", 10.00, true, 100),
                CatalogItem::new("Gin Tonic", 11.00, true, 200),
            ],
        )
    }

    /// The standard food truck menu
    pub fn food_truck() -> Self {
        Self::new(
            "Food Truck Menu",
            vec![
                CatalogItem::new("Burger", 8.00, false, 100),
                CatalogItem::new("Fries", 3.20, false, 50),
                CatalogItem::new("Hot Dog", 4.50, false, 80),
                CatalogItem::new("Tacos", 4.00, false, 70),
                CatalogItem::new("Wings", 3.60, false, 70),
                CatalogItem::new("Wrap", 5.00, false, 50),
            ],
        )
    }

    /// All items in the catalog
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    /// Look up an item by name
    pub fn item_by_name(&self, name: &str) -> Option<&CatalogItem> {
        self.items.iter().find(|item| item.name == name)
    }

    /// Pick a uniformly random item
    ///
    /// Returns `None` only for an empty catalog, which configuration
    /// validation rules out for the built-in menus.
    pub fn random_item<R: Rng>(&self, rng: &mut R) -> Option<&CatalogItem> {
        self.items.choose(rng)
    }
}
