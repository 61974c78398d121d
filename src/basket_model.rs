//! # Basket Data Model
//!
//! This module defines the data structures shared by every engine component:
//! consolidated basket items, per-supermarket price observations, provenance
//! links back to meals, and the fixed enumerations (supermarkets, price
//! tiers, categories, stored units) the rest of the engine resolves against.
//!
//! ## Core Concepts
//!
//! - **BasketItem**: one consolidated ingredient requirement
//! - **PriceRecord**: one (item x supermarket x tier) price observation
//! - **IngredientSource**: which meal(s) an item came from
//! - **SessionConfig**: the user's global store/tier selection, passed
//!   explicitly into every resolver (never ambient state)
//!
//! ## Usage
//!
//! ```rust
//! use basket_engine::basket_model::{BasketItem, Category, PriceTier, StoredUnit};
//!
//! let item = BasketItem::new("itm-1", "Chicken breast", Category::Meat)
//!     .with_quantity(500.0, StoredUnit::Grams)
//!     .with_selected_tier(PriceTier::Organic);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supermarkets known to the price-lookup service.
///
/// Declaration order is the canonical order: it is the tie-break order for
/// cheapest-price resolution and the scan order for per-store totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Supermarket {
    Tesco,
    Sainsburys,
    Asda,
    Morrisons,
    Aldi,
    Lidl,
    Waitrose,
}

impl Supermarket {
    /// All supermarkets in canonical order.
    pub const ALL: [Supermarket; 7] = [
        Supermarket::Tesco,
        Supermarket::Sainsburys,
        Supermarket::Asda,
        Supermarket::Morrisons,
        Supermarket::Aldi,
        Supermarket::Lidl,
        Supermarket::Waitrose,
    ];

    /// Human-readable store name
    pub fn display_name(&self) -> &'static str {
        match self {
            Supermarket::Tesco => "Tesco",
            Supermarket::Sainsburys => "Sainsbury's",
            Supermarket::Asda => "Asda",
            Supermarket::Morrisons => "Morrisons",
            Supermarket::Aldi => "Aldi",
            Supermarket::Lidl => "Lidl",
            Supermarket::Waitrose => "Waitrose",
        }
    }
}

impl fmt::Display for Supermarket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Price tiers, ordered cheapest-positioning first for display purposes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum PriceTier {
    Budget,
    Standard,
    Premium,
    Organic,
}

impl PriceTier {
    /// All tiers in display order.
    pub const ALL: [PriceTier; 4] = [
        PriceTier::Budget,
        PriceTier::Standard,
        PriceTier::Premium,
        PriceTier::Organic,
    ];

    /// Lowercase label as used over the wire and in sort keys
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceTier::Budget => "budget",
            PriceTier::Standard => "standard",
            PriceTier::Premium => "premium",
            PriceTier::Organic => "organic",
        }
    }
}

impl fmt::Display for PriceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Item categories, used for grouping and badge colour only — pricing is
/// category-independent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Meat,
    Dairy,
    Produce,
    Bakery,
    Pantry,
    Frozen,
    Beverages,
    Snacks,
    Household,
    Other,
}

impl Category {
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Meat => "Meat",
            Category::Dairy => "Dairy",
            Category::Produce => "Produce",
            Category::Bakery => "Bakery",
            Category::Pantry => "Pantry",
            Category::Frozen => "Frozen",
            Category::Beverages => "Beverages",
            Category::Snacks => "Snacks",
            Category::Household => "Household",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// The only units ever stored on a basket item. Every other unit label
/// (kg, oz, cups, ...) is display-only output of the quantity normalizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StoredUnit {
    /// Mass in grams
    #[serde(rename = "g")]
    Grams,
    /// Volume in millilitres
    #[serde(rename = "ml")]
    Milliliters,
    /// Discrete count ("2 eggs")
    #[serde(rename = "unit")]
    Each,
}

impl StoredUnit {
    /// Label as stored and as fed to the normalizer
    pub fn as_str(&self) -> &'static str {
        match self {
            StoredUnit::Grams => "g",
            StoredUnit::Milliliters => "ml",
            StoredUnit::Each => "unit",
        }
    }
}

impl fmt::Display for StoredUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The user's preferred measurement system for quantity display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementSystem {
    Metric,
    Imperial,
}

/// Global store selection: a concrete supermarket, or automatic
/// cheapest-per-item resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoreSelection {
    Auto,
    Store(Supermarket),
}

impl StoreSelection {
    /// The concrete supermarket, if one is selected
    pub fn store(&self) -> Option<Supermarket> {
        match self {
            StoreSelection::Auto => None,
            StoreSelection::Store(s) => Some(*s),
        }
    }
}

/// Session configuration the presentation layer passes into every resolver.
///
/// Last-writer-wins scalar state; the engine never mutates it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Global supermarket selection
    pub store: StoreSelection,
    /// Global default price tier
    pub tier: PriceTier,
}

impl SessionConfig {
    pub fn new(store: StoreSelection, tier: PriceTier) -> Self {
        Self { store, tier }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            store: StoreSelection::Auto,
            tier: PriceTier::Standard,
        }
    }
}

/// One consolidated ingredient requirement in the shopping basket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasketItem {
    /// Opaque identifier, unique and stable across edits
    pub id: String,

    /// Canonical display name
    pub name: String,

    /// Numeric amount in its native `unit`
    #[serde(default)]
    pub quantity_value: Option<f64>,

    /// Canonical gram/millilitre equivalent; preferred for display
    /// conversion whenever the unit is not a discrete count (it carries
    /// more precision than `quantity_value`)
    #[serde(default)]
    pub quantity_grams: Option<f64>,

    /// Stored unit, if any
    #[serde(default)]
    pub unit: Option<StoredUnit>,

    /// Grouping/badge category, independent of pricing
    pub category: Category,

    /// User-toggled "purchased" flag; display dimming only
    #[serde(default)]
    pub checked: bool,

    /// Per-item supermarket override; None = use global/auto resolution
    #[serde(default)]
    pub selected_store: Option<Supermarket>,

    /// Per-item tier override; None = use the global default tier
    #[serde(default)]
    pub selected_tier: Option<PriceTier>,

    /// Quality rating resolved server-side for the item as a whole
    /// (1..=5; None = unknown)
    #[serde(default)]
    pub smp_rating: Option<u8>,

    /// Product currently matched to this item, if any
    #[serde(default)]
    pub matched_product_id: Option<String>,

    /// Supermarkets known to stock the currently selected product
    #[serde(default)]
    pub available_stores: Vec<Supermarket>,
}

impl BasketItem {
    /// Create a new unpriced item with just a name and category
    pub fn new(id: &str, name: &str, category: Category) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            quantity_value: None,
            quantity_grams: None,
            unit: None,
            category,
            checked: false,
            selected_store: None,
            selected_tier: None,
            smp_rating: None,
            matched_product_id: None,
            available_stores: Vec::new(),
        }
    }

    /// Set the native quantity and unit
    pub fn with_quantity(mut self, value: f64, unit: StoredUnit) -> Self {
        self.quantity_value = Some(value);
        self.unit = Some(unit);
        self
    }

    /// Set the canonical gram/millilitre equivalent
    pub fn with_quantity_grams(mut self, grams: f64) -> Self {
        self.quantity_grams = Some(grams);
        self
    }

    /// Set a per-item supermarket override
    pub fn with_selected_store(mut self, store: Supermarket) -> Self {
        self.selected_store = Some(store);
        self
    }

    /// Set a per-item tier override
    pub fn with_selected_tier(mut self, tier: PriceTier) -> Self {
        self.selected_tier = Some(tier);
        self
    }

    /// Set the item-level quality rating
    pub fn with_smp_rating(mut self, rating: u8) -> Self {
        self.smp_rating = Some(rating);
        self
    }
}

/// One (item x supermarket x tier) price observation.
///
/// At most one record exists per triple; a missing record means the same
/// thing as `price: None` — that supermarket carries no matching product
/// at that tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRecord {
    /// Basket item this observation belongs to
    pub item_id: String,

    pub supermarket: Supermarket,

    pub tier: PriceTier,

    /// Non-negative currency amount; None = no matching product
    #[serde(default)]
    pub price: Option<f64>,

    /// Matched product name as shown by the supermarket
    #[serde(default)]
    pub product_name: String,

    /// Display-only pack size string ("500g", "6 x 330ml")
    #[serde(default)]
    pub product_weight: String,

    /// Quality rating specific to this matched product (1..=5)
    #[serde(default)]
    pub smp_rating: Option<u8>,

    #[serde(default)]
    pub product_url: String,
}

impl PriceRecord {
    pub fn new(item_id: &str, supermarket: Supermarket, tier: PriceTier) -> Self {
        Self {
            item_id: item_id.to_string(),
            supermarket,
            tier,
            price: None,
            product_name: String::new(),
            product_weight: String::new(),
            smp_rating: None,
            product_url: String::new(),
        }
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_smp_rating(mut self, rating: u8) -> Self {
        self.smp_rating = Some(rating);
        self
    }

    pub fn with_product_name(mut self, name: &str) -> Self {
        self.product_name = name.to_string();
        self
    }
}

/// Provenance link from a basket item back to a meal that generated it.
///
/// Display ("used in N meals") and the Meal sort column only; never
/// consulted for pricing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientSource {
    pub item_id: String,
    pub meal_id: String,
    pub meal_name: String,
    /// Number of servings of that meal contributing to this item (>= 1)
    pub quantity_multiplier: u32,
}

impl IngredientSource {
    pub fn new(item_id: &str, meal_id: &str, meal_name: &str) -> Self {
        Self {
            item_id: item_id.to_string(),
            meal_id: meal_id.to_string(),
            meal_name: meal_name.to_string(),
            quantity_multiplier: 1,
        }
    }
}
