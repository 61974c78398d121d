//! # Basket Engine
//!
//! Shopping basket consolidation and price-resolution engine for the meal
//! planner: normalizes free-text ingredient quantities, resolves effective
//! price tiers and supermarkets from layered overrides, aggregates basket
//! totals with deterministic cheapest selection, resolves quality ratings
//! through an ordered fallback chain, and orders the basket for display.
//!
//! The engine is a pure read/derive layer: all inputs arrive as complete
//! snapshots from the external basket-storage and price-lookup services,
//! every function is total over its documented domain, and identical
//! snapshots always produce identical outputs.

pub mod basket_model;
pub mod basket_sort;
pub mod ingredient_text_parser;
pub mod price_aggregator;
pub mod quantity_normalizer;
pub mod rating_resolver;
pub mod snapshot;
pub mod tier_store_resolver;

pub use basket_model::{
    BasketItem, Category, IngredientSource, MeasurementSystem, PriceRecord, PriceTier,
    SessionConfig, StoreSelection, StoredUnit, Supermarket,
};
pub use basket_sort::{sort_basket, SortColumn, SortDirection, SortState};
pub use ingredient_text_parser::{parse, ParsedIngredient};
pub use price_aggregator::{CheapestPrice, PriceAggregator, SupermarketTotal};
pub use quantity_normalizer::{normalize, NormalizedQuantity};
pub use rating_resolver::{rating_or_zero, resolve_rating};
pub use snapshot::{BasketSnapshot, SnapshotStore};
pub use tier_store_resolver::{resolve_store, resolve_tier, store_matches_global};
