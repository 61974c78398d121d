//! # Basket Snapshot
//!
//! The engine is a pure read/derive layer: basket items, price records and
//! ingredient sources arrive as complete snapshots from the external
//! basket-storage and price-lookup services. This module holds one such
//! snapshot and provides the lookup helpers the resolvers and aggregator
//! are built on.
//!
//! A price refresh replaces the snapshot wholesale. [`SnapshotStore`] makes
//! that swap atomic by replacing an `Arc` under a short write lock: readers
//! that cloned the `Arc` keep a fully consistent old snapshot, and outputs
//! are never a mix of old and new price records. A failed refresh simply
//! never calls [`SnapshotStore::replace`].

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};

use crate::basket_model::{BasketItem, IngredientSource, PriceRecord, PriceTier, Supermarket};

/// A complete, immutable basket snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasketSnapshot {
    /// Consolidated basket items
    #[serde(default)]
    pub items: Vec<BasketItem>,

    /// Full-replacement price observations from the last match/refresh
    #[serde(default)]
    pub prices: Vec<PriceRecord>,

    /// Meal provenance links, immutable for a given basket generation
    #[serde(default)]
    pub sources: Vec<IngredientSource>,

    /// When the price records were fetched, if they ever were
    #[serde(default)]
    pub fetched_at: Option<DateTime<Utc>>,
}

impl BasketSnapshot {
    /// Create an empty snapshot
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a snapshot from its three input collections
    pub fn from_parts(
        items: Vec<BasketItem>,
        prices: Vec<PriceRecord>,
        sources: Vec<IngredientSource>,
    ) -> Self {
        Self {
            items,
            prices,
            sources,
            fetched_at: None,
        }
    }

    /// Stamp the snapshot with its price-fetch time
    pub fn with_fetched_at(mut self, at: DateTime<Utc>) -> Self {
        self.fetched_at = Some(at);
        self
    }

    /// Deserialize a snapshot from the backend's JSON payload
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to deserialize basket snapshot")
    }

    /// Look up an item by id
    pub fn item(&self, item_id: &str) -> Option<&BasketItem> {
        self.items.iter().find(|i| i.id == item_id)
    }

    /// The price record for an exact (item, supermarket, tier) triple.
    ///
    /// At most one record exists per triple; absence means the same thing
    /// as a record with `price: None`.
    pub fn price_for(
        &self,
        item_id: &str,
        supermarket: Supermarket,
        tier: PriceTier,
    ) -> Option<&PriceRecord> {
        self.prices
            .iter()
            .find(|p| p.item_id == item_id && p.supermarket == supermarket && p.tier == tier)
    }

    /// All price records for one item at one tier, across supermarkets
    pub fn prices_for_item<'a>(
        &'a self,
        item_id: &'a str,
        tier: PriceTier,
    ) -> impl Iterator<Item = &'a PriceRecord> + 'a {
        self.prices
            .iter()
            .filter(move |p| p.item_id == item_id && p.tier == tier)
    }

    /// How many meals contributed to this item (the Meal sort key)
    pub fn source_count(&self, item_id: &str) -> usize {
        self.sources.iter().filter(|s| s.item_id == item_id).count()
    }

    /// Meal provenance rows for one item
    pub fn sources_for_item<'a>(
        &'a self,
        item_id: &'a str,
    ) -> impl Iterator<Item = &'a IngredientSource> + 'a {
        self.sources.iter().filter(move |s| s.item_id == item_id)
    }
}

/// Shared holder for the current snapshot with atomic replacement.
#[derive(Debug, Default)]
pub struct SnapshotStore {
    current: RwLock<Arc<BasketSnapshot>>,
}

impl SnapshotStore {
    /// Create a store holding an empty snapshot
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with an initial snapshot
    pub fn with_snapshot(snapshot: BasketSnapshot) -> Self {
        Self {
            current: RwLock::new(Arc::new(snapshot)),
        }
    }

    /// The current snapshot.
    ///
    /// The returned `Arc` stays internally consistent for as long as the
    /// caller holds it, even across a concurrent [`replace`](Self::replace).
    pub fn current(&self) -> Arc<BasketSnapshot> {
        self.current
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Atomically replace the snapshot with a freshly fetched one
    pub fn replace(&self, snapshot: BasketSnapshot) {
        info!(
            "Replacing basket snapshot: {} items, {} price records, {} sources",
            snapshot.items.len(),
            snapshot.prices.len(),
            snapshot.sources.len()
        );
        let mut guard = self
            .current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = Arc::new(snapshot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basket_model::Category;

    fn sample_snapshot() -> BasketSnapshot {
        BasketSnapshot::from_parts(
            vec![BasketItem::new("itm-1", "Eggs", Category::Dairy)],
            vec![
                PriceRecord::new("itm-1", Supermarket::Tesco, PriceTier::Standard)
                    .with_price(2.10),
                PriceRecord::new("itm-1", Supermarket::Aldi, PriceTier::Standard)
                    .with_price(1.85),
                PriceRecord::new("itm-1", Supermarket::Tesco, PriceTier::Organic)
                    .with_price(3.40),
            ],
            vec![
                IngredientSource::new("itm-1", "meal-1", "Shakshuka"),
                IngredientSource::new("itm-1", "meal-2", "Carbonara"),
            ],
        )
    }

    #[test]
    fn test_price_lookup_exact_triple() {
        let snap = sample_snapshot();
        let rec = snap
            .price_for("itm-1", Supermarket::Aldi, PriceTier::Standard)
            .unwrap();
        assert_eq!(rec.price, Some(1.85));

        assert!(snap
            .price_for("itm-1", Supermarket::Lidl, PriceTier::Standard)
            .is_none());
    }

    #[test]
    fn test_prices_for_item_filters_tier() {
        let snap = sample_snapshot();
        let standard: Vec<_> = snap.prices_for_item("itm-1", PriceTier::Standard).collect();
        assert_eq!(standard.len(), 2);
        let organic: Vec<_> = snap.prices_for_item("itm-1", PriceTier::Organic).collect();
        assert_eq!(organic.len(), 1);
    }

    #[test]
    fn test_source_count() {
        let snap = sample_snapshot();
        assert_eq!(snap.source_count("itm-1"), 2);
        assert_eq!(snap.source_count("itm-404"), 0);
    }

    #[test]
    fn test_from_json_camel_case() {
        let json = r#"{
            "items": [{"id": "itm-1", "name": "Eggs", "category": "dairy"}],
            "prices": [{"itemId": "itm-1", "supermarket": "Tesco", "tier": "standard", "price": 2.1}],
            "sources": []
        }"#;
        let snap = BasketSnapshot::from_json(json).unwrap();
        assert_eq!(snap.items.len(), 1);
        assert_eq!(
            snap.price_for("itm-1", Supermarket::Tesco, PriceTier::Standard)
                .unwrap()
                .price,
            Some(2.1)
        );
        assert!(snap.fetched_at.is_none());
    }

    #[test]
    fn test_fetched_at_stamp_survives_serialization() {
        let at = Utc::now();
        let snap = sample_snapshot().with_fetched_at(at);
        let json = serde_json::to_string(&snap).unwrap();
        let back = BasketSnapshot::from_json(&json).unwrap();
        assert_eq!(back.fetched_at, Some(at));
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(BasketSnapshot::from_json("not json").is_err());
    }

    #[test]
    fn test_store_replace_is_wholesale() {
        let store = SnapshotStore::with_snapshot(sample_snapshot());
        let before = store.current();
        assert_eq!(before.prices.len(), 3);

        // A reader holding the old Arc is unaffected by the swap.
        store.replace(BasketSnapshot::new());
        assert_eq!(before.prices.len(), 3);
        assert_eq!(store.current().prices.len(), 0);
    }
}
