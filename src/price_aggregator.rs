//! # Price Aggregator
//!
//! Aggregate price views over one basket snapshot: cheapest price per item,
//! totals per supermarket and per tier, and the current best basket total
//! under the active override configuration.
//!
//! Everything here is recomputed from scratch on every call. Baskets are
//! bounded (tens of items), the inputs are an immutable snapshot, and a
//! full recompute is immune to cache-invalidation bugs — repeated calls
//! with an unchanged snapshot return bit-identical results.

use std::collections::BTreeMap;

use crate::basket_model::{PriceTier, SessionConfig, Supermarket};
use crate::snapshot::BasketSnapshot;
use crate::tier_store_resolver::resolve_tier;

/// The cheapest available price for one item at one tier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CheapestPrice {
    pub price: f64,
    pub supermarket: Supermarket,
}

/// One supermarket's basket total at a given tier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SupermarketTotal {
    pub supermarket: Supermarket,
    pub total: f64,
    /// Basket items this supermarket actually prices at the tier
    pub priced_items: usize,
}

/// Aggregation over a borrowed snapshot.
#[derive(Debug, Clone, Copy)]
pub struct PriceAggregator<'a> {
    snapshot: &'a BasketSnapshot,
}

impl<'a> PriceAggregator<'a> {
    pub fn new(snapshot: &'a BasketSnapshot) -> Self {
        Self { snapshot }
    }

    /// The cheapest non-null price for an item at a tier.
    ///
    /// Supermarkets are scanned in canonical order and only a strictly
    /// lower price displaces the current minimum, so on exact ties the
    /// supermarket earliest in the canonical order wins. `None` when no
    /// supermarket prices the item at this tier.
    pub fn cheapest(&self, item_id: &str, tier: PriceTier) -> Option<CheapestPrice> {
        let mut best: Option<CheapestPrice> = None;
        for supermarket in Supermarket::ALL {
            let Some(price) = self
                .snapshot
                .price_for(item_id, supermarket, tier)
                .and_then(|r| r.price)
            else {
                continue;
            };
            if best.map_or(true, |b| price < b.price) {
                best = Some(CheapestPrice { price, supermarket });
            }
        }
        best
    }

    /// Basket total per supermarket at a tier, cheapest first.
    ///
    /// One entry per supermarket with at least one priced item. Items the
    /// supermarket does not price at this tier contribute zero — there is
    /// no tier substitution, so totals are only directly comparable across
    /// supermarkets that fully cover the basket. `priced_items` lets the
    /// caller flag partial coverage.
    pub fn totals_by_supermarket(&self, tier: PriceTier) -> Vec<SupermarketTotal> {
        let mut totals: Vec<SupermarketTotal> = Supermarket::ALL
            .iter()
            .filter_map(|&supermarket| {
                let mut total = 0.0;
                let mut priced_items = 0;
                for item in &self.snapshot.items {
                    if let Some(price) = self
                        .snapshot
                        .price_for(&item.id, supermarket, tier)
                        .and_then(|r| r.price)
                    {
                        total += price;
                        priced_items += 1;
                    }
                }
                (priced_items > 0).then_some(SupermarketTotal {
                    supermarket,
                    total,
                    priced_items,
                })
            })
            .collect();

        // Stable sort: equal totals keep canonical supermarket order.
        totals.sort_by(|a, b| a.total.partial_cmp(&b.total).unwrap_or(std::cmp::Ordering::Equal));
        totals
    }

    /// How many basket items a supermarket prices at a tier, out of the
    /// basket size.
    pub fn coverage(&self, supermarket: Supermarket, tier: PriceTier) -> (usize, usize) {
        let priced = self
            .snapshot
            .items
            .iter()
            .filter(|item| {
                self.snapshot
                    .price_for(&item.id, supermarket, tier)
                    .and_then(|r| r.price)
                    .is_some()
            })
            .count();
        (priced, self.snapshot.items.len())
    }

    /// Basket total per tier, summing each item's cheapest-across-
    /// supermarkets price at that tier.
    pub fn totals_by_tier(&self) -> BTreeMap<PriceTier, f64> {
        PriceTier::ALL
            .iter()
            .map(|&tier| {
                let total = self
                    .snapshot
                    .items
                    .iter()
                    .filter_map(|item| self.cheapest(&item.id, tier))
                    .map(|c| c.price)
                    .sum();
                (tier, total)
            })
            .collect()
    }

    /// The basket total under the active override configuration.
    ///
    /// Evaluated in this exact precedence order:
    /// 1. A concrete global store: sum that store's price at each item's
    ///    resolved tier, missing prices as zero.
    /// 2. Any per-item tier override present: sum each item's cheapest
    ///    price at its own resolved tier.
    /// 3. Otherwise: sum each item's cheapest price at the global tier.
    pub fn current_best_total(&self, config: &SessionConfig) -> f64 {
        if let Some(store) = config.store.store() {
            return self
                .snapshot
                .items
                .iter()
                .filter_map(|item| {
                    self.snapshot
                        .price_for(&item.id, store, resolve_tier(item, config))
                        .and_then(|r| r.price)
                })
                .sum();
        }

        let any_tier_override = self
            .snapshot
            .items
            .iter()
            .any(|item| item.selected_tier.is_some());
        if any_tier_override {
            return self
                .snapshot
                .items
                .iter()
                .filter_map(|item| self.cheapest(&item.id, resolve_tier(item, config)))
                .map(|c| c.price)
                .sum();
        }

        self.snapshot
            .items
            .iter()
            .filter_map(|item| self.cheapest(&item.id, config.tier))
            .map(|c| c.price)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basket_model::{BasketItem, Category, PriceRecord, StoreSelection};

    fn record(
        item_id: &str,
        supermarket: Supermarket,
        tier: PriceTier,
        price: Option<f64>,
    ) -> PriceRecord {
        let rec = PriceRecord::new(item_id, supermarket, tier);
        match price {
            Some(p) => rec.with_price(p),
            None => rec,
        }
    }

    fn two_item_snapshot() -> BasketSnapshot {
        BasketSnapshot::from_parts(
            vec![
                BasketItem::new("itm-1", "Eggs", Category::Dairy),
                BasketItem::new("itm-2", "Bread", Category::Bakery),
            ],
            vec![
                record("itm-1", Supermarket::Tesco, PriceTier::Standard, Some(2.10)),
                record("itm-1", Supermarket::Aldi, PriceTier::Standard, Some(1.85)),
                record("itm-1", Supermarket::Aldi, PriceTier::Premium, Some(2.95)),
                record("itm-2", Supermarket::Tesco, PriceTier::Standard, Some(1.20)),
                record("itm-2", Supermarket::Aldi, PriceTier::Standard, None),
                record("itm-2", Supermarket::Lidl, PriceTier::Standard, Some(0.95)),
            ],
            vec![],
        )
    }

    #[test]
    fn test_cheapest_picks_minimum() {
        let snap = two_item_snapshot();
        let agg = PriceAggregator::new(&snap);
        let best = agg.cheapest("itm-1", PriceTier::Standard).unwrap();
        assert_eq!(best.price, 1.85);
        assert_eq!(best.supermarket, Supermarket::Aldi);
    }

    #[test]
    fn test_cheapest_ignores_null_prices() {
        let snap = two_item_snapshot();
        let agg = PriceAggregator::new(&snap);
        // Aldi has a record for itm-2 but no price; Lidl wins.
        let best = agg.cheapest("itm-2", PriceTier::Standard).unwrap();
        assert_eq!(best.supermarket, Supermarket::Lidl);
    }

    #[test]
    fn test_cheapest_none_when_unpriced() {
        let snap = two_item_snapshot();
        let agg = PriceAggregator::new(&snap);
        assert!(agg.cheapest("itm-2", PriceTier::Organic).is_none());
    }

    #[test]
    fn test_cheapest_tie_breaks_on_canonical_order() {
        let snap = BasketSnapshot::from_parts(
            vec![BasketItem::new("itm-1", "Milk", Category::Dairy)],
            vec![
                record("itm-1", Supermarket::Waitrose, PriceTier::Standard, Some(1.10)),
                record("itm-1", Supermarket::Asda, PriceTier::Standard, Some(1.10)),
                record("itm-1", Supermarket::Aldi, PriceTier::Standard, Some(1.10)),
            ],
            vec![],
        );
        let agg = PriceAggregator::new(&snap);
        // Asda is earliest in canonical order among the tied minimums,
        // on every call.
        for _ in 0..3 {
            let best = agg.cheapest("itm-1", PriceTier::Standard).unwrap();
            assert_eq!(best.supermarket, Supermarket::Asda);
        }
    }

    #[test]
    fn test_totals_by_supermarket_ascending_with_zero_contribution() {
        let snap = two_item_snapshot();
        let agg = PriceAggregator::new(&snap);
        let totals = agg.totals_by_supermarket(PriceTier::Standard);

        // Lidl prices only one item (0.95), Aldi one (1.85, the null
        // record contributes nothing), Tesco both (3.30).
        assert_eq!(totals.len(), 3);
        assert_eq!(totals[0].supermarket, Supermarket::Lidl);
        assert_eq!(totals[0].priced_items, 1);
        assert_eq!(totals[1].supermarket, Supermarket::Aldi);
        assert_eq!(totals[2].supermarket, Supermarket::Tesco);
        assert!((totals[2].total - 3.30).abs() < 1e-9);
        assert_eq!(totals[2].priced_items, 2);
    }

    #[test]
    fn test_coverage_counts() {
        let snap = two_item_snapshot();
        let agg = PriceAggregator::new(&snap);
        assert_eq!(agg.coverage(Supermarket::Tesco, PriceTier::Standard), (2, 2));
        assert_eq!(agg.coverage(Supermarket::Aldi, PriceTier::Standard), (1, 2));
        assert_eq!(agg.coverage(Supermarket::Morrisons, PriceTier::Standard), (0, 2));
    }

    #[test]
    fn test_totals_by_tier_uses_cheapest_per_item() {
        let snap = two_item_snapshot();
        let agg = PriceAggregator::new(&snap);
        let totals = agg.totals_by_tier();
        // Standard: 1.85 (itm-1, Aldi) + 0.95 (itm-2, Lidl).
        assert!((totals[&PriceTier::Standard] - 2.80).abs() < 1e-9);
        // Premium: only itm-1 is priced.
        assert!((totals[&PriceTier::Premium] - 2.95).abs() < 1e-9);
        assert_eq!(totals[&PriceTier::Organic], 0.0);
    }

    #[test]
    fn test_current_best_total_global_store_branch() {
        let snap = two_item_snapshot();
        let agg = PriceAggregator::new(&snap);
        let config = SessionConfig::new(
            StoreSelection::Store(Supermarket::Tesco),
            PriceTier::Standard,
        );
        // Tesco prices both items at standard: 2.10 + 1.20.
        assert!((agg.current_best_total(&config) - 3.30).abs() < 1e-9);
    }

    #[test]
    fn test_current_best_total_global_store_beats_tier_overrides() {
        let mut snap = two_item_snapshot();
        snap.items[0].selected_tier = Some(PriceTier::Premium);
        let agg = PriceAggregator::new(&snap);
        let config = SessionConfig::new(
            StoreSelection::Store(Supermarket::Tesco),
            PriceTier::Standard,
        );
        // Tesco has no premium price for itm-1: it contributes zero,
        // even though Aldi would price it. Global store wins the branch.
        assert!((agg.current_best_total(&config) - 1.20).abs() < 1e-9);
    }

    #[test]
    fn test_current_best_total_mixed_tier_branch() {
        let mut snap = two_item_snapshot();
        snap.items[0].selected_tier = Some(PriceTier::Premium);
        let agg = PriceAggregator::new(&snap);
        let config = SessionConfig::new(StoreSelection::Auto, PriceTier::Standard);
        // itm-1 at its premium override (2.95 at Aldi), itm-2 at the
        // global standard tier (0.95 at Lidl).
        assert!((agg.current_best_total(&config) - 3.90).abs() < 1e-9);
    }

    #[test]
    fn test_current_best_total_flat_tier_branch() {
        let snap = two_item_snapshot();
        let agg = PriceAggregator::new(&snap);
        let config = SessionConfig::new(StoreSelection::Auto, PriceTier::Standard);
        assert!((agg.current_best_total(&config) - 2.80).abs() < 1e-9);
    }

    #[test]
    fn test_idempotent_across_calls() {
        let snap = two_item_snapshot();
        let agg = PriceAggregator::new(&snap);
        let config = SessionConfig::default();
        let first = agg.current_best_total(&config);
        let second = agg.current_best_total(&config);
        assert_eq!(first.to_bits(), second.to_bits());
    }
}
