//! # Rating Resolver
//!
//! Resolves one quality rating per basket item through an ordered fallback
//! chain across the item's own stored rating and the ratings carried by
//! matched price records.
//!
//! The engine models "unknown" as `None`, never as a zero rating: the
//! documented scale is 1..=5, and reserving an integer sentinel would
//! silently swallow a future real zero. [`rating_or_zero`] exists only for
//! display layers that still speak the 0 convention.

use crate::basket_model::{BasketItem, SessionConfig, Supermarket};
use crate::snapshot::BasketSnapshot;
use crate::tier_store_resolver::resolve_tier;

/// Resolve the quality rating for an item.
///
/// Fallback chain, evaluated lazily top to bottom:
/// 1. The item's own rating, when positive — it always wins.
/// 2. The rating on the price record at the item's resolved store and tier.
/// 3. The maximum rating across any price record for the item at its
///    resolved tier, regardless of supermarket.
/// 4. `None` — unknown.
pub fn resolve_rating(
    item: &BasketItem,
    resolved_store: Option<Supermarket>,
    config: &SessionConfig,
    snapshot: &BasketSnapshot,
) -> Option<u8> {
    if let Some(rating) = item.smp_rating.filter(|&r| r > 0) {
        return Some(rating);
    }

    let tier = resolve_tier(item, config);

    if let Some(rating) = resolved_store
        .and_then(|store| snapshot.price_for(&item.id, store, tier))
        .and_then(|record| record.smp_rating)
    {
        return Some(rating);
    }

    snapshot
        .prices_for_item(&item.id, tier)
        .filter_map(|record| record.smp_rating)
        .max()
}

/// The resolved rating, with unknown flattened to 0 for display layers.
pub fn rating_or_zero(
    item: &BasketItem,
    resolved_store: Option<Supermarket>,
    config: &SessionConfig,
    snapshot: &BasketSnapshot,
) -> u8 {
    resolve_rating(item, resolved_store, config, snapshot).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basket_model::{Category, PriceRecord, PriceTier};

    fn snapshot_with_record_ratings() -> BasketSnapshot {
        BasketSnapshot::from_parts(
            vec![BasketItem::new("itm-1", "Yoghurt", Category::Dairy)],
            vec![
                PriceRecord::new("itm-1", Supermarket::Tesco, PriceTier::Standard)
                    .with_price(1.50)
                    .with_smp_rating(2),
                PriceRecord::new("itm-1", Supermarket::Aldi, PriceTier::Standard)
                    .with_price(1.20)
                    .with_smp_rating(5),
                PriceRecord::new("itm-1", Supermarket::Lidl, PriceTier::Standard).with_price(1.10),
            ],
            vec![],
        )
    }

    #[test]
    fn test_item_rating_always_wins() {
        let snap = snapshot_with_record_ratings();
        let item = snap.items[0].clone().with_smp_rating(4);
        let config = SessionConfig::default();
        // The matched record at Tesco says 2; the item-level 4 wins.
        assert_eq!(
            resolve_rating(&item, Some(Supermarket::Tesco), &config, &snap),
            Some(4)
        );
    }

    #[test]
    fn test_resolved_store_record_rating() {
        let snap = snapshot_with_record_ratings();
        let config = SessionConfig::default();
        assert_eq!(
            resolve_rating(&snap.items[0], Some(Supermarket::Tesco), &config, &snap),
            Some(2)
        );
    }

    #[test]
    fn test_max_across_stores_when_resolved_store_unrated() {
        let snap = snapshot_with_record_ratings();
        let config = SessionConfig::default();
        // Lidl's record carries no rating; fall through to the maximum
        // across all records at the tier.
        assert_eq!(
            resolve_rating(&snap.items[0], Some(Supermarket::Lidl), &config, &snap),
            Some(5)
        );
    }

    #[test]
    fn test_max_across_stores_when_store_unresolved() {
        let snap = snapshot_with_record_ratings();
        let config = SessionConfig::default();
        assert_eq!(resolve_rating(&snap.items[0], None, &config, &snap), Some(5));
    }

    #[test]
    fn test_unknown_when_nothing_rated() {
        let snap = BasketSnapshot::from_parts(
            vec![BasketItem::new("itm-1", "Flour", Category::Pantry)],
            vec![PriceRecord::new("itm-1", Supermarket::Tesco, PriceTier::Standard)
                .with_price(0.80)],
            vec![],
        );
        let config = SessionConfig::default();
        let item = &snap.items[0];
        assert_eq!(resolve_rating(item, Some(Supermarket::Tesco), &config, &snap), None);
        assert_eq!(rating_or_zero(item, Some(Supermarket::Tesco), &config, &snap), 0);
    }

    #[test]
    fn test_zero_item_rating_treated_as_unknown() {
        let snap = snapshot_with_record_ratings();
        let mut item = snap.items[0].clone();
        item.smp_rating = Some(0);
        let config = SessionConfig::default();
        // A stored 0 is not a real rating; the chain continues.
        assert_eq!(
            resolve_rating(&item, Some(Supermarket::Tesco), &config, &snap),
            Some(2)
        );
    }

    #[test]
    fn test_tier_override_scopes_the_lookup() {
        let mut snap = snapshot_with_record_ratings();
        snap.prices.push(
            PriceRecord::new("itm-1", Supermarket::Tesco, PriceTier::Organic)
                .with_price(2.40)
                .with_smp_rating(3),
        );
        let item = snap.items[0].clone().with_selected_tier(PriceTier::Organic);
        let config = SessionConfig::default();
        assert_eq!(
            resolve_rating(&item, Some(Supermarket::Tesco), &config, &snap),
            Some(3)
        );
    }
}
