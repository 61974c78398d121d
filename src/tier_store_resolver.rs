//! # Tier and Store Resolver
//!
//! Determines the *effective* price tier and *effective* supermarket for a
//! basket item from the layered override model: item-level override first,
//! then the global selection, then automatic cheapest-store resolution.
//!
//! The precedence is encoded as one explicit ordered fallback list rather
//! than conditionals scattered across call sites, and the global
//! configuration is always passed in explicitly — the engine holds no
//! ambient session state.

use crate::basket_model::{BasketItem, PriceTier, SessionConfig, Supermarket};

/// The effective price tier for an item: its own override, else the
/// global default tier.
pub fn resolve_tier(item: &BasketItem, config: &SessionConfig) -> PriceTier {
    item.selected_tier.unwrap_or(config.tier)
}

/// The effective supermarket for an item.
///
/// Ordered fallback list: the item's own store override, then the global
/// store selection (when not Auto), then the cheapest available store for
/// the item at its resolved tier as computed by the price aggregator.
/// Returns `None` only when all three rungs are empty — an unpriced item
/// under Auto.
pub fn resolve_store(
    item: &BasketItem,
    config: &SessionConfig,
    cheapest_for_item: Option<Supermarket>,
) -> Option<Supermarket> {
    [item.selected_store, config.store.store(), cheapest_for_item]
        .into_iter()
        .flatten()
        .next()
}

/// Whether the item's effective store equals the global store selection.
///
/// The presentation layer needs this to enforce its override invariant:
/// setting an item-level store resets the global selection to Auto at the
/// call site, so a concrete global store is never silently contradicted by
/// a differing item.
pub fn store_matches_global(
    item: &BasketItem,
    config: &SessionConfig,
    cheapest_for_item: Option<Supermarket>,
) -> bool {
    match config.store.store() {
        Some(global) => resolve_store(item, config, cheapest_for_item) == Some(global),
        None => false,
    }
}
