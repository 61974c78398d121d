//! # Basket Sort Engine
//!
//! Generic multi-column, direction-aware ordering over the basket's derived
//! fields (effective store, resolved tier, effective price, resolved
//! rating, meal count) with defined missing-value placement.
//!
//! Sorting is stable: equal keys preserve their prior relative order.

use std::cmp::Ordering;

use crate::basket_model::{BasketItem, SessionConfig};
use crate::price_aggregator::PriceAggregator;
use crate::rating_resolver::resolve_rating;
use crate::snapshot::BasketSnapshot;
use crate::tier_store_resolver::{resolve_store, resolve_tier};

/// The sortable basket columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    Ingredient,
    Qty,
    Unit,
    Category,
    Shop,
    Tier,
    Meal,
    Price,
    Smp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// Current sort selection with the column-toggle semantics of the basket
/// table: re-selecting the active column flips direction, selecting a new
/// column resets to ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub column: SortColumn,
    pub direction: SortDirection,
}

impl SortState {
    pub fn new(column: SortColumn) -> Self {
        Self {
            column,
            direction: SortDirection::Ascending,
        }
    }

    /// Select a column: same column flips direction, new column starts
    /// ascending.
    pub fn toggle(&mut self, column: SortColumn) {
        if self.column == column {
            self.direction = match self.direction {
                SortDirection::Ascending => SortDirection::Descending,
                SortDirection::Descending => SortDirection::Ascending,
            };
        } else {
            *self = SortState::new(column);
        }
    }
}

/// Precomputed sort key for one item. Keys are homogeneous within a sort.
#[derive(Debug, Clone, PartialEq)]
enum SortKey {
    Text(String),
    Number(f64),
    Rating(Option<u8>),
}

/// Sort basket items by one column.
///
/// String columns compare byte-wise with absent values as `""`; `Qty`
/// treats a missing quantity as 0; `Price` compares the effective price
/// (the resolved store's price, which under Auto is the cheapest price)
/// with missing prices as +infinity; `Smp` compares resolved ratings with
/// unknown ratings pushed to the end regardless of direction.
pub fn sort_basket(
    items: &[BasketItem],
    column: SortColumn,
    direction: SortDirection,
    config: &SessionConfig,
    snapshot: &BasketSnapshot,
) -> Vec<BasketItem> {
    let mut keyed: Vec<(SortKey, BasketItem)> = items
        .iter()
        .map(|item| (sort_key(item, column, config, snapshot), item.clone()))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| compare_keys(a, b, direction));
    keyed.into_iter().map(|(_, item)| item).collect()
}

fn sort_key(
    item: &BasketItem,
    column: SortColumn,
    config: &SessionConfig,
    snapshot: &BasketSnapshot,
) -> SortKey {
    let aggregator = PriceAggregator::new(snapshot);
    let tier = resolve_tier(item, config);
    let cheapest = aggregator.cheapest(&item.id, tier);
    let store = resolve_store(item, config, cheapest.map(|c| c.supermarket));

    match column {
        SortColumn::Ingredient => SortKey::Text(item.name.clone()),
        SortColumn::Qty => SortKey::Number(item.quantity_value.unwrap_or(0.0)),
        SortColumn::Unit => SortKey::Text(
            item.unit.map(|u| u.as_str().to_string()).unwrap_or_default(),
        ),
        SortColumn::Category => SortKey::Text(item.category.display_name().to_string()),
        SortColumn::Shop => SortKey::Text(
            store.map(|s| s.display_name().to_string()).unwrap_or_default(),
        ),
        SortColumn::Tier => SortKey::Text(tier.as_str().to_string()),
        SortColumn::Meal => SortKey::Number(snapshot.source_count(&item.id) as f64),
        SortColumn::Price => {
            let price = store
                .and_then(|s| snapshot.price_for(&item.id, s, tier))
                .and_then(|record| record.price);
            SortKey::Number(price.unwrap_or(f64::INFINITY))
        }
        SortColumn::Smp => SortKey::Rating(resolve_rating(item, store, config, snapshot)),
    }
}

fn compare_keys(a: &SortKey, b: &SortKey, direction: SortDirection) -> Ordering {
    match (a, b) {
        (SortKey::Text(a), SortKey::Text(b)) => direction.apply(a.cmp(b)),
        (SortKey::Number(a), SortKey::Number(b)) => {
            direction.apply(a.partial_cmp(b).unwrap_or(Ordering::Equal))
        }
        // Unknown ratings sort after every known rating in both
        // directions; direction only orders the known ratings.
        (SortKey::Rating(a), SortKey::Rating(b)) => match (a, b) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(a), Some(b)) => direction.apply(a.cmp(b)),
        },
        _ => Ordering::Equal,
    }
}
