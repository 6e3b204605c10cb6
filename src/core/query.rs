//! Derived item views - search, sort, partition and stock aggregates.
//!
//! Everything here is a pure function over borrowed items. Nothing is cached and
//! nothing is persisted; callers recompute views whenever the list changes.

use crate::models::{Item, MainCategory};
use std::{cmp::Ordering, fmt, str::FromStr};

/// Field to sort the item table by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Name,
    CostPrice,
    SellingPrice,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "cost-price" | "cost" => Ok(Self::CostPrice),
            "selling-price" | "price" | "selling" => Ok(Self::SellingPrice),
            other => Err(format!(
                "unknown sort key '{other}' (expected name, cost-price or selling-price)"
            )),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Name => "name",
            Self::CostPrice => "cost-price",
            Self::SellingPrice => "selling-price",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            other => Err(format!("unknown sort order '{other}' (expected asc or desc)")),
        }
    }
}

/// Case-insensitive substring match on name or subcategory.
///
/// An empty (or all-whitespace) query matches every item.
#[must_use]
pub fn matches_query(item: &Item, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    needle.is_empty()
        || item.name.to_lowercase().contains(&needle)
        || item.sub_category.to_lowercase().contains(&needle)
}

/// Items matching `query`, in list order.
#[must_use]
pub fn search<'a>(items: &'a [Item], query: &str) -> Vec<&'a Item> {
    items.iter().filter(|item| matches_query(item, query)).collect()
}

fn compare(a: &Item, b: &Item, key: SortKey) -> Ordering {
    match key {
        SortKey::Name => a.name.cmp(&b.name),
        SortKey::CostPrice => a.cost_price.total_cmp(&b.cost_price),
        SortKey::SellingPrice => a.selling_price.total_cmp(&b.selling_price),
    }
}

/// Sorts in place. Names compare lexicographically, prices numerically.
///
/// The sort is stable in both directions: items with equal keys keep their
/// relative order.
pub fn sort_items(items: &mut [&Item], key: SortKey, order: SortOrder) {
    match order {
        SortOrder::Ascending => items.sort_by(|a, b| compare(a, b, key)),
        SortOrder::Descending => items.sort_by(|a, b| compare(b, a, key)),
    }
}

/// Search then optional sort, the table view the inventory screen shows.
#[must_use]
pub fn view<'a>(items: &'a [Item], query: &str, sort: Option<(SortKey, SortOrder)>) -> Vec<&'a Item> {
    let mut found = search(items, query);
    if let Some((key, order)) = sort {
        sort_items(&mut found, key, order);
    }
    found
}

/// Splits items into (drinks, food), keeping order within each group.
#[must_use]
pub fn partition<'a, I>(items: I) -> (Vec<&'a Item>, Vec<&'a Item>)
where
    I: IntoIterator<Item = &'a Item>,
{
    items.into_iter().partition(|item| item.main_category == MainCategory::Drinks)
}

/// Combined store + bar stock per subcategory of `category`.
///
/// Missing quantities count as zero. Subcategories appear in the order they are
/// first seen in `items`.
#[must_use]
pub fn subcategory_totals(items: &[Item], category: MainCategory) -> Vec<(String, u64)> {
    let mut totals: Vec<(String, u64)> = Vec::new();
    for item in items.iter().filter(|item| item.main_category == category) {
        match totals.iter_mut().find(|(name, _)| *name == item.sub_category) {
            Some((_, total)) => *total += item.total_quantity(),
            None => totals.push((item.sub_category.clone(), item.total_quantity())),
        }
    }
    totals
}

/// Drinks whose combined stock is at or below `threshold`, lowest first.
#[must_use]
pub fn low_stock(items: &[Item], threshold: u64) -> Vec<&Item> {
    let mut low: Vec<&Item> = items
        .iter()
        .filter(|item| item.is_drink() && item.total_quantity() <= threshold)
        .collect();
    low.sort_by_key(|item| item.total_quantity());
    low
}
