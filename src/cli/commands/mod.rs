//! Command handlers - One function per CLI action.
//!
//! Handlers drive the core state models against any backend and return the text to
//! print, so they run the same against the HTTP client and the in-memory test backend.

/// login, logout, whoami and dashboard
pub mod general;
/// `items` subcommands
pub mod items;
/// `sales` subcommands
pub mod sales;
/// `users` subcommands
pub mod users;

use crate::{core::report::format_amount, errors::Result, models::Item};
use std::fmt::Write;

fn quantity_cell(quantity: Option<u32>) -> String {
    quantity.map_or_else(|| "-".to_string(), |q| q.to_string())
}

/// Renders items as a fixed-width table, one row per item.
pub(crate) fn item_table(items: &[&Item]) -> Result<String> {
    if items.is_empty() {
        return Ok("No items found.".to_string());
    }

    let mut out = format!(
        "{:<26} {:<24} {:<8} {:<12} {:>12} {:>12} {:>6} {:>6}\n",
        "ID", "Name", "Category", "Subcategory", "Cost", "Price", "Store", "Bar"
    );
    for item in items {
        writeln!(
            out,
            "{:<26} {:<24} {:<8} {:<12} {:>12} {:>12} {:>6} {:>6}",
            item.id,
            item.name,
            item.main_category,
            item.sub_category,
            format_amount(item.cost_price),
            format_amount(item.selling_price),
            quantity_cell(item.store_quantity),
            quantity_cell(item.bar_quantity),
        )?;
    }
    out.truncate(out.trim_end().len());
    Ok(out)
}

/// One-line description of an item's stock
pub(crate) fn stock_line(item: &Item) -> String {
    format!(
        "'{}': store {}, bar {}",
        item.name,
        quantity_cell(item.store_quantity),
        quantity_cell(item.bar_quantity)
    )
}
