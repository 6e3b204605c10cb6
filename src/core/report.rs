//! Dashboard report business logic.
//!
//! This module turns the item and user lists into the figures the dashboard shows:
//! head counts, total drink stock and per-subcategory stock. All functions are pure
//! and return structured data that the CLI layer formats.

use crate::{
    core::query::subcategory_totals,
    models::{Item, MainCategory, User},
};

/// Figures shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DashboardSummary {
    /// Active non-admin users
    pub active_users: usize,
    /// Disabled non-admin users
    pub inactive_users: usize,
    /// Store + bar units across every drink
    pub drink_stock: u64,
    /// Store + bar units per drink subcategory, in first-appearance order
    pub drink_subcategories: Vec<(String, u64)>,
    /// Per food subcategory, always zero while food carries no quantities
    pub food_subcategories: Vec<(String, u64)>,
}

impl DashboardSummary {
    /// Builds the summary from freshly loaded lists.
    ///
    /// Admin accounts are excluded from the head counts, matching the user listing.
    #[must_use]
    pub fn build(items: &[Item], users: &[User]) -> Self {
        let listed = users.iter().filter(|user| !user.is_admin());
        let active_users = listed.clone().filter(|user| user.active).count();
        let inactive_users = listed.filter(|user| !user.active).count();

        let drink_subcategories = subcategory_totals(items, MainCategory::Drinks);
        let drink_stock = drink_subcategories.iter().map(|(_, total)| total).sum();

        Self {
            active_users,
            inactive_users,
            drink_stock,
            drink_subcategories,
            food_subcategories: subcategory_totals(items, MainCategory::Food),
        }
    }
}

/// Share of `part` in `whole` as a percentage, 0 when `whole` is 0.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn stock_share(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }

    (part as f64 / whole as f64) * 100.0
}

/// Text bar for a percentage, like `[████████░░] 80.0%`.
#[must_use]
pub fn format_share_bar(percent: f64, bar_length: Option<usize>) -> String {
    let length = bar_length.unwrap_or(10);
    let clamped = percent.clamp(0.0, 100.0);

    // clamped ∈ [0, 100] so the product is in [0, length]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    let filled = ((clamped / 100.0) * length as f64).round() as usize;
    let empty = length.saturating_sub(filled);

    format!("[{}{}] {percent:.1}%", "█".repeat(filled), "░".repeat(empty))
}

/// Formats a price or sale total with two decimals and thousands separators.
#[must_use]
pub fn format_amount(amount: f64) -> String {
    let formatted = format!("{:.2}", amount.abs());
    let (whole, fraction) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{sign}{grouped}.{fraction}")
}
