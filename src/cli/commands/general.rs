//! General commands - sign-in state and the dashboard.

use super::item_table;
use crate::{
    api::{AuthBackend, ItemBackend, Session, UserBackend},
    config::session::save_session,
    core::{
        auth,
        query::low_stock,
        report::{DashboardSummary, format_share_bar, stock_share},
    },
    errors::{Error, Result},
};
use std::{fmt::Write, path::Path};

/// Signs in and stores the token for later invocations.
pub async fn login<B: AuthBackend + ?Sized>(
    backend: &B,
    session_path: &Path,
    username: &str,
    password: &str,
) -> Result<String> {
    let session = auth::login(backend, username, password).await?;
    let token = session.token().ok_or(Error::NotSignedIn)?;
    save_session(session_path, token)?;
    Ok(format!("Signed in as {}", username.trim()))
}

pub fn logout(session_path: &Path) -> Result<String> {
    auth::sign_out(session_path)?;
    Ok("Signed out".to_string())
}

/// Reports the sign-in state and the server's authorization hint.
pub async fn whoami<B: AuthBackend + ?Sized>(backend: &B, session: &Session) -> Result<String> {
    if !session.is_signed_in() {
        return Err(Error::NotSignedIn);
    }
    let access = if auth::is_authorized(backend).await? {
        "manager access"
    } else {
        "standard access"
    };
    Ok(format!("Signed in ({access})"))
}

/// Head counts, drink stock by subcategory, food subcategories and low-stock drinks.
pub async fn dashboard<B>(backend: &B, low_stock_threshold: u64) -> Result<String>
where
    B: ItemBackend + UserBackend + ?Sized,
{
    let items = backend.get_items().await?;
    let users = backend.get_users().await?;
    let summary = DashboardSummary::build(&items, &users);

    let mut out = format!(
        "Users: {} active, {} disabled\nDrinks in stock: {}\n",
        summary.active_users, summary.inactive_users, summary.drink_stock
    );
    for (sub_category, total) in &summary.drink_subcategories {
        let share = stock_share(*total, summary.drink_stock);
        writeln!(
            out,
            "  {sub_category:<12} {total:>6} {}",
            format_share_bar(share, None)
        )?;
    }
    if !summary.food_subcategories.is_empty() {
        let names: Vec<&str> = summary
            .food_subcategories
            .iter()
            .map(|(name, _)| name.as_str())
            .collect();
        writeln!(out, "Food: {}", names.join(", "))?;
    }

    let low = low_stock(&items, low_stock_threshold);
    if low.is_empty() {
        write!(out, "No drinks at or below {low_stock_threshold} units.")?;
    } else {
        write!(
            out,
            "Low stock (at or below {low_stock_threshold}):\n{}",
            item_table(&low)?
        )?;
    }
    Ok(out)
}
