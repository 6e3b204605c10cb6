//! Sales commands - record a sale, browse the log, show and delete entries.

use crate::{
    api::{ItemBackend, SalesBackend, UserBackend},
    core::{
        inventory::Inventory,
        report::format_amount,
        sales::{Cart, SalesLog, sale_detail},
    },
    errors::{Error, Result},
};
use chrono::NaiveDate;
use std::fmt::Write;

/// Splits an `ITEM_ID:QTY` argument. The quantity keeps the cart's parsing rules.
pub fn parse_line_arg(arg: &str) -> Result<(&str, &str)> {
    arg.rsplit_once(':')
        .filter(|(id, _)| !id.trim().is_empty())
        .map(|(id, quantity)| (id.trim(), quantity))
        .ok_or_else(|| Error::InvalidInput {
            message: format!("Expected ITEM_ID:QUANTITY, got '{arg}'"),
        })
}

/// Builds a cart from `ITEM_ID:QTY` arguments and submits it for `user_id`.
///
/// A missing seller is rejected before anything is fetched.
pub async fn record<B>(backend: &B, user_id: Option<&str>, lines: &[String]) -> Result<String>
where
    B: ItemBackend + SalesBackend + UserBackend + ?Sized,
{
    let user_id = user_id
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or(Error::NoUserSelected)?;
    let inventory = Inventory::load(backend).await?;
    let users = backend.get_users().await?;

    let mut cart = Cart::new();
    cart.select_user(user_id);
    for arg in lines {
        let (id, quantity) = parse_line_arg(arg)?;
        let item = inventory
            .get(id)
            .cloned()
            .ok_or_else(|| Error::ItemNotFound { id: id.to_string() })?;
        let index = cart.add_line(inventory.items());
        cart.select_item(index, item)?;
        cart.set_quantity(index, quantity)?;
    }

    let sale = cart.submit(backend, &users).await?;
    Ok(format!(
        "Sales recorded: {} line(s) by {}, total {}",
        sale.sales.len(),
        sale.user,
        format_amount(sale.total)
    ))
}

/// Lists sales recorded between `from` and `to` (inclusive, either open-ended).
pub async fn log<B: SalesBackend + ?Sized>(
    backend: &B,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Result<String> {
    let log = SalesLog::load(backend).await?;
    let sales = log.between(from.unwrap_or(NaiveDate::MIN), to.unwrap_or(NaiveDate::MAX));
    if sales.is_empty() {
        return Ok("No sales found.".to_string());
    }

    let mut out = format!(
        "{:<26} {:<17} {:<20} {:>5} {:>12}\n",
        "ID", "Time", "Seller", "Lines", "Total"
    );
    for sale in &sales {
        writeln!(
            out,
            "{:<26} {:<17} {:<20} {:>5} {:>12}",
            sale.id,
            sale.time_added.format("%Y-%m-%d %H:%M"),
            sale.user,
            sale.sales.len(),
            format_amount(sale.total)
        )?;
    }
    write!(
        out,
        "{} sale(s), revenue {}",
        sales.len(),
        format_amount(SalesLog::revenue(&sales))
    )?;
    Ok(out)
}

/// Shows one sale with its lines resolved against the current items.
pub async fn show<B>(backend: &B, id: &str) -> Result<String>
where
    B: SalesBackend + ItemBackend + ?Sized,
{
    let detail = sale_detail(backend, id).await?;
    let sale = &detail.sale;

    let mut out = format!(
        "Sale {} by {} at {}\n",
        sale.id,
        sale.user,
        sale.time_added.format("%Y-%m-%d %H:%M")
    );
    for (index, line) in sale.sales.iter().enumerate() {
        let name = detail.line_name(index).unwrap_or("(deleted item)");
        writeln!(out, "  {:>4} x {}", line.quantity, name)?;
    }
    write!(out, "Total: {}", format_amount(sale.total))?;
    Ok(out)
}

pub async fn delete<B: SalesBackend + ?Sized>(backend: &B, id: &str) -> Result<String> {
    let mut log = SalesLog::load(backend).await?;
    let removed = log.delete(backend, id).await?;
    Ok(format!("Sale {} deleted", removed.id))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::models::{ItemRef, ItemSnapshot, Position, SaleLine, SaleRecord};
    use crate::test_utils::*;
    use chrono::{TimeZone, Utc};

    fn sale(id: &str, day: u32, total: f64) -> SaleRecord {
        SaleRecord {
            id: id.to_string(),
            user: "Ada".to_string(),
            sales: vec![SaleLine {
                item: ItemRef::Snapshot(ItemSnapshot {
                    id: "a1".to_string(),
                    name: "Star".to_string(),
                }),
                quantity: 2,
            }],
            total,
            time_added: Utc.with_ymd_and_hms(2024, 5, day, 20, 15, 0).unwrap(),
        }
    }

    #[test]
    fn test_parse_line_arg() {
        assert_eq!(parse_line_arg("a1:3").unwrap(), ("a1", "3"));
        assert_eq!(parse_line_arg("a1:x").unwrap(), ("a1", "x"));
        assert!(parse_line_arg("a1").is_err());
        assert!(parse_line_arg(":3").is_err());
    }

    #[tokio::test]
    async fn test_record_submits_cart() -> Result<()> {
        let backend = FakeBackend::new()
            .with_items(vec![
                priced_item("a", "Malt", 60.0, 100.0),
                priced_item("b", "Water", 20.0, 50.0),
            ])
            .with_users(vec![sample_user("u1", "Ada", Position::BarMan)]);

        let lines = vec!["a:2".to_string(), "b:3".to_string()];
        let out = record(&backend, Some("u1"), &lines).await?;
        assert_eq!(out, "Sales recorded: 2 line(s) by Ada, total 350.00");

        let submitted = backend.submitted.lock().unwrap();
        assert_eq!(submitted[0].sales[0].item.name, "Malt");
        Ok(())
    }

    #[tokio::test]
    async fn test_record_without_user_is_rejected() {
        let backend = FakeBackend::new().with_items(vec![priced_item("a", "Malt", 60.0, 100.0)]);
        let err = record(&backend, None, &["a:1".to_string()]).await.unwrap_err();
        assert_eq!(err.user_message(), "Please select a user");
        assert!(backend.submitted.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_record_checks_user_before_loading() {
        let backend = FakeBackend::new();
        for user_id in [None, Some("  ")] {
            let err = record(&backend, user_id, &["zz:1".to_string()]).await.unwrap_err();
            assert!(matches!(err, Error::NoUserSelected));
        }
        assert_eq!(backend.call_count(), 0);
    }

    #[tokio::test]
    async fn test_record_unknown_item() {
        let backend = FakeBackend::new();
        let err = record(&backend, Some("u1"), &["zz:1".to_string()]).await.unwrap_err();
        assert!(matches!(err, Error::ItemNotFound { .. }));
    }

    #[tokio::test]
    async fn test_log_filters_by_date() -> Result<()> {
        let backend = FakeBackend::new().with_sales(vec![sale("s1", 1, 1600.0), sale("s2", 3, 800.0)]);

        let out = log(&backend, NaiveDate::from_ymd_opt(2024, 5, 2), None).await?;
        assert!(out.contains("s2"));
        assert!(!out.contains("s1"));
        assert!(out.ends_with("1 sale(s), revenue 800.00"));

        let out = log(&backend, None, NaiveDate::from_ymd_opt(2024, 4, 30)).await?;
        assert_eq!(out, "No sales found.");
        Ok(())
    }

    #[tokio::test]
    async fn test_show_and_delete() -> Result<()> {
        let backend = FakeBackend::new().with_sales(vec![sale("s1", 1, 1600.0)]);

        let out = show(&backend, "s1").await?;
        assert!(out.starts_with("Sale s1 by Ada at 2024-05-01 20:15"));
        // The item is gone from the catalog, so the snapshot name is used
        assert!(out.contains("2 x Star"));
        assert!(out.ends_with("Total: 1,600.00"));

        assert_eq!(delete(&backend, "s1").await?, "Sale s1 deleted");
        assert!(backend.sales.lock().unwrap().is_empty());
        Ok(())
    }
}
