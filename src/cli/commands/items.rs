//! Item commands - list, show, add, edit, delete, transfer and low-stock.

use super::{item_table, stock_line};
use crate::{
    api::ItemBackend,
    config::CategoryCatalog,
    core::{
        inventory::Inventory,
        query::{self, SortKey, SortOrder},
    },
    errors::{Error, Result},
    models::{ItemDraft, MainCategory},
};

/// Optional field changes for `items edit`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemChanges {
    pub name: Option<String>,
    pub sub_category: Option<String>,
    pub cost_price: Option<f64>,
    pub selling_price: Option<f64>,
    pub store_quantity: Option<u32>,
    pub bar_quantity: Option<u32>,
}

/// Lists items, optionally filtered by category and search text and sorted.
pub async fn list<B: ItemBackend + ?Sized>(
    backend: &B,
    search: &str,
    category: Option<MainCategory>,
    sort: Option<(SortKey, SortOrder)>,
) -> Result<String> {
    let inventory = Inventory::load(backend).await?;
    let mut rows = query::view(inventory.items(), search, sort);
    if let Some(category) = category {
        rows.retain(|item| item.main_category == category);
    }
    item_table(&rows)
}

/// Shows one item as the server currently has it.
pub async fn show<B: ItemBackend + ?Sized>(backend: &B, id: &str) -> Result<String> {
    let item = backend.get_item_by_id(id).await?;
    item_table(&[&item])
}

/// Creates an item from command-line fields.
pub async fn add<B: ItemBackend + ?Sized>(
    backend: &B,
    catalog: &CategoryCatalog,
    draft: ItemDraft,
) -> Result<String> {
    let mut inventory = Inventory::new(Vec::new());
    let item = inventory.add_item(backend, catalog, draft).await?;
    Ok(format!("Item '{}' added with id {}", item.name, item.id))
}

/// Applies `changes` on top of the stored record and sends the full record.
pub async fn edit<B: ItemBackend + ?Sized>(backend: &B, id: &str, changes: ItemChanges) -> Result<String> {
    let mut inventory = Inventory::load(backend).await?;
    let mut item = inventory
        .get(id)
        .cloned()
        .ok_or_else(|| Error::ItemNotFound { id: id.to_string() })?;

    if let Some(name) = changes.name {
        item.name = name;
    }
    if let Some(sub_category) = changes.sub_category {
        item.sub_category = sub_category;
    }
    if let Some(cost_price) = changes.cost_price {
        item.cost_price = cost_price;
    }
    if let Some(selling_price) = changes.selling_price {
        item.selling_price = selling_price;
    }
    if item.is_drink() {
        if let Some(store) = changes.store_quantity {
            item.store_quantity = Some(store);
        }
        if let Some(bar) = changes.bar_quantity {
            item.bar_quantity = Some(bar);
        }
    }

    let item = inventory.edit_item(backend, item).await?;
    Ok(format!("Item '{}' updated", item.name))
}

pub async fn delete<B: ItemBackend + ?Sized>(backend: &B, id: &str) -> Result<String> {
    let mut inventory = Inventory::load(backend).await?;
    let removed = inventory.delete_item(backend, id).await?;
    Ok(format!("Item '{}' deleted", removed.name))
}

/// Moves stock from the store to the bar.
pub async fn transfer<B: ItemBackend + ?Sized>(backend: &B, id: &str, quantity: i64) -> Result<String> {
    let mut inventory = Inventory::load(backend).await?;
    let item = inventory.transfer_to_bar(backend, id, quantity).await?;
    Ok(format!("Moved {quantity} to bar. {}", stock_line(item)))
}

/// Drinks at or below `threshold` units in total.
pub async fn low_stock<B: ItemBackend + ?Sized>(backend: &B, threshold: u64) -> Result<String> {
    let inventory = Inventory::load(backend).await?;
    let low = query::low_stock(inventory.items(), threshold);
    if low.is_empty() {
        return Ok(format!("No drinks at or below {threshold} units."));
    }
    item_table(&low)
}
