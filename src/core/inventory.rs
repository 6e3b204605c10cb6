//! Inventory state model - The in-memory item list and every mutation of it.
//!
//! Mutations follow one rule: local state changes only after the server confirms.
//! A failed request leaves the list exactly as it was, so no rollback is ever needed.
//!
//! The store → bar transfer is the one operation with a real invariant. Its
//! preconditions are checked against the local copy of the item and a violation is
//! rejected before any request is built. The update itself is a blind full-record
//! PUT with no version check: two concurrent transfers of the same item from
//! different sessions can both pass their local checks and the last write wins.
//! The API offers no compare-and-swap to close that window.

use crate::{
    api::ItemBackend,
    config::CategoryCatalog,
    errors::{Error, Result},
    models::{Item, ItemDraft, MainCategory},
};
use tracing::{info, warn};

/// Items loaded for one screen's lifetime
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Inventory {
    items: Vec<Item>,
}

impl Inventory {
    /// Wraps an already-fetched item list.
    #[must_use]
    pub const fn new(items: Vec<Item>) -> Self {
        Self { items }
    }

    /// Fetches the full item list from the server.
    ///
    /// # Errors
    /// Returns an error if the request fails.
    pub async fn load<B: ItemBackend + ?Sized>(backend: &B) -> Result<Self> {
        let items = backend.get_items().await?;
        info!("Loaded {} items", items.len());
        Ok(Self::new(items))
    }

    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    fn position(&self, id: &str) -> Result<usize> {
        self.items
            .iter()
            .position(|item| item.id == id)
            .ok_or_else(|| Error::ItemNotFound { id: id.to_string() })
    }

    /// Creates an item and appends the server's record to the list.
    ///
    /// The draft is checked the way the item form checks it (see [`prepare_draft`]).
    ///
    /// # Errors
    /// Returns a validation error for an invalid draft, or the request error.
    pub async fn add_item<B: ItemBackend + ?Sized>(
        &mut self,
        backend: &B,
        catalog: &CategoryCatalog,
        draft: ItemDraft,
    ) -> Result<&Item> {
        let draft = prepare_draft(catalog, draft)?;
        let created = backend.add_item(&draft).await?;
        info!("Added item '{}' ({})", created.name, created.id);
        self.items.push(created);
        Ok(&self.items[self.items.len() - 1])
    }

    /// Replaces an item with a full record (PUT semantics).
    ///
    /// The local entry becomes the server's echo when one is returned, otherwise the
    /// submitted record.
    ///
    /// # Errors
    /// Returns [`Error::ItemNotFound`] for an id not in the list, a validation error
    /// for an invalid record, or the request error.
    pub async fn edit_item<B: ItemBackend + ?Sized>(&mut self, backend: &B, item: Item) -> Result<&Item> {
        let index = self.position(&item.id)?;
        let item = prepare_record(item)?;

        let echo = backend.edit_item(&item).await?;
        self.items[index] = echo.unwrap_or(item);
        info!("Edited item {}", self.items[index].id);
        Ok(&self.items[index])
    }

    /// Deletes an item, removing it locally once the server confirms.
    ///
    /// # Errors
    /// Returns [`Error::ItemNotFound`] for an id not in the list, or the request error.
    pub async fn delete_item<B: ItemBackend + ?Sized>(&mut self, backend: &B, id: &str) -> Result<Item> {
        let index = self.position(id)?;
        backend.delete_item(id).await?;
        let removed = self.items.remove(index);
        info!("Deleted item '{}' ({})", removed.name, removed.id);
        Ok(removed)
    }

    /// Moves `quantity` units of an item from the store to the bar.
    ///
    /// Preconditions, checked in order, all before any request:
    /// 1. `quantity` is a positive whole number
    /// 2. the item is in the list
    /// 3. its store quantity is above zero
    /// 4. `quantity` does not exceed its store quantity
    ///
    /// On success both quantities are sent in one full-record PUT and the local entry
    /// is replaced only after the server accepts it.
    ///
    /// # Errors
    /// Returns [`Error::InvalidQuantity`], [`Error::ItemNotFound`],
    /// [`Error::StoreEmpty`] or [`Error::InsufficientStock`] without contacting the
    /// server, or the request error if the PUT fails.
    pub async fn transfer_to_bar<B: ItemBackend + ?Sized>(
        &mut self,
        backend: &B,
        id: &str,
        quantity: i64,
    ) -> Result<&Item> {
        if quantity <= 0 {
            warn!("Rejected bar transfer of {} units of {}", quantity, id);
            return Err(Error::InvalidQuantity { quantity });
        }
        let index = self.position(id)?;
        let updated = plan_transfer(&self.items[index], quantity)
            .inspect_err(|e| warn!("Rejected bar transfer: {}", e))?;

        backend.edit_item(&updated).await?;
        info!(
            "Moved {} x '{}' to bar (store {:?}, bar {:?})",
            quantity, updated.name, updated.store_quantity, updated.bar_quantity
        );
        self.items[index] = updated;
        Ok(&self.items[index])
    }
}

/// Computes the item after moving `quantity` units from store to bar.
///
/// Pure: the input is not modified and nothing is sent.
///
/// # Errors
/// Returns [`Error::InvalidQuantity`] for a non-positive quantity,
/// [`Error::StoreEmpty`] when nothing is in the store, or
/// [`Error::InsufficientStock`] when `quantity` exceeds the store quantity.
pub fn plan_transfer(item: &Item, quantity: i64) -> Result<Item> {
    if quantity <= 0 {
        return Err(Error::InvalidQuantity { quantity });
    }

    let available = item.store_quantity.unwrap_or(0);
    if available == 0 {
        return Err(Error::StoreEmpty {
            name: item.name.clone(),
        });
    }
    if quantity > i64::from(available) {
        return Err(Error::InsufficientStock {
            name: item.name.clone(),
            requested: quantity,
            available,
        });
    }

    // quantity is in 1..=available, so it fits in u32
    let moved = u32::try_from(quantity).map_err(|_| Error::InvalidQuantity { quantity })?;
    let bar = item
        .bar_quantity
        .unwrap_or(0)
        .checked_add(moved)
        .ok_or(Error::InvalidQuantity { quantity })?;

    let mut updated = item.clone();
    updated.store_quantity = Some(available - moved);
    updated.bar_quantity = Some(bar);
    Ok(updated)
}

fn check_price(amount: f64) -> Result<()> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(Error::InvalidAmount { amount });
    }
    Ok(())
}

fn check_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidInput {
            message: "Item name cannot be empty".to_string(),
        });
    }
    Ok(trimmed.to_string())
}

/// Applies the item form's constraints to a draft.
///
/// - the name is trimmed and must not be empty
/// - both prices must be finite and non-negative
/// - the subcategory must belong to the main category (spelling normalized to the
///   catalog's)
/// - food carries no quantities; drinks default missing quantities to zero
///
/// # Errors
/// Returns [`Error::InvalidInput`], [`Error::InvalidAmount`] or
/// [`Error::UnknownSubCategory`].
pub fn prepare_draft(catalog: &CategoryCatalog, draft: ItemDraft) -> Result<ItemDraft> {
    let name = check_name(&draft.name)?;
    check_price(draft.cost_price)?;
    check_price(draft.selling_price)?;

    let sub_category = catalog
        .resolve(draft.main_category, &draft.sub_category)
        .ok_or_else(|| Error::UnknownSubCategory {
            main_category: draft.main_category.to_string(),
            sub_category: draft.sub_category.clone(),
        })?
        .to_string();

    let (store_quantity, bar_quantity) = match draft.main_category {
        MainCategory::Food => (None, None),
        MainCategory::Drinks => (
            Some(draft.store_quantity.unwrap_or(0)),
            Some(draft.bar_quantity.unwrap_or(0)),
        ),
    };

    Ok(ItemDraft {
        name,
        sub_category,
        store_quantity,
        bar_quantity,
        ..draft
    })
}

/// Same constraints as [`prepare_draft`] for an existing record, minus the catalog
/// check: stored items may predate the current catalog.
fn prepare_record(item: Item) -> Result<Item> {
    let name = check_name(&item.name)?;
    check_price(item.cost_price)?;
    check_price(item.selling_price)?;

    let (store_quantity, bar_quantity) = match item.main_category {
        MainCategory::Food => (None, None),
        MainCategory::Drinks => (
            Some(item.store_quantity.unwrap_or(0)),
            Some(item.bar_quantity.unwrap_or(0)),
        ),
    };

    Ok(Item {
        name,
        store_quantity,
        bar_quantity,
        ..item
    })
}
