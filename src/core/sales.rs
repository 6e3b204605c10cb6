//! Sales business logic - The sales-entry cart and the sales log.
//!
//! The cart is an ordered list of lines edited by index. Submitting it produces an
//! immutable sale: the seller's name and each item's id and name are copied into
//! the record so later renames or price changes never alter history. Stock levels
//! are not checked here; overselling is left to the server.

use crate::{
    api::{ItemBackend, SalesBackend},
    errors::{Error, ErrorKind, Result},
    models::{Item, ItemSnapshot, NewSale, NewSaleLine, SaleRecord, User},
};
use chrono::NaiveDate;
use tracing::{info, warn};

/// Seller name recorded when the selected user id is not in the list
pub const UNKNOWN_SELLER: &str = "Unknown";

/// One cart line
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartLine {
    /// Item being sold, `None` until one is picked
    pub item: Option<Item>,
    /// Units sold
    pub quantity: i64,
}

impl CartLine {
    /// quantity × selling price, with a missing item counted as zero
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn line_total(&self) -> f64 {
        self.item
            .as_ref()
            .map_or(0.0, |item| self.quantity as f64 * item.selling_price)
    }
}

/// Sales-entry state: selected seller plus cart lines
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    selected_user: Option<String>,
    lines: Vec<CartLine>,
}

impl Cart {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn selected_user(&self) -> Option<&str> {
        self.selected_user.as_deref()
    }

    /// Selects the seller by user id. A blank id clears the selection.
    pub fn select_user(&mut self, user_id: &str) {
        let trimmed = user_id.trim();
        self.selected_user = (!trimmed.is_empty()).then(|| trimmed.to_string());
    }

    pub fn clear_user(&mut self) {
        self.selected_user = None;
    }

    /// Appends a line preset to the first available item with quantity 0.
    pub fn add_line(&mut self, available: &[Item]) -> usize {
        self.lines.push(CartLine {
            item: available.first().cloned(),
            quantity: 0,
        });
        self.lines.len() - 1
    }

    fn line_mut(&mut self, index: usize) -> Result<&mut CartLine> {
        self.lines
            .get_mut(index)
            .ok_or(Error::LineOutOfRange { index })
    }

    /// Points a line at a different item and resets its quantity to 0.
    ///
    /// # Errors
    /// Returns [`Error::LineOutOfRange`] for an unknown index.
    pub fn select_item(&mut self, index: usize, item: Item) -> Result<()> {
        let line = self.line_mut(index)?;
        line.item = Some(item);
        line.quantity = 0;
        Ok(())
    }

    /// Sets a line's quantity from raw input. Unparseable input becomes 0.
    ///
    /// # Errors
    /// Returns [`Error::LineOutOfRange`] for an unknown index.
    pub fn set_quantity(&mut self, index: usize, input: &str) -> Result<i64> {
        let quantity = parse_quantity(input);
        self.line_mut(index)?.quantity = quantity;
        Ok(quantity)
    }

    /// Removes a line; later lines shift down by one.
    ///
    /// # Errors
    /// Returns [`Error::LineOutOfRange`] for an unknown index.
    pub fn remove_line(&mut self, index: usize) -> Result<CartLine> {
        if index >= self.lines.len() {
            return Err(Error::LineOutOfRange { index });
        }
        Ok(self.lines.remove(index))
    }

    /// Σ quantity × selling price. An empty cart totals 0.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Checks the cart and builds the sale it would submit.
    ///
    /// Checks run in order and the first failure wins:
    /// 1. a seller is selected
    /// 2. no line has a negative quantity
    /// 3. the cart has at least one line
    /// 4. every line has an item
    ///
    /// # Errors
    /// Returns [`Error::NoUserSelected`], [`Error::NegativeQuantity`],
    /// [`Error::EmptyCart`] or [`Error::LineWithoutItem`].
    pub fn build_sale(&self, users: &[User]) -> Result<NewSale> {
        let user_id = self.selected_user.as_deref().ok_or(Error::NoUserSelected)?;

        if let Some(index) = self.lines.iter().position(|line| line.quantity < 0) {
            return Err(Error::NegativeQuantity { index });
        }
        if self.lines.is_empty() {
            return Err(Error::EmptyCart);
        }

        let sales = self
            .lines
            .iter()
            .enumerate()
            .map(|(index, line)| {
                let item = line.item.as_ref().ok_or(Error::LineWithoutItem { index })?;
                Ok(NewSaleLine {
                    item: ItemSnapshot {
                        id: item.id.clone(),
                        name: item.name.clone(),
                    },
                    quantity: line.quantity,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let user = users
            .iter()
            .find(|user| user.id == user_id)
            .map_or_else(|| UNKNOWN_SELLER.to_string(), |user| user.name.clone());

        Ok(NewSale {
            user,
            sales,
            total: self.total(),
        })
    }

    /// Validates and submits the cart, then clears it and the seller selection.
    ///
    /// Validation failures are raised before any request. If the request fails
    /// the cart is left as it was.
    ///
    /// # Errors
    /// Returns any error from [`Cart::build_sale`], or the request error.
    pub async fn submit<B: SalesBackend + ?Sized>(&mut self, backend: &B, users: &[User]) -> Result<NewSale> {
        let sale = self
            .build_sale(users)
            .inspect_err(|e| warn!("Rejected sale: {}", e))?;

        backend.enter_sales(&sale).await?;
        info!(
            "Recorded sale of {} lines for {} (total {})",
            sale.sales.len(),
            sale.user,
            sale.total
        );
        self.lines.clear();
        self.selected_user = None;
        Ok(sale)
    }
}

/// Parses the leading whole number of a quantity field, so `"2.5"` reads as 2 and
/// `"3 crates"` as 3. Input without leading digits becomes 0.
#[must_use]
pub fn parse_quantity(input: &str) -> i64 {
    let trimmed = input.trim_start();
    let sign_len = usize::from(trimmed.starts_with(['-', '+']));
    let digits_len = trimmed[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    trimmed[..sign_len + digits_len].parse().unwrap_or(0)
}

/// A stored sale with each line's item resolved against the current catalog
#[derive(Debug, Clone, PartialEq)]
pub struct SaleDetail {
    pub sale: SaleRecord,
    /// Current item per line, `None` when the item no longer exists
    pub items: Vec<Option<Item>>,
}

impl SaleDetail {
    /// Display name for line `index`: the resolved item's name, else the snapshot.
    #[must_use]
    pub fn line_name(&self, index: usize) -> Option<&str> {
        self.items
            .get(index)
            .and_then(Option::as_ref)
            .map(|item| item.name.as_str())
            .or_else(|| self.sale.sales.get(index).and_then(|line| line.item.name()))
    }
}

/// Sales log loaded for one screen's lifetime
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SalesLog {
    sales: Vec<SaleRecord>,
}

impl SalesLog {
    #[must_use]
    pub const fn new(sales: Vec<SaleRecord>) -> Self {
        Self { sales }
    }

    /// Fetches every recorded sale.
    ///
    /// # Errors
    /// Returns an error if the request fails.
    pub async fn load<B: SalesBackend + ?Sized>(backend: &B) -> Result<Self> {
        let sales = backend.get_sales().await?;
        info!("Loaded {} sales", sales.len());
        Ok(Self::new(sales))
    }

    #[must_use]
    pub fn sales(&self) -> &[SaleRecord] {
        &self.sales
    }

    /// Sales recorded on calendar days `start..=end` (UTC).
    #[must_use]
    pub fn between(&self, start: NaiveDate, end: NaiveDate) -> Vec<&SaleRecord> {
        self.sales
            .iter()
            .filter(|sale| {
                let day = sale.time_added.date_naive();
                day >= start && day <= end
            })
            .collect()
    }

    /// Sum of the recorded totals of `sales`
    #[must_use]
    pub fn revenue(sales: &[&SaleRecord]) -> f64 {
        sales.iter().map(|sale| sale.total).sum()
    }

    /// Deletes a sale, removing it locally once the server confirms.
    ///
    /// # Errors
    /// Returns [`Error::SaleNotFound`] for an id not in the log, or the request error.
    pub async fn delete<B: SalesBackend + ?Sized>(&mut self, backend: &B, id: &str) -> Result<SaleRecord> {
        let index = self
            .sales
            .iter()
            .position(|sale| sale.id == id)
            .ok_or_else(|| Error::SaleNotFound { id: id.to_string() })?;
        backend.delete_sale(id).await?;
        info!("Deleted sale {}", id);
        Ok(self.sales.remove(index))
    }
}

/// Fetches one sale and resolves each line's item, one request at a time.
///
/// A line whose item the server no longer knows resolves to `None`; transport and
/// other local failures abort the lookup.
///
/// # Errors
/// Returns the error of the sale lookup, or of an item lookup that failed for a
/// reason other than the server rejecting it.
pub async fn sale_detail<B>(backend: &B, id: &str) -> Result<SaleDetail>
where
    B: SalesBackend + ItemBackend + ?Sized,
{
    let sale = backend.get_sale_by_id(id).await?;

    let mut items = Vec::with_capacity(sale.sales.len());
    for line in &sale.sales {
        match backend.get_item_by_id(line.item.id()).await {
            Ok(item) => items.push(Some(item)),
            Err(e) if e.kind() == ErrorKind::Server => {
                warn!("Item {} of sale {} could not be resolved: {}", line.item.id(), id, e);
                items.push(None);
            }
            Err(e) => return Err(e),
        }
    }

    Ok(SaleDetail { sale, items })
}
