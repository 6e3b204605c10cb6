//! Shared test utilities for barstock.
//!
//! [`FakeBackend`] implements every backend trait in memory and records each call
//! it receives, so tests can assert both the resulting state and whether a request
//! was issued at all. The `sample_*` helpers build records with sensible defaults.

#![allow(clippy::unwrap_used)]

use crate::{
    api::{AuthBackend, ItemBackend, SalesBackend, UserBackend},
    errors::{Error, Result},
    models::{
        Item, ItemDraft, LoginResponse, MainCategory, NewSale, NewUser, Position, SaleRecord,
        User, UserType, UserUpdate,
    },
};
use async_trait::async_trait;
use std::sync::Mutex;

/// In-memory backend that records calls
#[derive(Debug, Default)]
pub struct FakeBackend {
    pub items: Mutex<Vec<Item>>,
    pub users: Mutex<Vec<User>>,
    pub sales: Mutex<Vec<SaleRecord>>,
    pub submitted: Mutex<Vec<NewSale>>,
    pub edits: Mutex<Vec<UserUpdate>>,
    calls: Mutex<Vec<&'static str>>,
    failure: Mutex<Option<(u16, String)>>,
    authorized: bool,
    disabled_login: bool,
    echo_edits: bool,
}

impl FakeBackend {
    #[must_use]
    pub fn new() -> Self {
        Self {
            echo_edits: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_items(self, items: Vec<Item>) -> Self {
        *self.items.lock().unwrap() = items;
        self
    }

    #[must_use]
    pub fn with_users(self, users: Vec<User>) -> Self {
        *self.users.lock().unwrap() = users;
        self
    }

    #[must_use]
    pub fn with_sales(self, sales: Vec<SaleRecord>) -> Self {
        *self.sales.lock().unwrap() = sales;
        self
    }

    #[must_use]
    pub const fn authorized(mut self, authorized: bool) -> Self {
        self.authorized = authorized;
        self
    }

    /// Makes `login` answer with `status: false`.
    #[must_use]
    pub const fn disabled_login(mut self) -> Self {
        self.disabled_login = true;
        self
    }

    /// Makes `edit_item` answer without echoing the record.
    #[must_use]
    pub const fn without_edit_echo(mut self) -> Self {
        self.echo_edits = false;
        self
    }

    /// Fails the next call with a server error.
    pub fn fail_next(&self, status: u16, message: &str) {
        *self.failure.lock().unwrap() = Some((status, message.to_string()));
    }

    /// Names of the operations received so far, in order
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn record(&self, name: &'static str) -> Result<()> {
        self.calls.lock().unwrap().push(name);
        match self.failure.lock().unwrap().take() {
            Some((status, message)) => Err(Error::Request { status, message }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl AuthBackend for FakeBackend {
    async fn login(&self, username: &str, password: &str) -> Result<LoginResponse> {
        self.record("login")?;
        if password.is_empty() {
            return Err(Error::Request {
                status: 401,
                message: "Invalid credentials".to_string(),
            });
        }
        Ok(LoginResponse {
            token: Some(format!("token-for-{username}")),
            status: !self.disabled_login,
        })
    }

    async fn user_type(&self) -> Result<UserType> {
        self.record("user_type")?;
        Ok(UserType {
            authorized_user: self.authorized,
        })
    }
}

#[async_trait]
impl ItemBackend for FakeBackend {
    async fn get_items(&self) -> Result<Vec<Item>> {
        self.record("get_items")?;
        Ok(self.items.lock().unwrap().clone())
    }

    async fn add_item(&self, draft: &ItemDraft) -> Result<Item> {
        self.record("add_item")?;
        let mut items = self.items.lock().unwrap();
        let item = Item {
            id: format!("item-{}", items.len() + 1),
            name: draft.name.clone(),
            main_category: draft.main_category,
            sub_category: draft.sub_category.clone(),
            cost_price: draft.cost_price,
            selling_price: draft.selling_price,
            store_quantity: draft.store_quantity,
            bar_quantity: draft.bar_quantity,
        };
        items.push(item.clone());
        Ok(item)
    }

    async fn edit_item(&self, item: &Item) -> Result<Option<Item>> {
        self.record("edit_item")?;
        let mut items = self.items.lock().unwrap();
        if let Some(stored) = items.iter_mut().find(|i| i.id == item.id) {
            *stored = item.clone();
        }
        Ok(self.echo_edits.then(|| item.clone()))
    }

    async fn delete_item(&self, id: &str) -> Result<()> {
        self.record("delete_item")?;
        self.items.lock().unwrap().retain(|i| i.id != id);
        Ok(())
    }

    async fn get_item_by_id(&self, id: &str) -> Result<Item> {
        self.record("get_item_by_id")?;
        self.items
            .lock()
            .unwrap()
            .iter()
            .find(|i| i.id == id)
            .cloned()
            .ok_or_else(|| Error::Request {
                status: 404,
                message: "Item not found".to_string(),
            })
    }
}

#[async_trait]
impl SalesBackend for FakeBackend {
    async fn enter_sales(&self, sale: &NewSale) -> Result<()> {
        self.record("enter_sales")?;
        self.submitted.lock().unwrap().push(sale.clone());
        Ok(())
    }

    async fn get_sales(&self) -> Result<Vec<SaleRecord>> {
        self.record("get_sales")?;
        Ok(self.sales.lock().unwrap().clone())
    }

    async fn get_sale_by_id(&self, id: &str) -> Result<SaleRecord> {
        self.record("get_sale_by_id")?;
        self.sales
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| Error::Request {
                status: 404,
                message: "Sale not found".to_string(),
            })
    }

    async fn delete_sale(&self, id: &str) -> Result<()> {
        self.record("delete_sale")?;
        self.sales.lock().unwrap().retain(|s| s.id != id);
        Ok(())
    }
}

#[async_trait]
impl UserBackend for FakeBackend {
    async fn get_users(&self) -> Result<Vec<User>> {
        self.record("get_users")?;
        Ok(self.users.lock().unwrap().clone())
    }

    async fn create_user(&self, user: &NewUser) -> Result<User> {
        self.record("create_user")?;
        let mut users = self.users.lock().unwrap();
        let created = User {
            id: format!("user-{}", users.len() + 1),
            name: user.name.clone(),
            username: user.username.clone(),
            position: user.position,
            active: true,
        };
        users.push(created.clone());
        Ok(created)
    }

    async fn edit_user(&self, update: &UserUpdate) -> Result<()> {
        self.record("edit_user")?;
        self.edits.lock().unwrap().push(update.clone());
        Ok(())
    }

    async fn delete_user(&self, id: &str) -> Result<()> {
        self.record("delete_user")?;
        self.users.lock().unwrap().retain(|u| u.id != id);
        Ok(())
    }

    async fn set_user_status(&self, id: &str, active: bool) -> Result<()> {
        self.record("set_user_status")?;
        if let Some(user) = self.users.lock().unwrap().iter_mut().find(|u| u.id == id) {
            user.active = active;
        }
        Ok(())
    }
}

/// Creates a drink with the given stock split.
///
/// # Defaults
/// * subcategory: "Beer"
/// * cost price: 500.0, selling price: 800.0
pub fn sample_drink(id: &str, name: &str, store: u32, bar: u32) -> Item {
    Item {
        id: id.to_string(),
        name: name.to_string(),
        main_category: MainCategory::Drinks,
        sub_category: "Beer".to_string(),
        cost_price: 500.0,
        selling_price: 800.0,
        store_quantity: Some(store),
        bar_quantity: Some(bar),
    }
}

/// Creates a food item (no quantities).
pub fn sample_food(id: &str, name: &str, selling_price: f64) -> Item {
    Item {
        id: id.to_string(),
        name: name.to_string(),
        main_category: MainCategory::Food,
        sub_category: "Protein".to_string(),
        cost_price: selling_price / 2.0,
        selling_price,
        store_quantity: None,
        bar_quantity: None,
    }
}

/// Creates an item with explicit prices, used by sorting and cart tests.
pub fn priced_item(id: &str, name: &str, cost_price: f64, selling_price: f64) -> Item {
    Item {
        cost_price,
        selling_price,
        ..sample_drink(id, name, 0, 0)
    }
}

/// Creates an active user with the given position.
pub fn sample_user(id: &str, name: &str, position: Position) -> User {
    User {
        id: id.to_string(),
        name: name.to_string(),
        username: name.to_lowercase(),
        position,
        active: true,
    }
}
