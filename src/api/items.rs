use super::ApiClient;
use crate::{
    errors::Result,
    models::{IdRequest, Item, ItemDraft, ItemEnvelope},
};
use async_trait::async_trait;
use reqwest::Method;

/// Item catalog persistence
#[async_trait]
pub trait ItemBackend: Send + Sync {
    /// Lists every item.
    async fn get_items(&self) -> Result<Vec<Item>>;

    /// Creates an item and returns the stored record.
    async fn add_item(&self, draft: &ItemDraft) -> Result<Item>;

    /// Replaces the full record. Returns the server's echo when it sends one back.
    async fn edit_item(&self, item: &Item) -> Result<Option<Item>>;

    async fn delete_item(&self, id: &str) -> Result<()>;

    async fn get_item_by_id(&self, id: &str) -> Result<Item>;
}

#[async_trait]
impl ItemBackend for ApiClient {
    async fn get_items(&self) -> Result<Vec<Item>> {
        self.fetch(self.request(Method::GET, "/items/get"), "Failed to load items")
            .await
    }

    async fn add_item(&self, draft: &ItemDraft) -> Result<Item> {
        self.fetch(
            self.request(Method::POST, "/items/additem").json(draft),
            "Failed to add items",
        )
        .await
    }

    async fn edit_item(&self, item: &Item) -> Result<Option<Item>> {
        let echo: serde_json::Value = self
            .fetch(
                self.request(Method::PUT, "/items/edititem").json(item),
                "Failed to edit item",
            )
            .await?;
        // Some deployments answer with a status object instead of the record
        Ok(serde_json::from_value(echo).ok())
    }

    async fn delete_item(&self, id: &str) -> Result<()> {
        self.send_only(
            self.request(Method::DELETE, "/items/deleteItem")
                .json(&IdRequest { id }),
            "Failed to delete item",
        )
        .await
    }

    async fn get_item_by_id(&self, id: &str) -> Result<Item> {
        let envelope: ItemEnvelope = self
            .fetch(
                self.request(Method::POST, "/items/getItemByID")
                    .json(&IdRequest { id }),
                "Failed to load item",
            )
            .await?;
        Ok(envelope.item)
    }
}
