//! Sale models - Submitted carts and the sales log records the server keeps.
//!
//! A sale stores snapshots: the seller's name and each item's id and name at the
//! time of sale. Later edits to users or items never rewrite historical records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Id and name of an item captured at the time of sale
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSnapshot {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
}

/// Reference to an item inside a stored sale line.
///
/// Depending on how the server populated the record this is either the full
/// snapshot or just the item id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemRef {
    Snapshot(ItemSnapshot),
    Id(String),
}

impl ItemRef {
    /// Item id regardless of representation
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Snapshot(snapshot) => &snapshot.id,
            Self::Id(id) => id,
        }
    }

    /// Item name, when the record carries one
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Snapshot(snapshot) => Some(&snapshot.name),
            Self::Id(_) => None,
        }
    }
}

/// One line of a stored sale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleLine {
    pub item: ItemRef,
    pub quantity: i64,
}

/// A sale as recorded in the sales log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRecord {
    #[serde(rename = "_id")]
    pub id: String,
    /// Seller name snapshot
    pub user: String,
    pub sales: Vec<SaleLine>,
    pub total: f64,
    pub time_added: DateTime<Utc>,
}

/// One line of a sale being submitted
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewSaleLine {
    pub item: ItemSnapshot,
    pub quantity: i64,
}

/// Payload for `enterSales`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewSale {
    pub user: String,
    pub sales: Vec<NewSaleLine>,
    pub total: f64,
}

/// Envelope returned by `getSales`
#[derive(Debug, Clone, Deserialize)]
pub struct SalesEnvelope {
    pub sales: Vec<SaleRecord>,
}

/// Envelope returned by `getSalesById`
#[derive(Debug, Clone, Deserialize)]
pub struct SaleEnvelope {
    pub sale: SaleRecord,
}
