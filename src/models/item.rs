//! Item model - Represents a catalog entry as stored by the remote API.
//!
//! Drinks carry a store/bar quantity split; food is made to order and carries no
//! quantities at all (both fields are null on the wire).

use serde::{Deserialize, Deserializer, Serialize, de::Error as _};
use std::{fmt, str::FromStr};

/// Top-level item category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MainCategory {
    /// Made-to-order food, no stock tracking
    Food,
    /// Stocked drinks with store and bar quantities
    Drinks,
}

impl MainCategory {
    /// Wire name of the category
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Drinks => "Drinks",
        }
    }
}

impl fmt::Display for MainCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MainCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "food" => Ok(Self::Food),
            "drinks" | "drink" => Ok(Self::Drinks),
            other => Err(format!("unknown category '{other}' (expected food or drinks)")),
        }
    }
}

/// Numeric field as the API may store it: a JSON number or the raw form text.
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

impl NumberOrText {
    /// `None` for blank text
    fn value(self) -> Result<Option<f64>, String> {
        match self {
            Self::Number(n) => Ok(Some(n)),
            Self::Text(text) if text.trim().is_empty() => Ok(None),
            Self::Text(text) => text
                .trim()
                .parse::<f64>()
                .map(Some)
                .map_err(|_| format!("expected a number, got \"{text}\"")),
        }
    }
}

/// Price from a number or numeric string. Null and blank text read as 0.
fn lenient_price<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let Some(raw) = Option::<NumberOrText>::deserialize(deserializer)? else {
        return Ok(0.0);
    };
    let price = raw.value().map_err(D::Error::custom)?.unwrap_or(0.0);
    if price.is_finite() {
        Ok(price)
    } else {
        Err(D::Error::custom(format!("invalid price {price}")))
    }
}

/// Stock count from a whole number, an integral float or a numeric string.
fn lenient_quantity<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    let Some(raw) = Option::<NumberOrText>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let Some(value) = raw.value().map_err(D::Error::custom)? else {
        return Ok(None);
    };
    if value.fract().abs() > 0.0 || !(0.0..=f64::from(u32::MAX)).contains(&value) {
        return Err(D::Error::custom(format!(
            "invalid quantity {value}, expected a non-negative whole number"
        )));
    }
    // whole and within u32 range, checked above
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let count = value as u32;
    Ok(Some(count))
}

/// Item record as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Opaque server identifier
    #[serde(rename = "_id")]
    pub id: String,
    /// Display name
    pub name: String,
    /// Food or Drinks
    pub main_category: MainCategory,
    /// Subcategory within the main category (e.g. "Beer", "Protein")
    pub sub_category: String,
    /// Purchase price per unit
    #[serde(default, deserialize_with = "lenient_price")]
    pub cost_price: f64,
    /// Sale price per unit
    #[serde(default, deserialize_with = "lenient_price")]
    pub selling_price: f64,
    /// Units held in the storeroom, `None` for food
    #[serde(default, deserialize_with = "lenient_quantity")]
    pub store_quantity: Option<u32>,
    /// Units held at the bar, `None` for food
    #[serde(default, deserialize_with = "lenient_quantity")]
    pub bar_quantity: Option<u32>,
}

impl Item {
    /// Whether this item tracks stock (drinks only)
    #[must_use]
    pub fn is_drink(&self) -> bool {
        self.main_category == MainCategory::Drinks
    }

    /// Store plus bar quantity, missing values counted as zero.
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        u64::from(self.store_quantity.unwrap_or(0)) + u64::from(self.bar_quantity.unwrap_or(0))
    }
}

/// Payload for creating a new item. The server assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDraft {
    pub name: String,
    pub main_category: MainCategory,
    pub sub_category: String,
    #[serde(default, deserialize_with = "lenient_price")]
    pub cost_price: f64,
    #[serde(default, deserialize_with = "lenient_price")]
    pub selling_price: f64,
    #[serde(default, deserialize_with = "lenient_quantity")]
    pub store_quantity: Option<u32>,
    #[serde(default, deserialize_with = "lenient_quantity")]
    pub bar_quantity: Option<u32>,
}

/// Body for id-only requests such as delete and lookup
#[derive(Debug, Clone, Serialize)]
pub struct IdRequest<'a> {
    pub id: &'a str,
}

/// Envelope returned by `getItemByID`
#[derive(Debug, Clone, Deserialize)]
pub struct ItemEnvelope {
    pub item: Item,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;

    #[test]
    fn test_deserialize_drink_and_food() {
        let json = r#"[
            {"_id": "a1", "name": "Star", "mainCategory": "Drinks", "subCategory": "Beer",
             "costPrice": 500, "sellingPrice": 800, "storeQuantity": 10, "barQuantity": 2},
            {"_id": "b2", "name": "Jollof", "mainCategory": "Food", "subCategory": "Carbohydrate",
             "costPrice": 1000, "sellingPrice": 2500, "storeQuantity": null, "barQuantity": null}
        ]"#;

        let items: Vec<Item> = serde_json::from_str(json).unwrap();
        assert_eq!(items[0].id, "a1");
        assert!(items[0].is_drink());
        assert_eq!(items[0].store_quantity, Some(10));
        assert_eq!(items[0].total_quantity(), 12);
        assert_eq!(items[1].main_category, MainCategory::Food);
        assert_eq!(items[1].store_quantity, None);
        assert_eq!(items[1].total_quantity(), 0);
    }

    #[test]
    fn test_draft_serializes_camel_case() {
        let draft = ItemDraft {
            name: "Suya".to_string(),
            main_category: MainCategory::Food,
            sub_category: "Protein".to_string(),
            cost_price: 100.0,
            selling_price: 200.0,
            store_quantity: None,
            bar_quantity: None,
        };
        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(value["mainCategory"], "Food");
        assert_eq!(value["subCategory"], "Protein");
        assert!(value["storeQuantity"].is_null());
    }

    #[test]
    fn test_parse_main_category() {
        assert_eq!("Drinks".parse::<MainCategory>().unwrap(), MainCategory::Drinks);
        assert_eq!(" food ".parse::<MainCategory>().unwrap(), MainCategory::Food);
        assert!("snacks".parse::<MainCategory>().is_err());
    }

    #[test]
    fn test_numeric_fields_accept_form_text() {
        let json = r#"[{
            "_id": "a1", "name": "Trophy", "mainCategory": "Drinks", "subCategory": "Beer",
            "costPrice": "400", "sellingPrice": " 700.5 ",
            "storeQuantity": "24", "barQuantity": 0
        }, {
            "_id": "a2", "name": "Hero", "mainCategory": "Drinks", "subCategory": "Beer",
            "costPrice": 380, "sellingPrice": 650,
            "storeQuantity": 24.0, "barQuantity": ""
        }, {
            "_id": "f1", "name": "Suya", "mainCategory": "Food", "subCategory": "Protein",
            "costPrice": "", "sellingPrice": 1500,
            "storeQuantity": null, "barQuantity": null
        }]"#;

        let items: Vec<Item> = serde_json::from_str(json).unwrap();
        assert_eq!(items[0].cost_price, 400.0);
        assert_eq!(items[0].selling_price, 700.5);
        assert_eq!(items[0].store_quantity, Some(24));
        assert_eq!(items[0].bar_quantity, Some(0));
        assert_eq!(items[1].store_quantity, Some(24));
        assert_eq!(items[1].bar_quantity, None);
        assert_eq!(items[2].cost_price, 0.0);
        assert_eq!(items[2].store_quantity, None);
    }

    #[test]
    fn test_invalid_quantities_are_rejected() {
        for bad in [r#""-3""#, "-3", "2.5", r#""lots""#] {
            let json = format!(
                r#"{{"_id":"a1","name":"Star","mainCategory":"Drinks","subCategory":"Beer",
                    "costPrice":1,"sellingPrice":2,"storeQuantity":{bad},"barQuantity":0}}"#
            );
            assert!(serde_json::from_str::<Item>(&json).is_err(), "accepted {bad}");
        }
    }
}
