//! # Store
//!
//! Records live in an external managed store. The gateway holds no copy of them.
//!
//! ## Schema
//! - Table for all foods
//! - Fields: id (**int**, assigned by the store), daerah (**string**), makanan (**string**), deskripsi (**string**, nullable)
//! - Rows are kept as the raw JSON objects the store sends
//!
//! ## Ordering
//! - Listing everything asks the store for ascending ids
//! - Listing by region asks for no ordering, whatever the store returns is passed on as-is
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

pub const FOOD_TABLE: &str = "foods";
pub const FOOD_ID: &str = "id";
pub const FOOD_REGION: &str = "daerah";
pub const FOOD_NAME: &str = "makanan";
pub const FOOD_DESCRIPTION: &str = "deskripsi";

/// One row exactly as the store returned it. Columns are never coerced, so a
/// row with unexpected types or nulls still reaches the client.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(transparent)]
pub struct FoodRecord(pub Map<String, Value>);

impl FoodRecord {
    pub fn id(&self) -> Option<i64> {
        self.0.get(FOOD_ID).and_then(Value::as_i64)
    }

    pub fn daerah(&self) -> Option<&str> {
        self.0.get(FOOD_REGION).and_then(Value::as_str)
    }

    pub fn makanan(&self) -> Option<&str> {
        self.0.get(FOOD_NAME).and_then(Value::as_str)
    }

    pub fn deskripsi(&self) -> Option<&str> {
        self.0.get(FOOD_DESCRIPTION).and_then(Value::as_str)
    }
}

/// Insert payload. Values are forwarded untouched; an absent description is
/// left out of the row so the store fills its default.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct NewFood {
    pub daerah: Value,
    pub makanan: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deskripsi: Option<Value>,
}

/// Display text of every variant is what the client sees in `error`.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error(transparent)]
    Decode(#[from] serde_json::Error),

    #[error("Invalid store key: {0}")]
    InvalidKey(#[from] reqwest::header::InvalidHeaderValue),
}

#[async_trait]
pub trait FoodStore: Send + Sync {
    /// All foods, ascending by id.
    async fn list_foods(&self) -> Result<Vec<FoodRecord>, StoreError>;

    /// Foods whose region equals `daerah` exactly, in store order.
    async fn list_foods_by_region(&self, daerah: &str) -> Result<Vec<FoodRecord>, StoreError>;

    /// Inserts one food and returns whatever payload the store answers with.
    async fn insert_food(&self, food: NewFood) -> Result<Value, StoreError>;
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn new_food_omits_missing_description() {
        let food = NewFood {
            daerah: json!("Jawa Barat"),
            makanan: json!("Sate"),
            deskripsi: None,
        };

        assert_eq!(
            serde_json::to_value(&food).unwrap(),
            json!({"daerah": "Jawa Barat", "makanan": "Sate"})
        );
    }

    #[test]
    fn food_record_round_trips_row_untouched() {
        let row = json!({
            "id": 7,
            "daerah": "Bali",
            "makanan": "Ayam Betutu",
            "deskripsi": null,
            "created_at": "2024-05-01T10:00:00+00:00"
        });

        let record: FoodRecord = serde_json::from_value(row.clone()).unwrap();

        assert_eq!(record.id(), Some(7));
        assert_eq!(record.makanan(), Some("Ayam Betutu"));
        assert_eq!(record.deskripsi(), None);
        assert_eq!(serde_json::to_value(&record).unwrap(), row);
    }

    #[test]
    fn food_record_accepts_null_and_oddly_typed_columns() {
        let row = json!({"id": "7", "daerah": 3, "makanan": null});

        let record: FoodRecord = serde_json::from_value(row.clone()).unwrap();

        assert_eq!(record.id(), None);
        assert_eq!(record.daerah(), None);
        assert_eq!(record.makanan(), None);
        assert_eq!(serde_json::to_value(&record).unwrap(), row);
    }

    #[test]
    fn rejected_error_displays_store_message() {
        let error = StoreError::Rejected {
            status: 404,
            message: "relation \"public.foods\" does not exist".to_string(),
        };

        assert_eq!(error.to_string(), "relation \"public.foods\" does not exist");
    }
}
