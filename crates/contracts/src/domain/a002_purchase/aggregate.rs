use serde::{Deserialize, Serialize};

use crate::domain::common::Record;
use crate::shared::decimal;

/// Закупка товара. `amount` is computed by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Purchase {
    pub id: i64,
    pub product: i64,
    #[serde(default)]
    pub product_name: String,
    pub quantity: i64,
    #[serde(with = "decimal")]
    pub price_per_unit: f64,
    #[serde(default, with = "decimal")]
    pub amount: f64,
    #[serde(default)]
    pub purchased_by_username: Option<String>,
    #[serde(default)]
    pub purchased_at: String,
}

impl Record for Purchase {
    fn record_id(&self) -> i64 {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseDto {
    pub product: i64,
    pub quantity: i64,
    #[serde(with = "decimal")]
    pub price_per_unit: f64,
}

impl From<&Purchase> for PurchaseDto {
    fn from(p: &Purchase) -> Self {
        Self {
            product: p.product,
            quantity: p.quantity,
            price_per_unit: p.price_per_unit,
        }
    }
}
