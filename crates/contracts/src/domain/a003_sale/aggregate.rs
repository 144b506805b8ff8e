use serde::{Deserialize, Serialize};

use crate::domain::common::Record;
use crate::shared::decimal;

/// Продажа. The backend rejects quantities above the product's stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub id: i64,
    pub product: i64,
    #[serde(default)]
    pub product_name: String,
    /// Reference selling price of the product at read time.
    #[serde(default, with = "decimal::option")]
    pub selling_price: Option<f64>,
    pub quantity: i64,
    #[serde(with = "decimal")]
    pub price_per_unit: f64,
    #[serde(default, with = "decimal")]
    pub amount: f64,
    #[serde(default)]
    pub sold_by_username: Option<String>,
    #[serde(default)]
    pub sold_at: String,
}

impl Record for Sale {
    fn record_id(&self) -> i64 {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleDto {
    pub product: i64,
    pub quantity: i64,
    #[serde(with = "decimal")]
    pub price_per_unit: f64,
}

impl From<&Sale> for SaleDto {
    fn from(s: &Sale) -> Self {
        Self {
            product: s.product,
            quantity: s.quantity,
            price_per_unit: s.price_per_unit,
        }
    }
}
