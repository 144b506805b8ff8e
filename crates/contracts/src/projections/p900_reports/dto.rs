use serde::{Deserialize, Serialize};

use crate::domain::common::Record;
use crate::shared::decimal;

/// Snapshot of the financial totals generated by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: i64,
    #[serde(default)]
    pub generated_by_username: Option<String>,
    #[serde(default)]
    pub generated_at: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default, with = "decimal")]
    pub total_sales: f64,
    #[serde(default, with = "decimal")]
    pub total_purchases: f64,
    #[serde(default, with = "decimal")]
    pub total_expenses: f64,
    #[serde(default, with = "decimal")]
    pub net_profit: f64,
    #[serde(default, with = "decimal")]
    pub total_product_price: f64,
}

impl Record for Report {
    fn record_id(&self) -> i64 {
        self.id
    }
}
