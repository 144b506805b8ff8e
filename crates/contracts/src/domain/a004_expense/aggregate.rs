use serde::{Deserialize, Serialize};

use crate::domain::common::Record;
use crate::shared::decimal;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub description: String,
    #[serde(with = "decimal")]
    pub amount: f64,
    #[serde(default)]
    pub spent_by_username: Option<String>,
    #[serde(default)]
    pub spent_at: String,
}

impl Record for Expense {
    fn record_id(&self) -> i64 {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseDto {
    pub description: String,
    #[serde(with = "decimal")]
    pub amount: f64,
}
