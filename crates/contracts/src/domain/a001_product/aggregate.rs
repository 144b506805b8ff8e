use serde::{Deserialize, Serialize};

use crate::domain::common::Record;
use crate::shared::decimal;

/// Товар. The backend derives `low_stock` and `total_value`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub quantity: i64,
    #[serde(with = "decimal")]
    pub buying_price: f64,
    #[serde(default, with = "decimal::option")]
    pub selling_price: Option<f64>,
    #[serde(default)]
    pub low_stock: bool,
    #[serde(default, with = "decimal")]
    pub total_value: f64,
    #[serde(default)]
    pub created_at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockStatus {
    OutOfStock,
    Low(i64),
    InStock(i64),
}

impl Product {
    pub fn stock_status(&self) -> StockStatus {
        if self.quantity == 0 {
            StockStatus::OutOfStock
        } else if self.low_stock {
            StockStatus::Low(self.quantity)
        } else {
            StockStatus::InStock(self.quantity)
        }
    }

    pub fn is_out_of_stock(&self) -> bool {
        self.quantity == 0
    }
}

impl Record for Product {
    fn record_id(&self) -> i64 {
        self.id
    }
}

/// Payload for `POST products/` and `PUT products/{id}/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDto {
    pub name: String,
    pub description: String,
    pub category: String,
    pub quantity: i64,
    #[serde(with = "decimal")]
    pub buying_price: f64,
    #[serde(default, with = "decimal::option", skip_serializing_if = "Option::is_none")]
    pub selling_price: Option<f64>,
}

impl From<&Product> for ProductDto {
    fn from(p: &Product) -> Self {
        Self {
            name: p.name.clone(),
            description: p.description.clone(),
            category: p.category.clone(),
            quantity: p.quantity,
            buying_price: p.buying_price,
            selling_price: p.selling_price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_backend_product() {
        let json = r#"{
            "id": 4,
            "name": "Sugar 1kg",
            "description": "",
            "category": "Food",
            "quantity": 3,
            "buying_price": "2500.00",
            "low_stock": true,
            "total_value": "7500.00",
            "created_at": "2024-03-15T14:02:26.123456Z"
        }"#;
        let p: Product = serde_json::from_str(json).unwrap();
        assert_eq!(p.buying_price, 2500.0);
        assert_eq!(p.selling_price, None);
        assert_eq!(p.stock_status(), StockStatus::Low(3));
    }

    #[test]
    fn test_stock_status_out_of_stock_wins() {
        let mut p: Product = serde_json::from_str(
            r#"{"id":1,"name":"x","quantity":0,"buying_price":"1","low_stock":true}"#,
        )
        .unwrap();
        assert_eq!(p.stock_status(), StockStatus::OutOfStock);
        p.quantity = 40;
        p.low_stock = false;
        assert_eq!(p.stock_status(), StockStatus::InStock(40));
    }
}
