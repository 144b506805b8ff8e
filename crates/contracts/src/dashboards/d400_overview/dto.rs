use serde::{Deserialize, Serialize};

use crate::shared::decimal;

/// Response of `GET overview/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverviewResponse {
    pub stats: OverviewStats,
    /// Human-readable activity lines, newest first
    #[serde(default)]
    pub recent: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverviewStats {
    #[serde(default)]
    pub total_products: i64,
    #[serde(default)]
    pub total_users: i64,
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
    #[serde(default)]
    pub low_stock_products: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_recent_defaults_to_empty() {
        let r: OverviewResponse = serde_json::from_str(
            r#"{"stats":{"total_products":12,"net_profit":-150.5,"low_stock_products":2}}"#,
        )
        .unwrap();
        assert!(r.recent.is_empty());
        assert_eq!(r.stats.total_products, 12);
        assert_eq!(r.stats.net_profit, -150.5);
        assert_eq!(r.stats.total_sales, 0.0);
    }
}
