use contracts::domain::a002_purchase::aggregate::{Purchase, PurchaseDto};

use crate::shared::http::{api_client, ApiError};

const PURCHASES: &str = "purchases/";

fn item_path(id: i64) -> String {
    format!("{}{}/", PURCHASES, id)
}

pub async fn fetch_purchases() -> Result<Vec<Purchase>, ApiError> {
    api_client().get_json(PURCHASES).await
}

pub async fn create_purchase(dto: &PurchaseDto) -> Result<Purchase, ApiError> {
    api_client().post_json(PURCHASES, dto).await
}

pub async fn update_purchase(id: i64, dto: &PurchaseDto) -> Result<Purchase, ApiError> {
    api_client().put_json(&item_path(id), dto).await
}

pub async fn delete_purchase(id: i64) -> Result<(), ApiError> {
    api_client().delete(&item_path(id)).await
}
