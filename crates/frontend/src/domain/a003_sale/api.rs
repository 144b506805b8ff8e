use contracts::domain::a003_sale::aggregate::{Sale, SaleDto};

use crate::shared::http::{api_client, ApiError};

const SALES: &str = "sales/";

fn item_path(id: i64) -> String {
    format!("{}{}/", SALES, id)
}

pub async fn fetch_sales() -> Result<Vec<Sale>, ApiError> {
    api_client().get_json(SALES).await
}

pub async fn create_sale(dto: &SaleDto) -> Result<Sale, ApiError> {
    api_client().post_json(SALES, dto).await
}

pub async fn update_sale(id: i64, dto: &SaleDto) -> Result<Sale, ApiError> {
    api_client().put_json(&item_path(id), dto).await
}

pub async fn delete_sale(id: i64) -> Result<(), ApiError> {
    api_client().delete(&item_path(id)).await
}
