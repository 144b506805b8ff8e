use contracts::domain::a001_product::aggregate::{Product, ProductDto};

use crate::shared::http::{api_client, ApiError};

const PRODUCTS: &str = "products/";

fn item_path(id: i64) -> String {
    format!("{}{}/", PRODUCTS, id)
}

pub async fn fetch_products() -> Result<Vec<Product>, ApiError> {
    api_client().get_json(PRODUCTS).await
}

pub async fn create_product(dto: &ProductDto) -> Result<Product, ApiError> {
    api_client().post_json(PRODUCTS, dto).await
}

pub async fn update_product(id: i64, dto: &ProductDto) -> Result<Product, ApiError> {
    api_client().put_json(&item_path(id), dto).await
}

pub async fn delete_product(id: i64) -> Result<(), ApiError> {
    api_client().delete(&item_path(id)).await
}
