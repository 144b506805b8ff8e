use contracts::domain::a004_expense::aggregate::{Expense, ExpenseDto};

use crate::shared::http::{api_client, ApiError};

const EXPENSES: &str = "expenses/";

fn item_path(id: i64) -> String {
    format!("{}{}/", EXPENSES, id)
}

pub async fn fetch_expenses() -> Result<Vec<Expense>, ApiError> {
    api_client().get_json(EXPENSES).await
}

pub async fn create_expense(dto: &ExpenseDto) -> Result<Expense, ApiError> {
    api_client().post_json(EXPENSES, dto).await
}

pub async fn update_expense(id: i64, dto: &ExpenseDto) -> Result<Expense, ApiError> {
    api_client().put_json(&item_path(id), dto).await
}

pub async fn delete_expense(id: i64) -> Result<(), ApiError> {
    api_client().delete(&item_path(id)).await
}
