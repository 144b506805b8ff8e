use contracts::projections::p900_reports::dto::Report;

use crate::shared::http::{api_client, ApiError};

pub async fn fetch_reports() -> Result<Vec<Report>, ApiError> {
    api_client().get_json("reports/").await
}
