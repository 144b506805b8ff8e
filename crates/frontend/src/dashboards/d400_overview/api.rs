use contracts::dashboards::d400_overview::dto::OverviewResponse;

use crate::shared::http::{api_client, ApiError};

/// Статистика и последние события для главной страницы
pub async fn fetch_overview() -> Result<OverviewResponse, ApiError> {
    api_client().get_json("overview/").await
}
