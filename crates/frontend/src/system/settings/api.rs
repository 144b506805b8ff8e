use contracts::system::settings::Setting;

use crate::shared::http::{api_client, ApiError};

pub async fn fetch_settings() -> Result<Vec<Setting>, ApiError> {
    api_client().get_json("settings/").await
}
