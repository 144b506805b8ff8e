use contracts::system::users::{User, UserActivationDto};

use crate::shared::http::{api_client, ApiError};

const USERS: &str = "users/";

/// Fetch all users
pub async fn fetch_users() -> Result<Vec<User>, ApiError> {
    api_client().get_json(USERS).await
}

/// Activate or deactivate an account; returns the updated record.
pub async fn set_active(id: i64, is_active: bool) -> Result<User, ApiError> {
    api_client()
        .patch_json(&format!("{}{}/", USERS, id), &UserActivationDto { is_active })
        .await
}
