use contracts::system::auth::{RegisterRequest, TokenPair, TokenRequest};

use crate::shared::http::{api_client, ApiError, ApiRequest};

const TOKEN_PATH: &str = "token/";
const REGISTER_PATH: &str = "register/";

/// Exchange credentials for an access/refresh pair.
pub async fn login(username: String, password: String) -> Result<TokenPair, ApiError> {
    let request = ApiRequest::post(TOKEN_PATH).json(&TokenRequest { username, password })?;
    api_client().send_anonymous(request).await?.json()
}

/// Create an account. The server validates everything except the
/// password confirmation, which the page checks first.
pub async fn register(dto: &RegisterRequest) -> Result<(), ApiError> {
    let request = ApiRequest::post(REGISTER_PATH).json(dto)?;
    api_client().send_anonymous(request).await.map(|_| ())
}
