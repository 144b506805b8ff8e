//! HTTP layer: transport, error type and the authenticated client.

pub mod client;
pub mod error;
pub mod transport;

use std::rc::Rc;

pub use client::ApiClient;
pub use error::ApiError;
pub use transport::{ApiRequest, ApiResponse, GlooTransport, Method, Transport};

use crate::shared::api_utils::api_base;
use crate::system::auth::redirect_to_login;
use crate::system::auth::storage::BrowserSessionStore;

thread_local! {
    static CLIENT: ApiClient = ApiClient::new(
        api_base(),
        Rc::new(BrowserSessionStore::browser()),
        Rc::new(GlooTransport),
        Rc::new(redirect_to_login),
    );
}

/// Process-wide client: browser storage, `fetch`, hard redirect on expiry.
pub fn api_client() -> ApiClient {
    CLIENT.with(ApiClient::clone)
}
