//! Authenticated API client.
//!
//! Every request carries the stored access token. A 401 triggers one
//! refresh through `token/refresh/` and one retry of the original request.
//! Concurrent 401s wait on the same refresh instead of starting their own.
//! When refresh is impossible the credentials are wiped and the
//! session-expired hook runs.

use std::rc::Rc;

use contracts::system::auth::{RefreshRequest, RefreshResponse};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::Mutex;

use super::error::ApiError;
use super::transport::{ApiRequest, ApiResponse, Transport};
use crate::system::auth::storage::SessionStore;

pub const REFRESH_PATH: &str = "token/refresh/";

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    session: Rc<dyn SessionStore>,
    transport: Rc<dyn Transport>,
    on_session_expired: Rc<dyn Fn()>,
    refresh_lock: Rc<Mutex<()>>,
}

impl ApiClient {
    pub fn new(
        base_url: impl Into<String>,
        session: Rc<dyn SessionStore>,
        transport: Rc<dyn Transport>,
        on_session_expired: Rc<dyn Fn()>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            session,
            transport,
            on_session_expired,
            refresh_lock: Rc::new(Mutex::new(())),
        }
    }

    /// Send with the stored token, refreshing once on 401.
    pub async fn send(&self, mut request: ApiRequest) -> Result<ApiResponse, ApiError> {
        request.bearer = self.session.access_token();
        let response = self.transport.send(&self.base_url, &request).await?;
        if !response.is_unauthorized() || request.retried {
            return response.into_result();
        }

        request.retried = true;
        let sent_with = request.bearer.take();
        let access = self.refresh_access_token(sent_with.as_deref()).await?;
        request.bearer = Some(access);

        log::debug!("retrying {} with refreshed token", request.path);
        self.transport
            .send(&self.base_url, &request)
            .await?
            .into_result()
    }

    /// Send without a token and without the refresh pass (login, register).
    pub async fn send_anonymous(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        self.transport
            .send(&self.base_url, &request)
            .await?
            .into_result()
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(ApiRequest::get(path)).await?.json()
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        self.send(ApiRequest::post(path).json(body)?).await?.json()
    }

    pub async fn put_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        self.send(ApiRequest::put(path).json(body)?).await?.json()
    }

    pub async fn patch_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        self.send(ApiRequest::patch(path).json(body)?).await?.json()
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.send(ApiRequest::delete(path)).await.map(|_| ())
    }

    /// Obtain a usable access token after `sent_with` was rejected.
    ///
    /// Runs under the refresh lock. If another request already replaced the
    /// token while we waited, that token is reused without a new refresh.
    async fn refresh_access_token(&self, sent_with: Option<&str>) -> Result<String, ApiError> {
        let _guard = self.refresh_lock.lock().await;

        // Токен был, а теперь пуст: сессию уже завершил предыдущий ожидающий
        if sent_with.is_some() && self.session.access_token().is_none() {
            return Err(ApiError::SessionExpired("session already ended".to_string()));
        }

        if let Some(current) = self.session.access_token() {
            if Some(current.as_str()) != sent_with {
                log::debug!("access token already refreshed by a concurrent request");
                return Ok(current);
            }
        }

        match self.request_new_access_token().await {
            Ok(access) => {
                self.session.store_access_token(&access);
                log::info!("access token refreshed");
                Ok(access)
            }
            Err(e) => {
                log::warn!("token refresh failed, ending session: {}", e);
                self.session.clear();
                (self.on_session_expired)();
                match e {
                    ApiError::SessionExpired(reason) => Err(ApiError::SessionExpired(reason)),
                    other => Err(ApiError::SessionExpired(other.to_string())),
                }
            }
        }
    }

    async fn request_new_access_token(&self) -> Result<String, ApiError> {
        let refresh = self
            .session
            .refresh_token()
            .ok_or_else(|| ApiError::SessionExpired("no refresh token stored".to_string()))?;
        let request = ApiRequest::post(REFRESH_PATH).json(&RefreshRequest { refresh })?;
        let response = self.send_anonymous(request).await?;
        Ok(response.json::<RefreshResponse>()?.access)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::http::transport::Method;
    use crate::system::auth::storage::memory::MemoryStorage;
    use crate::system::auth::storage::TieredSessionStore;
    use async_trait::async_trait;
    use contracts::system::auth::TokenPair;
    use std::cell::{Cell, RefCell};

    type TestStore = TieredSessionStore<MemoryStorage, MemoryStorage>;

    /// Fake backend: accepts one access token and one refresh token.
    struct FakeBackend {
        valid_access: RefCell<String>,
        valid_refresh: String,
        /// When set, protected endpoints answer 401 no matter the token.
        always_unauthorized: bool,
        refresh_down: bool,
        log: RefCell<Vec<ApiRequest>>,
        issued: Cell<usize>,
    }

    impl FakeBackend {
        fn new(valid_access: &str, valid_refresh: &str) -> Self {
            Self {
                valid_access: RefCell::new(valid_access.to_string()),
                valid_refresh: valid_refresh.to_string(),
                always_unauthorized: false,
                refresh_down: false,
                log: RefCell::new(Vec::new()),
                issued: Cell::new(0),
            }
        }

        fn refresh_calls(&self) -> usize {
            self.log
                .borrow()
                .iter()
                .filter(|r| r.path == REFRESH_PATH)
                .count()
        }

        fn calls_to(&self, path: &str) -> Vec<ApiRequest> {
            self.log
                .borrow()
                .iter()
                .filter(|r| r.path == path)
                .cloned()
                .collect()
        }
    }

    fn reply(status: u16, body: &str) -> Result<ApiResponse, ApiError> {
        Ok(ApiResponse {
            status,
            body: body.to_string(),
        })
    }

    #[async_trait(?Send)]
    impl Transport for FakeBackend {
        async fn send(&self, _base: &str, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
            self.log.borrow_mut().push(request.clone());
            tokio::task::yield_now().await;

            if request.path == REFRESH_PATH {
                if self.refresh_down {
                    return Err(ApiError::Network("connection refused".into()));
                }
                let presented = request
                    .body
                    .as_ref()
                    .and_then(|b| b["refresh"].as_str())
                    .unwrap_or_default();
                if presented != self.valid_refresh {
                    return reply(401, r#"{"detail":"Token is invalid or expired"}"#);
                }
                self.issued.set(self.issued.get() + 1);
                let access = format!("fresh-{}", self.issued.get());
                *self.valid_access.borrow_mut() = access.clone();
                return reply(200, &format!(r#"{{"access":"{}"}}"#, access));
            }

            if request.path == "public/" {
                return reply(200, "[]");
            }
            if request.path == "sales/" && request.method == Method::Post {
                return reply(400, r#"{"quantity":["Not enough stock"]}"#);
            }

            let authorized =
                request.bearer.as_deref() == Some(self.valid_access.borrow().as_str());
            if self.always_unauthorized || !authorized {
                return reply(401, r#"{"detail":"Given token not valid"}"#);
            }
            reply(200, r#"[{"id":1}]"#)
        }
    }

    struct Harness {
        client: ApiClient,
        backend: Rc<FakeBackend>,
        store: Rc<TestStore>,
        expired: Rc<Cell<usize>>,
    }

    fn harness(backend: FakeBackend, access: Option<&str>, refresh: Option<&str>) -> Harness {
        use crate::system::auth::storage::{KeyValueStorage, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};

        let store = Rc::new(TieredSessionStore::new(
            MemoryStorage::default(),
            MemoryStorage::default(),
        ));
        if let Some(a) = access {
            store.durable().set(ACCESS_TOKEN_KEY, a);
        }
        if let Some(r) = refresh {
            store.durable().set(REFRESH_TOKEN_KEY, r);
        }
        let backend = Rc::new(backend);
        let expired = Rc::new(Cell::new(0));
        let hook = {
            let expired = expired.clone();
            Rc::new(move || expired.set(expired.get() + 1))
        };
        let client = ApiClient::new(
            "http://test/api/",
            store.clone(),
            backend.clone(),
            hook,
        );
        Harness {
            client,
            backend,
            store,
            expired,
        }
    }

    #[tokio::test]
    async fn test_no_token_no_authorization_header() {
        let h = harness(FakeBackend::new("a", "r"), None, None);
        h.client.send(ApiRequest::get("public/")).await.unwrap();
        assert_eq!(h.backend.calls_to("public/")[0].bearer, None);
    }

    #[tokio::test]
    async fn test_stored_token_is_attached() {
        let h = harness(FakeBackend::new("a1", "r1"), Some("a1"), Some("r1"));
        let items: Vec<serde_json::Value> = h.client.get_json("products/").await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(h.backend.calls_to("products/")[0].bearer.as_deref(), Some("a1"));
        assert_eq!(h.backend.refresh_calls(), 0);
    }

    #[tokio::test]
    async fn test_expired_access_is_refreshed_and_retried_once() {
        let h = harness(FakeBackend::new("not-yet-issued", "r1"), Some("stale"), Some("r1"));
        let result: Result<Vec<serde_json::Value>, _> = h.client.get_json("products/").await;
        assert!(result.is_ok());

        let calls = h.backend.calls_to("products/");
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].bearer.as_deref(), Some("stale"));
        assert_eq!(calls[1].bearer.as_deref(), Some("fresh-1"));
        assert!(calls[1].retried);
        assert_eq!(h.backend.refresh_calls(), 1);

        assert_eq!(h.store.access_token().as_deref(), Some("fresh-1"));
        assert_eq!(h.store.refresh_token().as_deref(), Some("r1"));
        assert_eq!(h.expired.get(), 0);
    }

    #[tokio::test]
    async fn test_second_401_is_returned_without_another_refresh() {
        let mut backend = FakeBackend::new("x", "r1");
        backend.always_unauthorized = true;
        let h = harness(backend, Some("stale"), Some("r1"));

        let result = h.client.send(ApiRequest::get("products/")).await;
        assert_eq!(result, Err(ApiError::Unauthorized));
        assert_eq!(h.backend.refresh_calls(), 1);
        assert_eq!(h.backend.calls_to("products/").len(), 2);
        assert_eq!(h.expired.get(), 0);
    }

    #[tokio::test]
    async fn test_already_retried_request_is_not_refreshed() {
        let h = harness(FakeBackend::new("valid", "r1"), Some("stale"), Some("r1"));
        let mut request = ApiRequest::get("products/");
        request.retried = true;

        assert_eq!(h.client.send(request).await, Err(ApiError::Unauthorized));
        assert_eq!(h.backend.refresh_calls(), 0);
    }

    #[tokio::test]
    async fn test_rejected_refresh_clears_session_and_fires_hook() {
        let h = harness(FakeBackend::new("valid", "r-good"), Some("stale"), Some("r-revoked"));

        let result = h.client.send(ApiRequest::get("products/")).await;
        assert!(matches!(result, Err(ApiError::SessionExpired(_))));
        assert!(h.store.access_token().is_none());
        assert!(h.store.refresh_token().is_none());
        assert_eq!(h.expired.get(), 1);
        assert_eq!(h.backend.calls_to("products/").len(), 1);
    }

    #[tokio::test]
    async fn test_missing_refresh_token_skips_refresh_call() {
        let h = harness(FakeBackend::new("valid", "r1"), Some("stale"), None);

        let result = h.client.send(ApiRequest::get("products/")).await;
        assert!(matches!(result, Err(ApiError::SessionExpired(_))));
        assert_eq!(h.backend.refresh_calls(), 0);
        assert!(h.store.access_token().is_none());
        assert_eq!(h.expired.get(), 1);
    }

    #[tokio::test]
    async fn test_network_failure_during_refresh_ends_session() {
        let mut backend = FakeBackend::new("valid", "r1");
        backend.refresh_down = true;
        let h = harness(backend, Some("stale"), Some("r1"));

        let result = h.client.send(ApiRequest::get("products/")).await;
        assert!(matches!(result, Err(ApiError::SessionExpired(_))));
        assert!(h.store.refresh_token().is_none());
        assert_eq!(h.expired.get(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_401s_share_one_refresh() {
        let h = harness(FakeBackend::new("not-yet-issued", "r1"), Some("stale"), Some("r1"));

        let (a, b, c) = tokio::join!(
            h.client.send(ApiRequest::get("products/")),
            h.client.send(ApiRequest::get("sales/")),
            h.client.send(ApiRequest::get("expenses/")),
        );
        assert!(a.is_ok() && b.is_ok() && c.is_ok());
        assert_eq!(h.backend.refresh_calls(), 1);
        for path in ["products/", "sales/", "expenses/"] {
            let calls = h.backend.calls_to(path);
            assert_eq!(calls.len(), 2, "{}", path);
            assert_eq!(calls[1].bearer.as_deref(), Some("fresh-1"));
        }
        assert_eq!(h.expired.get(), 0);
    }

    #[tokio::test]
    async fn test_concurrent_401s_end_session_once() {
        let h = harness(FakeBackend::new("valid", "r-good"), Some("stale"), Some("r-revoked"));

        let (a, b, c) = tokio::join!(
            h.client.send(ApiRequest::get("products/")),
            h.client.send(ApiRequest::get("sales/")),
            h.client.send(ApiRequest::get("expenses/")),
        );
        for result in [a, b, c] {
            match result {
                Err(ApiError::SessionExpired(reason)) => {
                    assert!(!reason.contains("session expired"), "{}", reason)
                }
                other => panic!("unexpected result: {:?}", other),
            }
        }
        assert_eq!(h.backend.refresh_calls(), 1);
        assert_eq!(h.expired.get(), 1);
        assert!(h.store.refresh_token().is_none());
    }

    #[tokio::test]
    async fn test_non_401_errors_pass_through() {
        let h = harness(FakeBackend::new("a1", "r1"), Some("a1"), Some("r1"));
        let result: Result<serde_json::Value, _> = h
            .client
            .post_json("sales/", &serde_json::json!({"product": 1, "quantity": 99}))
            .await;
        let err = result.unwrap_err();
        assert_eq!(err.status(), Some(400));
        assert_eq!(err.field_message("quantity").as_deref(), Some("Not enough stock"));
        assert_eq!(h.backend.refresh_calls(), 0);
    }

    #[tokio::test]
    async fn test_anonymous_login_401_does_not_refresh() {
        let h = harness(FakeBackend::new("valid", "r1"), None, Some("r1"));
        let result = h
            .client
            .send_anonymous(ApiRequest::get("products/"))
            .await;
        assert_eq!(result, Err(ApiError::Unauthorized));
        assert_eq!(h.backend.refresh_calls(), 0);
        assert_eq!(h.expired.get(), 0);

        h.store.store_pair(
            &TokenPair {
                access: "valid".into(),
                refresh: "r1".into(),
            },
            true,
        );
        assert!(h.client.send(ApiRequest::get("products/")).await.is_ok());
    }
}
