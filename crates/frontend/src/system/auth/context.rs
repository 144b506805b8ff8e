use contracts::system::auth::TokenClaims;
use leptos::prelude::*;

use super::claims::decode_claims;
use super::storage::{BrowserSessionStore, SessionStore};
use super::api;
use crate::shared::http::ApiError;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub access_token: Option<String>,
    pub claims: Option<TokenClaims>,
}

impl AuthState {
    pub fn from_token(access_token: Option<String>) -> Self {
        let claims = access_token.as_deref().and_then(decode_claims);
        Self {
            access_token,
            claims,
        }
    }

    /// Display hint only; the server decides what an account may do.
    pub fn is_admin(&self) -> bool {
        self.claims.as_ref().map(|c| c.is_admin).unwrap_or(false)
    }

    pub fn username(&self) -> Option<String> {
        self.claims.as_ref().and_then(|c| c.username.clone())
    }
}

/// Auth context provider component
///
/// Restores the state from storage synchronously; no network round-trip.
#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let initial = AuthState::from_token(BrowserSessionStore::browser().access_token());
    let (auth_state, set_auth_state) = signal(initial);

    provide_context(auth_state);
    provide_context(set_auth_state);

    children()
}

/// Hook to access auth state
pub fn use_auth() -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
    let auth_state =
        use_context::<ReadSignal<AuthState>>().expect("AuthProvider not found in component tree");
    let set_auth_state =
        use_context::<WriteSignal<AuthState>>().expect("AuthProvider not found in component tree");

    (auth_state, set_auth_state)
}

/// True while an access token is stored in either tier.
pub fn is_authenticated() -> bool {
    BrowserSessionStore::browser().access_token().is_some()
}

/// Helper: Perform login
pub async fn do_login(
    username: String,
    password: String,
    remember: bool,
    set_auth_state: WriteSignal<AuthState>,
) -> Result<(), ApiError> {
    let pair = api::login(username.clone(), password).await?;

    let store = BrowserSessionStore::browser();
    store.store_pair(&pair, remember);
    store.remember_username(remember.then_some(username.as_str()));
    log::info!("signed in as {} (remember: {})", username, remember);

    set_auth_state.set(AuthState::from_token(Some(pair.access)));
    Ok(())
}

/// Helper: Perform logout
///
/// Client-only: refresh tokens are not revoked on the server.
pub fn do_logout(set_auth_state: WriteSignal<AuthState>) {
    BrowserSessionStore::browser().clear();
    set_auth_state.set(AuthState::default());
    log::info!("signed out");
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine as _;

    #[test]
    fn test_state_from_token() {
        let payload = URL_SAFE_NO_PAD.encode(r#"{"username":"kim","is_admin":true}"#);
        let state = AuthState::from_token(Some(format!("h.{}.s", payload)));
        assert!(state.is_admin());
        assert_eq!(state.username().as_deref(), Some("kim"));

        let anonymous = AuthState::from_token(None);
        assert!(!anonymous.is_admin());
        assert!(anonymous.username().is_none());
    }

    #[test]
    fn test_opaque_token_has_no_claims() {
        let state = AuthState::from_token(Some("opaque".to_string()));
        assert!(state.access_token.is_some());
        assert!(!state.is_admin());
    }
}
