//! Token persistence across the two browser storage tiers.
//!
//! "Durable" is `localStorage` (survives a browser restart), "session" is
//! `sessionStorage`. A pair lives in exactly one tier; readers look in the
//! durable tier first.

use contracts::system::auth::TokenPair;
use web_sys::window;

pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";
pub const SAVED_USERNAME_KEY: &str = "saved_username";

/// Minimal string key/value store.
pub trait KeyValueStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Credential store consumed by the HTTP client.
pub trait SessionStore {
    fn access_token(&self) -> Option<String>;
    fn refresh_token(&self) -> Option<String>;
    /// Persist a freshly issued pair, replacing whatever was stored before.
    fn store_pair(&self, pair: &TokenPair, remember: bool);
    /// Replace only the access token, keeping it next to its refresh token.
    fn store_access_token(&self, token: &str);
    /// Remove the pair from both tiers.
    fn clear(&self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageTier {
    Durable,
    Session,
}

/// `window.localStorage` / `window.sessionStorage`.
#[derive(Debug, Clone, Copy)]
pub struct WebStorage {
    tier: StorageTier,
}

impl WebStorage {
    pub fn new(tier: StorageTier) -> Self {
        Self { tier }
    }

    fn storage(&self) -> Option<web_sys::Storage> {
        let window = window()?;
        match self.tier {
            StorageTier::Durable => window.local_storage().ok()?,
            StorageTier::Session => window.session_storage().ok()?,
        }
    }
}

impl KeyValueStorage for WebStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = self.storage() {
            if storage.set_item(key, value).is_err() {
                log::warn!("storage quota exceeded writing '{}'", key);
            }
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = self.storage() {
            let _ = storage.remove_item(key);
        }
    }
}

/// Durable + session tiers behind one [`SessionStore`].
pub struct TieredSessionStore<D, S> {
    durable: D,
    session: S,
}

pub type BrowserSessionStore = TieredSessionStore<WebStorage, WebStorage>;

impl BrowserSessionStore {
    pub fn browser() -> Self {
        Self::new(
            WebStorage::new(StorageTier::Durable),
            WebStorage::new(StorageTier::Session),
        )
    }
}

impl<D: KeyValueStorage, S: KeyValueStorage> TieredSessionStore<D, S> {
    pub fn new(durable: D, session: S) -> Self {
        Self { durable, session }
    }

    pub fn durable(&self) -> &D {
        &self.durable
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    /// True when the current pair was stored with "remember me".
    pub fn has_durable_session(&self) -> bool {
        self.durable.get(ACCESS_TOKEN_KEY).is_some()
    }

    pub fn saved_username(&self) -> Option<String> {
        self.durable.get(SAVED_USERNAME_KEY)
    }

    /// Keep the username for the next visit, or forget it.
    pub fn remember_username(&self, username: Option<&str>) {
        match username {
            Some(name) => self.durable.set(SAVED_USERNAME_KEY, name),
            None => {
                if self.durable.get(SAVED_USERNAME_KEY).is_some() {
                    self.durable.remove(SAVED_USERNAME_KEY);
                }
            }
        }
    }

    fn tier(&self, tier: StorageTier) -> &dyn KeyValueStorage {
        match tier {
            StorageTier::Durable => &self.durable,
            StorageTier::Session => &self.session,
        }
    }

    /// Tier holding the current pair. Falls back to durable for a
    /// dangling access token.
    fn pair_tier(&self) -> StorageTier {
        if self.durable.get(REFRESH_TOKEN_KEY).is_some() {
            StorageTier::Durable
        } else if self.session.get(REFRESH_TOKEN_KEY).is_some()
            || self.session.get(ACCESS_TOKEN_KEY).is_some()
        {
            StorageTier::Session
        } else {
            StorageTier::Durable
        }
    }

    fn clear_tier(&self, tier: StorageTier) {
        let storage = self.tier(tier);
        for key in [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY] {
            if storage.get(key).is_some() {
                storage.remove(key);
            }
        }
    }

    fn read(&self, key: &str) -> Option<String> {
        self.durable
            .get(key)
            .or_else(|| self.session.get(key))
            .filter(|v| !v.is_empty())
    }
}

impl<D: KeyValueStorage, S: KeyValueStorage> SessionStore for TieredSessionStore<D, S> {
    fn access_token(&self) -> Option<String> {
        self.read(ACCESS_TOKEN_KEY)
    }

    fn refresh_token(&self) -> Option<String> {
        self.read(REFRESH_TOKEN_KEY)
    }

    fn store_pair(&self, pair: &TokenPair, remember: bool) {
        let (target, other) = if remember {
            (StorageTier::Durable, StorageTier::Session)
        } else {
            (StorageTier::Session, StorageTier::Durable)
        };
        self.clear_tier(other);
        let storage = self.tier(target);
        storage.set(ACCESS_TOKEN_KEY, &pair.access);
        storage.set(REFRESH_TOKEN_KEY, &pair.refresh);
    }

    fn store_access_token(&self, token: &str) {
        self.tier(self.pair_tier()).set(ACCESS_TOKEN_KEY, token);
    }

    fn clear(&self) {
        self.clear_tier(StorageTier::Durable);
        self.clear_tier(StorageTier::Session);
    }
}

/// Clear all authentication tokens
pub fn clear_tokens() {
    BrowserSessionStore::browser().clear();
}

#[cfg(test)]
pub(crate) mod memory {
    use super::KeyValueStorage;
    use std::cell::{Cell, RefCell};
    use std::collections::HashMap;

    /// In-memory tier that also counts mutations.
    #[derive(Default)]
    pub struct MemoryStorage {
        items: RefCell<HashMap<String, String>>,
        writes: Cell<usize>,
    }

    impl MemoryStorage {
        pub fn writes(&self) -> usize {
            self.writes.get()
        }

        pub fn is_empty(&self) -> bool {
            self.items.borrow().is_empty()
        }
    }

    impl KeyValueStorage for MemoryStorage {
        fn get(&self, key: &str) -> Option<String> {
            self.items.borrow().get(key).cloned()
        }

        fn set(&self, key: &str, value: &str) {
            self.writes.set(self.writes.get() + 1);
            self.items
                .borrow_mut()
                .insert(key.to_string(), value.to_string());
        }

        fn remove(&self, key: &str) {
            self.writes.set(self.writes.get() + 1);
            self.items.borrow_mut().remove(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::memory::MemoryStorage;
    use super::*;

    fn store() -> TieredSessionStore<MemoryStorage, MemoryStorage> {
        TieredSessionStore::new(MemoryStorage::default(), MemoryStorage::default())
    }

    fn pair(access: &str, refresh: &str) -> TokenPair {
        TokenPair {
            access: access.to_string(),
            refresh: refresh.to_string(),
        }
    }

    #[test]
    fn test_remembered_pair_goes_to_durable_tier() {
        let s = store();
        s.store_pair(&pair("a1", "r1"), true);
        assert_eq!(s.durable().get(ACCESS_TOKEN_KEY).as_deref(), Some("a1"));
        assert_eq!(s.durable().get(REFRESH_TOKEN_KEY).as_deref(), Some("r1"));
        assert!(s.session().is_empty());
        assert!(s.has_durable_session());
    }

    #[test]
    fn test_unremembered_login_leaves_durable_untouched() {
        let s = store();
        s.store_pair(&pair("a1", "r1"), false);
        s.remember_username(None);
        assert_eq!(s.durable().writes(), 0);
        assert_eq!(s.session().get(ACCESS_TOKEN_KEY).as_deref(), Some("a1"));
        assert_eq!(s.access_token().as_deref(), Some("a1"));
        assert_eq!(s.refresh_token().as_deref(), Some("r1"));
        assert!(!s.has_durable_session());
    }

    #[test]
    fn test_new_pair_replaces_pair_in_other_tier() {
        let s = store();
        s.store_pair(&pair("old", "old-r"), true);
        s.store_pair(&pair("new", "new-r"), false);
        assert!(s.durable().get(ACCESS_TOKEN_KEY).is_none());
        assert_eq!(s.access_token().as_deref(), Some("new"));
        assert_eq!(s.refresh_token().as_deref(), Some("new-r"));
    }

    #[test]
    fn test_durable_tier_read_first() {
        let s = store();
        s.session().set(ACCESS_TOKEN_KEY, "from-session");
        s.durable().set(ACCESS_TOKEN_KEY, "from-durable");
        assert_eq!(s.access_token().as_deref(), Some("from-durable"));
    }

    #[test]
    fn test_refreshed_access_token_stays_in_pair_tier() {
        let s = store();
        s.store_pair(&pair("a1", "r1"), false);
        s.store_access_token("a2");
        assert_eq!(s.session().get(ACCESS_TOKEN_KEY).as_deref(), Some("a2"));
        assert!(s.durable().get(ACCESS_TOKEN_KEY).is_none());

        let s = store();
        s.store_pair(&pair("a1", "r1"), true);
        s.store_access_token("a2");
        assert_eq!(s.durable().get(ACCESS_TOKEN_KEY).as_deref(), Some("a2"));
        assert!(s.session().is_empty());
    }

    #[test]
    fn test_clear_removes_both_tiers() {
        let s = store();
        s.durable().set(ACCESS_TOKEN_KEY, "a");
        s.session().set(REFRESH_TOKEN_KEY, "r");
        s.clear();
        assert!(s.access_token().is_none());
        assert!(s.refresh_token().is_none());
    }

    #[test]
    fn test_clear_keeps_saved_username() {
        let s = store();
        s.store_pair(&pair("a", "r"), true);
        s.remember_username(Some("alice"));
        s.clear();
        assert_eq!(s.saved_username().as_deref(), Some("alice"));
        s.remember_username(None);
        assert!(s.saved_username().is_none());
    }

    #[test]
    fn test_empty_value_is_absent() {
        let s = store();
        s.durable().set(ACCESS_TOKEN_KEY, "");
        assert!(s.access_token().is_none());
    }
}
