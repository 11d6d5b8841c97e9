//! In-memory token store.

use super::TokenStore;
use crate::auth::SessionTokens;
use std::sync::Mutex;

/// Process-local token store.
///
/// Holds the pair under a mutex so several session handles can share one
/// store through an `Arc`, the same way browser tabs share one storage
/// area. Nothing is persisted; dropping the store is a logout.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    tokens: Mutex<Option<SessionTokens>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_tokens<T>(&self, f: impl FnOnce(&mut Option<SessionTokens>) -> T) -> T {
        // recover the inner value if a panicking test poisoned the lock
        let mut guard = self.tokens.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut guard)
    }
}

impl TokenStore for MemoryTokenStore {
    fn set_tokens(&self, access: &str, refresh: &str) {
        self.with_tokens(|slot| {
            *slot = Some(SessionTokens {
                access_token: access.to_string(),
                refresh_token: refresh.to_string(),
            });
        });
    }

    fn access_token(&self) -> Option<String> {
        self.with_tokens(|slot| slot.as_ref().map(|pair| pair.access_token.clone()))
    }

    fn refresh_token(&self) -> Option<String> {
        self.with_tokens(|slot| slot.as_ref().map(|pair| pair.refresh_token.clone()))
    }

    fn clear_tokens(&self) {
        self.with_tokens(|slot| *slot = None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_store_is_anonymous() {
        let store = MemoryTokenStore::new();
        assert!(!store.is_authenticated());
        assert_eq!(store.access_token(), None);
        assert_eq!(store.refresh_token(), None);
    }

    #[test]
    fn test_set_tokens_stores_the_pair() {
        let store = MemoryTokenStore::new();
        store.set_tokens("access-1", "refresh-1");
        assert!(store.is_authenticated());
        assert_eq!(store.access_token().as_deref(), Some("access-1"));
        assert_eq!(store.refresh_token().as_deref(), Some("refresh-1"));
    }

    #[test]
    fn test_set_tokens_replaces_the_whole_pair() {
        let store = MemoryTokenStore::new();
        store.set_tokens("access-1", "refresh-1");
        store.set_tokens("access-2", "refresh-2");
        assert_eq!(store.access_token().as_deref(), Some("access-2"));
        assert_eq!(store.refresh_token().as_deref(), Some("refresh-2"));
    }

    #[test]
    fn test_clear_tokens_is_idempotent() {
        let store = MemoryTokenStore::new();
        store.set_tokens("access-1", "refresh-1");
        store.clear_tokens();
        assert!(!store.is_authenticated());
        // clearing an already-empty store is a no-op
        store.clear_tokens();
        assert!(!store.is_authenticated());
        assert_eq!(store.refresh_token(), None);
    }
}
