//! Token persistence boundary.
//!
//! The credential pair is owned by exactly one store per client instance.
//! Tokens are written and cleared as a pair, never individually, and the
//! absence of an access token is the canonical "logged out" signal,
//! including for other processes watching the same medium (see
//! [`crate::session::sync`]).

pub mod file;
pub mod memory;

pub use file::FileTokenStore;
pub use memory::MemoryTokenStore;

/// Storage for the access/refresh credential pair.
///
/// The API is deliberately infallible: the store mirrors origin-scoped
/// browser storage, where reads and writes cannot fail. Implementations
/// backed by real I/O log failures instead of surfacing them; a failed
/// read simply looks like a signed-out store.
pub trait TokenStore: Send + Sync {
    /// Store both tokens atomically. After this returns,
    /// [`is_authenticated`](TokenStore::is_authenticated) is true.
    fn set_tokens(&self, access: &str, refresh: &str);

    /// Stored access token, if any. No side effects.
    fn access_token(&self) -> Option<String>;

    /// Stored refresh token, if any. No side effects.
    fn refresh_token(&self) -> Option<String>;

    /// True iff an access token is present. Existence check only:
    /// validity is discovered lazily by the first rejected request.
    fn is_authenticated(&self) -> bool {
        self.access_token().is_some()
    }

    /// Remove both tokens atomically. Idempotent: clearing an empty
    /// store is a no-op, not an error.
    fn clear_tokens(&self);
}
