//! # ScholarLink
//!
//! Client-side session and authorization core for the ScholarLink academic
//! tutoring marketplace. Students place orders, writers fulfill them, and
//! admins oversee the workflow; the backend performs all business logic.
//! This crate owns the one part of the client that has real contracts:
//! the token lifecycle, the session state machine, and role-based access
//! guards.
//!
//! ## Architecture
//!
//! - [`store`]: the [`store::TokenStore`] persistence boundary for the
//!   access/refresh credential pair, with in-memory and file-backed
//!   implementations. The file store is shared across processes of the
//!   same user, the analogue of origin-scoped browser storage.
//! - [`auth`]: user and credential models, the typed [`auth::AuthError`]
//!   taxonomy, and the [`auth::AuthService`] boundary trait behind which
//!   the remote backend lives.
//! - [`session`]: [`session::SessionManager`], the single source of truth
//!   for "who is signed in". It orchestrates initialization, login,
//!   registration, logout, and user refresh, and publishes immutable
//!   [`session::Session`] snapshots over a watch channel.
//! - [`guard`]: route- and content-level access decisions evaluated
//!   against the current session and a per-view [`guard::GuardPolicy`].
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use scholar_link::auth::LoginRequest;
//! use scholar_link::session::SessionManager;
//! use scholar_link::store::MemoryTokenStore;
//!
//! # async fn demo(service: Arc<dyn scholar_link::auth::AuthService>) {
//! let store = Arc::new(MemoryTokenStore::new());
//! let session = SessionManager::new(service, store);
//! session.initialize().await;
//!
//! if !session.snapshot().is_authenticated() {
//!     let request = LoginRequest {
//!         email: "student@example.com".to_string(),
//!         password: "secret".to_string(),
//!     };
//!     if let Err(err) = session.login(request).await {
//!         eprintln!("sign-in failed: {err}");
//!     }
//! }
//! # }
//! ```

/// Credential models, error taxonomy, and the backend service boundary.
pub mod auth;
pub use auth::{AuthError, AuthPayload, AuthResult, AuthService, Role, User};

/// Access-guard policies and decisions.
pub mod guard;
pub use guard::{ContentDecision, GuardPolicy, RouteDecision};

/// Session state machine and cross-process invalidation sync.
pub mod session;
pub use session::{Session, SessionManager};

/// Token persistence boundary.
pub mod store;
pub use store::{FileTokenStore, MemoryTokenStore, TokenStore};
