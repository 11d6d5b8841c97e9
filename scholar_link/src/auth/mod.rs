//! Authentication models, errors, and the backend service boundary.
//!
//! The remote backend is a black box reached through the [`AuthService`]
//! trait: it validates credentials, issues the access/refresh token pair,
//! and owns the user record. Everything in this module is the client-side
//! shape of that contract.

pub mod errors;
pub mod models;
pub mod service;

pub use errors::{AuthError, AuthResult, FieldError};
pub use models::{AuthPayload, LoginRequest, RegisterRequest, Role, SessionTokens, User, UserId};
pub use service::AuthService;
