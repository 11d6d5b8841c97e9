//! Backend service boundary.

use super::{
    errors::AuthResult,
    models::{AuthPayload, LoginRequest, RegisterRequest, User},
};
use async_trait::async_trait;

/// The remote authentication backend, as seen by the session core.
///
/// Implementations perform the network calls; the session layer never
/// touches the wire directly. Each operation either resolves with a typed
/// payload or fails with an [`super::AuthError`]:
///
/// - [`login`](AuthService::login) fails with `InvalidCredentials`, the
///   server message surfaced verbatim.
/// - [`register`](AuthService::register) fails with `Validation` carrying
///   field-level messages.
/// - [`current_user`](AuthService::current_user) fails with `Unauthorized`
///   when the access token is rejected; this is how an expired stored
///   session is discovered (no expiry decoding happens client-side).
/// - [`logout`](AuthService::logout) failures are treated as non-fatal by
///   the caller; local teardown proceeds regardless.
///
/// No timeouts or retries are imposed at this boundary; if an
/// implementation wants them, they are its own concern and opaque to the
/// session layer.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Exchange credentials for a token pair and the signed-in user.
    async fn login(&self, request: LoginRequest) -> AuthResult<AuthPayload>;

    /// Create an account and sign it in, in one step.
    async fn register(&self, request: RegisterRequest) -> AuthResult<AuthPayload>;

    /// Fetch the profile of the user the access token belongs to.
    async fn current_user(&self, access_token: &str) -> AuthResult<User>;

    /// Invalidate the refresh token server-side.
    async fn logout(&self, refresh_token: &str) -> AuthResult<()>;
}
