//! Session manager implementation.

use super::state::Session;
use crate::auth::{
    AuthError, AuthPayload, AuthResult, AuthService, LoginRequest, RegisterRequest, Role, User,
};
use crate::store::TokenStore;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tokio::sync::watch;

struct ManagerInner {
    service: Arc<dyn AuthService>,
    store: Arc<dyn TokenStore>,
    state: watch::Sender<Session>,
    /// Bumped by logout and external invalidation; a sign-in that
    /// resolves with a stale stamp is discarded instead of applied.
    generation: AtomicU64,
    login_in_flight: AtomicBool,
    register_in_flight: AtomicBool,
}

/// Single source of truth for "who is signed in".
///
/// Cheap to clone; all clones share one [`Session`]. The manager is
/// dependency-injected rather than process-global: construct it at the
/// application root and hand clones to whatever needs session state.
///
/// Call [`initialize`](SessionManager::initialize) once after
/// construction. Until it settles, the published session reports
/// `is_initializing` and guards hold their fire.
#[derive(Clone)]
pub struct SessionManager {
    inner: Arc<ManagerInner>,
}

impl SessionManager {
    pub fn new(service: Arc<dyn AuthService>, store: Arc<dyn TokenStore>) -> Self {
        let (state, _) = watch::channel(Session::initializing());
        Self {
            inner: Arc::new(ManagerInner {
                service,
                store,
                state,
                generation: AtomicU64::new(0),
                login_in_flight: AtomicBool::new(false),
                register_in_flight: AtomicBool::new(false),
            }),
        }
    }

    /// Current session snapshot.
    pub fn snapshot(&self) -> Session {
        self.inner.state.borrow().clone()
    }

    /// Subscribe to session changes. The receiver always holds the
    /// latest published state.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.inner.state.subscribe()
    }

    /// Resolve the stored credential pair into an initial session.
    ///
    /// No stored tokens: settle anonymous without a network call. Stored
    /// tokens: fetch the current user; a rejected token is an expected
    /// "session expired" condition and settles anonymous silently, any
    /// other failure settles anonymous with the error mirrored into the
    /// session. Every exit path ends with `is_initializing == false`;
    /// a second call after settling is a no-op.
    pub async fn initialize(&self) {
        if !self.inner.state.borrow().is_initializing {
            return;
        }
        let Some(access_token) = self.inner.store.access_token() else {
            self.settle_initialized(None, None);
            return;
        };
        match self.inner.service.current_user(&access_token).await {
            Ok(user) => {
                log::debug!("restored session for {}", user.email);
                self.settle_initialized(Some(user), None);
            }
            Err(AuthError::Unauthorized) => {
                log::info!("stored session rejected by the server, signing out");
                self.inner.store.clear_tokens();
                self.settle_initialized(None, None);
            }
            Err(err) => {
                log::warn!("session restore failed: {err}");
                self.inner.store.clear_tokens();
                self.settle_initialized(None, Some(err.client_message()));
            }
        }
    }

    /// Sign in with email and password.
    ///
    /// Failures are reported twice on purpose: mirrored into
    /// [`Session::error`] for ambient display, and returned to the
    /// caller so a form can settle its own submit flow synchronously.
    /// A concurrent `login` is rejected with
    /// [`AuthError::OperationInFlight`] rather than racing.
    pub async fn login(&self, request: LoginRequest) -> AuthResult<User> {
        if self.inner.login_in_flight.swap(true, Ordering::SeqCst) {
            return Err(AuthError::OperationInFlight("login"));
        }
        let generation = self.begin_attempt();
        let result = self.inner.service.login(request).await;
        self.inner.login_in_flight.store(false, Ordering::SeqCst);
        self.settle_attempt(generation, result)
    }

    /// Create an account and sign it in. Same shape and error reporting
    /// as [`login`](SessionManager::login).
    pub async fn register(&self, request: RegisterRequest) -> AuthResult<User> {
        if self.inner.register_in_flight.swap(true, Ordering::SeqCst) {
            return Err(AuthError::OperationInFlight("register"));
        }
        let generation = self.begin_attempt();
        let result = self.inner.service.register(request).await;
        self.inner.register_in_flight.store(false, Ordering::SeqCst);
        self.settle_attempt(generation, result)
    }

    /// Sign out.
    ///
    /// The remote logout call is attempted but its failure is swallowed:
    /// the user's intent to leave must succeed locally even when the
    /// server is unreachable. Token clearing and the anonymous reset run
    /// unconditionally.
    pub async fn logout(&self) {
        self.inner.state.send_modify(|session| session.is_loading = true);
        // anything still in flight must not resurrect this session
        self.inner.generation.fetch_add(1, Ordering::SeqCst);
        if let Some(refresh_token) = self.inner.store.refresh_token()
            && let Err(err) = self.inner.service.logout(&refresh_token).await
        {
            log::warn!("remote logout failed, clearing local session anyway: {err}");
        }
        self.inner.store.clear_tokens();
        self.inner.state.send_modify(|session| *session = Session::default());
    }

    /// Re-fetch the signed-in user's profile.
    ///
    /// No-op when anonymous. Failures are logged, not surfaced: a stale
    /// profile is preferred over disrupting the UI.
    pub async fn refresh_user(&self) {
        if !self.inner.state.borrow().is_authenticated() {
            return;
        }
        let Some(access_token) = self.inner.store.access_token() else {
            return;
        };
        let generation = self.inner.generation.load(Ordering::SeqCst);
        match self.inner.service.current_user(&access_token).await {
            Ok(user) => {
                if self.inner.generation.load(Ordering::SeqCst) != generation {
                    // signed out while the fetch was in flight
                    return;
                }
                self.inner.state.send_modify(|session| {
                    if session.user.is_some() {
                        session.user = Some(user);
                    }
                });
            }
            Err(err) => {
                log::warn!("user refresh failed, keeping cached profile: {err}");
            }
        }
    }

    /// Clear the durable error. No other effect.
    pub fn clear_error(&self) {
        self.inner.state.send_modify(|session| session.error = None);
    }

    /// Drop the session if the shared store lost its tokens externally.
    ///
    /// This is the reconciliation step behind cross-process invalidation
    /// (another "tab" logging out): token absence in the store is
    /// authoritative, and no network call is made. Token *addition* is
    /// deliberately ignored; there is no auto-login across processes.
    /// Returns whether the session was invalidated.
    pub fn reconcile_with_store(&self) -> bool {
        if !self.inner.state.borrow().is_authenticated() || self.inner.store.is_authenticated() {
            return false;
        }
        log::info!("session tokens cleared externally, signing out locally");
        self.inner.generation.fetch_add(1, Ordering::SeqCst);
        self.inner.state.send_modify(|session| {
            session.user = None;
            session.is_loading = false;
        });
        true
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.inner.state.borrow().has_role(role)
    }

    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        self.inner.state.borrow().has_any_role(roles)
    }

    pub fn is_student(&self) -> bool {
        self.has_role(Role::Student)
    }

    pub fn is_writer(&self) -> bool {
        self.has_role(Role::Writer)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Admin)
    }

    fn begin_attempt(&self) -> u64 {
        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.inner.state.send_modify(|session| {
            session.is_loading = true;
            session.error = None;
        });
        generation
    }

    fn settle_attempt(&self, generation: u64, result: AuthResult<AuthPayload>) -> AuthResult<User> {
        if self.inner.generation.load(Ordering::SeqCst) != generation {
            // a logout or external invalidation won; the state it left
            // behind stands and this result is discarded
            return Err(AuthError::Superseded);
        }
        match result {
            Ok(payload) => {
                self.inner
                    .store
                    .set_tokens(&payload.tokens.access_token, &payload.tokens.refresh_token);
                let user = payload.user;
                self.inner.state.send_modify(|session| {
                    session.user = Some(user.clone());
                    session.is_loading = false;
                    session.error = None;
                });
                Ok(user)
            }
            Err(err) => {
                let message = err.client_message();
                self.inner.state.send_modify(|session| {
                    session.is_loading = false;
                    session.error = Some(message);
                });
                Err(err)
            }
        }
    }

    fn settle_initialized(&self, user: Option<User>, error: Option<String>) {
        self.inner.state.send_modify(|session| {
            session.user = user;
            session.error = error;
            session.is_loading = false;
            session.is_initializing = false;
        });
    }
}
