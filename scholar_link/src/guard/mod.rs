//! Role-based access guards.
//!
//! A guard is evaluated fresh against every published [`Session`] change
//! and tells the embedding UI what to do with a protected view: render
//! it, hold while the initial session check settles, or turn the user
//! away. Two variants share one policy evaluator:
//!
//! - [`route_decision`] gates a whole view and answers with navigation
//!   ([`RouteDecision::Redirect`]).
//! - [`content_decision`] gates a fragment inside a view and answers
//!   with inline fallback ([`ContentDecision::Fallback`]) instead of
//!   navigating away.

use crate::auth::Role;
use crate::session::Session;

/// Where unauthenticated users are sent by default.
pub const DEFAULT_LOGIN_PATH: &str = "/login";

/// Access policy for one protected view or fragment.
///
/// An empty role set admits any authenticated user. With `require_all`
/// the user's single role must equal every entry of the set. Under the
/// one-role-per-user model that can only pass for a singleton set
/// matching the user, which makes the flag near-dead; it is kept for
/// compatibility with existing policy definitions.
#[derive(Debug, Clone)]
pub struct GuardPolicy {
    roles: Vec<Role>,
    require_all: bool,
    redirect_to: String,
}

impl Default for GuardPolicy {
    fn default() -> Self {
        Self::any_authenticated()
    }
}

impl GuardPolicy {
    /// Admit any signed-in user.
    pub fn any_authenticated() -> Self {
        GuardPolicy {
            roles: Vec::new(),
            require_all: false,
            redirect_to: DEFAULT_LOGIN_PATH.to_string(),
        }
    }

    /// Admit only the given role.
    pub fn with_role(role: Role) -> Self {
        Self::with_roles(&[role])
    }

    /// Admit any of the given roles.
    pub fn with_roles(roles: &[Role]) -> Self {
        GuardPolicy {
            roles: roles.to_vec(),
            ..Self::any_authenticated()
        }
    }

    /// Demand the user's role equal every entry of the set instead of
    /// any entry.
    pub fn require_all(mut self, require_all: bool) -> Self {
        self.require_all = require_all;
        self
    }

    /// Override the unauthenticated redirect target.
    pub fn redirect_to(mut self, path: impl Into<String>) -> Self {
        self.redirect_to = path.into();
        self
    }

    /// Shared role-match evaluator.
    pub fn allows(&self, role: Role) -> bool {
        if self.roles.is_empty() {
            return true;
        }
        if self.require_all {
            self.roles.iter().all(|required| *required == role)
        } else {
            self.roles.contains(&role)
        }
    }
}

/// Outcome for a route-level guard wrapping a whole view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// Initial session check still settling: show a loading placeholder,
    /// never redirect yet: bouncing a legitimately signed-in user to
    /// the login page on every hard refresh is the failure mode this
    /// state exists to prevent.
    Pending,
    /// Render the protected view
    Allow,
    /// Navigate away: to the policy's login target when anonymous, or to
    /// the user's own role landing on a role mismatch
    Redirect(String),
}

/// Outcome for a content-level guard wrapping a fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentDecision {
    /// Initial session check still settling: render nothing (no
    /// placeholder flash inside an already-rendered view)
    Hidden,
    /// Render the protected fragment
    Allow,
    /// Render the inline access-restricted fallback
    Fallback,
}

/// Evaluate a route-level guard against the current session.
pub fn route_decision(session: &Session, policy: &GuardPolicy) -> RouteDecision {
    if session.is_initializing {
        return RouteDecision::Pending;
    }
    let Some(role) = session.role() else {
        return RouteDecision::Redirect(policy.redirect_to.clone());
    };
    if policy.allows(role) {
        RouteDecision::Allow
    } else {
        RouteDecision::Redirect(role.landing_path().to_string())
    }
}

/// Evaluate a content-level guard against the current session.
pub fn content_decision(session: &Session, policy: &GuardPolicy) -> ContentDecision {
    if session.is_initializing {
        return ContentDecision::Hidden;
    }
    match session.role() {
        Some(role) if policy.allows(role) => ContentDecision::Allow,
        _ => ContentDecision::Fallback,
    }
}
