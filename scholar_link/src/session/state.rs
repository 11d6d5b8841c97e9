//! Published session state.

use crate::auth::{Role, User};

/// The client's current belief about who is signed in.
///
/// Authentication status is derived from `user` rather than stored next
/// to it, so the two can never disagree in any reachable state.
#[derive(Debug, Clone, Default)]
pub struct Session {
    /// Signed-in user, or `None` when anonymous
    pub user: Option<User>,
    /// A login/register/logout call is in flight
    pub is_loading: bool,
    /// The initial stored-credential check has not settled yet.
    /// Guards must not redirect while this is true.
    pub is_initializing: bool,
    /// Durable user-facing error from the last failed attempt
    pub error: Option<String>,
}

impl Session {
    /// State at manager creation, before [`initialize`] settles.
    ///
    /// [`initialize`]: super::SessionManager::initialize
    pub(crate) fn initializing() -> Self {
        Session {
            is_initializing: true,
            ..Session::default()
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Role of the signed-in user, `None` when anonymous
    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|user| user.role)
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.role() == Some(role)
    }

    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        self.role().is_some_and(|own| roles.contains(&own))
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn session_with_role(role: Role) -> Session {
        Session {
            user: Some(User {
                id: 1,
                email: "u@example.com".to_string(),
                first_name: "Uma".to_string(),
                last_name: "Reyes".to_string(),
                role,
                is_active: true,
                date_joined: Utc::now(),
                last_login: None,
            }),
            ..Session::default()
        }
    }

    #[test]
    fn test_default_session_is_anonymous() {
        let session = Session::default();
        assert!(!session.is_authenticated());
        assert_eq!(session.role(), None);
        assert!(!session.is_student());
        assert!(!session.is_writer());
        assert!(!session.is_admin());
    }

    #[test]
    fn test_authentication_tracks_user_presence() {
        let mut session = session_with_role(Role::Student);
        assert!(session.is_authenticated());
        session.user = None;
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_role_helpers() {
        let session = session_with_role(Role::Writer);
        assert!(session.is_writer());
        assert!(!session.is_student());
        assert!(session.has_role(Role::Writer));
        assert!(session.has_any_role(&[Role::Writer, Role::Admin]));
        assert!(!session.has_any_role(&[Role::Student, Role::Admin]));
        assert!(!session.has_any_role(&[]));
    }

    #[test]
    fn test_anonymous_role_helpers_are_false() {
        let session = Session::default();
        assert!(!session.has_role(Role::Admin));
        assert!(!session.has_any_role(&[Role::Student, Role::Writer, Role::Admin]));
    }
}
