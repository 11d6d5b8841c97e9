//! Authentication data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User ID type
pub type UserId = i64;

/// Marketplace role, the sole authorization discriminant.
///
/// A user holds exactly one role for their whole account lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Places orders and funds them
    Student,
    /// Claims and fulfills orders
    Writer,
    /// Oversees the whole workflow
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Writer => "writer",
            Role::Admin => "admin",
        }
    }

    /// Default landing area for this role, used when a guard turns an
    /// authenticated user away from a view their role cannot access.
    pub fn landing_path(&self) -> &'static str {
        match self {
            Role::Student => "/orders",
            Role::Writer => "/jobs",
            Role::Admin => "/admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User profile as served by the backend.
///
/// Immutable from the client's perspective; it is only ever replaced
/// wholesale by a fresh server response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub is_active: bool,
    pub date_joined: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login: Option<DateTime<Utc>>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Sign-in request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Account creation request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
}

/// Access/refresh credential pair.
///
/// Always handled as a pair: stored together, cleared together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionTokens {
    pub access_token: String,
    pub refresh_token: String,
}

/// Successful login/register payload: fresh tokens plus the signed-in user.
#[derive(Debug, Clone)]
pub struct AuthPayload {
    pub tokens: SessionTokens,
    pub user: User,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: 7,
            email: "w@example.com".to_string(),
            first_name: "Wren".to_string(),
            last_name: "Okafor".to_string(),
            role: Role::Writer,
            is_active: true,
            date_joined: "2024-05-01T12:00:00Z".parse().unwrap(),
            last_login: None,
        }
    }

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Student).unwrap(), "\"student\"");
        assert_eq!(serde_json::to_string(&Role::Writer).unwrap(), "\"writer\"");
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
    }

    #[test]
    fn test_role_deserializes_lowercase() {
        let role: Role = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(role, Role::Admin);
    }

    #[test]
    fn test_user_wire_shape_is_camel_case() {
        let json = serde_json::to_value(sample_user()).unwrap();
        assert!(json.get("firstName").is_some());
        assert!(json.get("isActive").is_some());
        assert!(json.get("dateJoined").is_some());
        // absent lastLogin is omitted, not null
        assert!(json.get("lastLogin").is_none());
    }

    #[test]
    fn test_user_parses_without_last_login() {
        let json = r#"{
            "id": 1,
            "email": "s@example.com",
            "firstName": "Sam",
            "lastName": "Iyer",
            "role": "student",
            "isActive": true,
            "dateJoined": "2024-01-15T09:30:00Z"
        }"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.role, Role::Student);
        assert_eq!(user.last_login, None);
        assert_eq!(user.full_name(), "Sam Iyer");
    }

    #[test]
    fn test_register_request_wire_shape() {
        let request = RegisterRequest {
            email: "n@example.com".to_string(),
            password: "Secret123".to_string(),
            first_name: "Noor".to_string(),
            last_name: "Haddad".to_string(),
            role: Role::Student,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["firstName"], "Noor");
        assert_eq!(json["role"], "student");
    }

    #[test]
    fn test_landing_paths_are_role_specific() {
        assert_ne!(Role::Student.landing_path(), Role::Writer.landing_path());
        assert_ne!(Role::Writer.landing_path(), Role::Admin.landing_path());
    }
}
