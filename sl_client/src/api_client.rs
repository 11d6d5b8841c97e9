//! HTTP API client for the ScholarLink backend.

use async_trait::async_trait;
use reqwest::StatusCode;
use scholar_link::auth::{
    AuthError, AuthPayload, AuthResult, AuthService, FieldError, LoginRequest, RegisterRequest,
    SessionTokens, User,
};
use serde::Deserialize;
use std::collections::HashMap;

/// API client for communicating with the ScholarLink backend.
///
/// Implements the [`AuthService`] boundary over the documented REST
/// contract. No timeouts or retries are layered on here; the session
/// core treats this boundary as opaque.
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
}

/// Token payload as served by the backend
#[derive(Debug, Deserialize)]
struct AuthResponse {
    access: String,
    refresh: String,
    user: User,
}

#[derive(Debug, serde::Serialize)]
struct LogoutBody<'a> {
    refresh: &'a str,
}

/// Error body shape: `{ message, code?, status?, field?, details? }`
#[derive(Debug, Default, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
    #[allow(dead_code)]
    code: Option<String>,
    #[allow(dead_code)]
    status: Option<u16>,
    field: Option<String>,
    details: Option<HashMap<String, String>>,
}

impl ApiErrorBody {
    fn message_or(&self, fallback: &str) -> String {
        self.message.clone().unwrap_or_else(|| fallback.to_string())
    }

    fn field_errors(&self) -> Vec<FieldError> {
        let mut fields = Vec::new();
        if let Some(details) = &self.details {
            for (field, message) in details {
                fields.push(FieldError {
                    field: field.clone(),
                    message: message.clone(),
                });
            }
        }
        if let Some(field) = &self.field
            && !fields.iter().any(|entry| &entry.field == field)
        {
            fields.push(FieldError {
                field: field.clone(),
                message: self.message_or("Invalid value"),
            });
        }
        fields.sort_by(|a, b| a.field.cmp(&b.field));
        fields
    }
}

impl From<AuthResponse> for AuthPayload {
    fn from(response: AuthResponse) -> Self {
        AuthPayload {
            tokens: SessionTokens {
                access_token: response.access,
                refresh_token: response.refresh,
            },
            user: response.user,
        }
    }
}

fn transport(err: reqwest::Error) -> AuthError {
    AuthError::Transport(err.to_string())
}

impl ApiClient {
    /// Create a new API client
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Read the documented error body, tolerating servers that answer
    /// with plain text or nothing at all.
    async fn error_body(response: reqwest::Response) -> ApiErrorBody {
        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(_) => return ApiErrorBody::default(),
        };
        serde_json::from_slice(&bytes).unwrap_or_else(|_| ApiErrorBody {
            message: Some(String::from_utf8_lossy(&bytes).trim().to_string())
                .filter(|text| !text.is_empty()),
            ..ApiErrorBody::default()
        })
    }

    async fn parse_payload(response: reqwest::Response) -> AuthResult<AuthPayload> {
        let payload: AuthResponse = response
            .json()
            .await
            .map_err(|err| AuthError::Protocol(err.to_string()))?;
        Ok(payload.into())
    }
}

#[async_trait]
impl AuthService for ApiClient {
    async fn login(&self, request: LoginRequest) -> AuthResult<AuthPayload> {
        let response = self
            .client
            .post(self.url("/auth/login/"))
            .json(&request)
            .send()
            .await
            .map_err(transport)?;

        match response.status() {
            status if status.is_success() => Self::parse_payload(response).await,
            StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED => {
                let body = Self::error_body(response).await;
                Err(AuthError::InvalidCredentials(
                    body.message_or("Invalid credentials"),
                ))
            }
            status => Err(AuthError::Protocol(format!(
                "login returned HTTP {status}"
            ))),
        }
    }

    async fn register(&self, request: RegisterRequest) -> AuthResult<AuthPayload> {
        let response = self
            .client
            .post(self.url("/auth/register/"))
            .json(&request)
            .send()
            .await
            .map_err(transport)?;

        match response.status() {
            status if status.is_success() => Self::parse_payload(response).await,
            StatusCode::BAD_REQUEST => {
                let body = Self::error_body(response).await;
                Err(AuthError::Validation {
                    message: body.message_or("Registration failed"),
                    fields: body.field_errors(),
                })
            }
            status => Err(AuthError::Protocol(format!(
                "register returned HTTP {status}"
            ))),
        }
    }

    async fn current_user(&self, access_token: &str) -> AuthResult<User> {
        let response = self
            .client
            .get(self.url("/auth/me/"))
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(transport)?;

        match response.status() {
            status if status.is_success() => response
                .json()
                .await
                .map_err(|err| AuthError::Protocol(err.to_string())),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(AuthError::Unauthorized),
            status => Err(AuthError::Protocol(format!(
                "current-user returned HTTP {status}"
            ))),
        }
    }

    async fn logout(&self, refresh_token: &str) -> AuthResult<()> {
        let response = self
            .client
            .post(self.url("/auth/logout/"))
            .json(&LogoutBody {
                refresh: refresh_token,
            })
            .send()
            .await
            .map_err(transport)?;

        if response.status().is_success() {
            Ok(())
        } else {
            // callers treat this as non-fatal, but report it faithfully
            Err(AuthError::Protocol(format!(
                "logout returned HTTP {}",
                response.status()
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_without_double_slash() {
        let client = ApiClient::new("http://localhost:8000/".to_string());
        assert_eq!(client.url("/auth/login/"), "http://localhost:8000/auth/login/");

        let client = ApiClient::new("http://localhost:8000".to_string());
        assert_eq!(client.url("/auth/me/"), "http://localhost:8000/auth/me/");
    }

    #[test]
    fn test_error_body_parses_documented_shape() {
        let json = r#"{
            "message": "Email already registered",
            "code": "email_taken",
            "status": 400,
            "details": {"email": "Email already registered"}
        }"#;
        let body: ApiErrorBody = serde_json::from_slice(json.as_bytes()).unwrap();
        assert_eq!(body.message_or("fallback"), "Email already registered");
        let fields = body.field_errors();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].field, "email");
    }

    #[test]
    fn test_error_body_merges_singular_field() {
        let json = r#"{"message": "Password too weak", "field": "password"}"#;
        let body: ApiErrorBody = serde_json::from_slice(json.as_bytes()).unwrap();
        let fields = body.field_errors();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].field, "password");
        assert_eq!(fields[0].message, "Password too weak");
    }

    #[test]
    fn test_error_body_does_not_duplicate_field_from_details() {
        let json = r#"{
            "message": "Invalid email",
            "field": "email",
            "details": {"email": "Invalid email"}
        }"#;
        let body: ApiErrorBody = serde_json::from_slice(json.as_bytes()).unwrap();
        assert_eq!(body.field_errors().len(), 1);
    }

    #[test]
    fn test_message_fallback_when_body_is_empty() {
        let body = ApiErrorBody::default();
        assert_eq!(body.message_or("Invalid credentials"), "Invalid credentials");
        assert!(body.field_errors().is_empty());
    }

    #[test]
    fn test_auth_response_maps_into_payload() {
        let json = r#"{
            "access": "access-1",
            "refresh": "refresh-1",
            "user": {
                "id": 3,
                "email": "s@example.com",
                "firstName": "Sam",
                "lastName": "Iyer",
                "role": "student",
                "isActive": true,
                "dateJoined": "2024-01-15T09:30:00Z"
            }
        }"#;
        let response: AuthResponse = serde_json::from_str(json).unwrap();
        let payload: AuthPayload = response.into();
        assert_eq!(payload.tokens.access_token, "access-1");
        assert_eq!(payload.tokens.refresh_token, "refresh-1");
        assert_eq!(payload.user.email, "s@example.com");
    }
}
