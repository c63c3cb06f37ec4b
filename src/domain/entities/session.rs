use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

// ───── Remote Session Models ────────────────────────────────────────

/// The authenticated user as reported by the managed backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: Option<String>,
}

/// A live session returned by a password-grant sign-in.
#[derive(Debug, Clone)]
pub struct Session {
    pub access_token: String,
    pub user: AuthUser,
}

// ───── Input & Validation Requests ──────────────────────────────────

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password cannot be empty"))]
    pub password: String,
}

// ───── API Response Models ──────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub access_token: String,
    pub token_type: String,
    pub user: AuthUser,
}

impl SessionResponse {
    pub fn new(session: Session) -> Self {
        SessionResponse {
            access_token: session.access_token,
            token_type: "Bearer".to_string(),
            user: session.user,
        }
    }
}
