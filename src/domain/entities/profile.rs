use serde::Deserialize;
use uuid::Uuid;

use crate::entities::session::AuthUser;

pub const ADMIN_ROLE: &str = "admin";

// ───── Database Models ───────────────────────────────────────────────

/// A row of the `profiles` table; `id` mirrors the auth user id.
#[derive(Debug, Clone, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    pub role: Option<String>,
}

// ───── Access Decision ──────────────────────────────────────────────

/// The authorization context resolved once per request and handed to the
/// protected handlers. Explicit tri-state: a request that never went through
/// resolution stays `Pending` and is rejected downstream.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum AccessDecision {
    #[default]
    Pending,
    Allowed(AuthUser),
    Denied(DenyReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    Unauthenticated,
    NotAdmin,
}

impl AccessDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, AccessDecision::Allowed(_))
    }
}
