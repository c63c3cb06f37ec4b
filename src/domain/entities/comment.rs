use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_AVATAR;

// ───── Database Models ───────────────────────────────────────────────

/// A visitor comment as stored in the `portfolio_comments` table.
/// Comments are written by the public site; this dashboard only pins,
/// unpins, and deletes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub user_name: Option<String>,
    pub content: String,
    pub profile_image: Option<String>,
    pub is_pinned: bool,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn display_name(&self) -> &str {
        self.user_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or("Anonymous")
    }

    pub fn avatar(&self) -> &str {
        self.profile_image
            .as_deref()
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_AVATAR)
    }
}

// ───── Input Requests ───────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct PinRequest {
    pub pinned: bool,
}
