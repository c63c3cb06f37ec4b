use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

pub static START_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);

/// Avatar shown for comments whose author has no profile image.
pub const DEFAULT_AVATAR: &str = "/default-avatar.jpg";
