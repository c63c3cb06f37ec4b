use chrono::{DateTime, Utc};

/// Lowercases, collapses whitespace runs into single hyphens, and strips
/// everything outside `[a-z0-9-]`.
pub fn to_slug(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut pending_hyphen = false;

    for c in value.to_lowercase().chars() {
        if c.is_whitespace() {
            pending_hyphen = !slug.is_empty();
            continue;
        }
        if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' {
            if pending_hyphen {
                slug.push('-');
                pending_hyphen = false;
            }
            slug.push(c);
        }
    }

    slug
}

/// Collision-resistant storage object name: millisecond timestamp prefix
/// plus the slugified stem of the original filename, extension preserved.
pub fn storage_object_name(original: &str, now: DateTime<Utc>) -> String {
    let (stem, ext) = match original.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => (stem, Some(ext)),
        _ => (original, None),
    };

    let mut stem = to_slug(stem);
    if stem.is_empty() {
        stem = "upload".to_string();
    }

    match ext {
        Some(ext) => format!("{}-{}.{}", now.timestamp_millis(), stem, ext.to_lowercase()),
        None => format!("{}-{}", now.timestamp_millis(), stem),
    }
}
