use std::borrow::Cow;

use actix_multipart::form::{json::Json as MpJson, tempfile::TempFile, MultipartForm};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use validator::{Validate, ValidationError};

// ───── Database Models ───────────────────────────────────────────────

/// A portfolio project as stored in the `projects` table. Column names are
/// owned by the backend and kept verbatim on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,

    #[serde(rename = "Title")]
    pub title: String,

    #[serde(rename = "Description")]
    pub description: Option<String>,

    #[serde(rename = "Img")]
    pub img: Option<String>,

    #[serde(rename = "TechStack", default, deserialize_with = "null_as_empty")]
    pub tech_stack: Vec<String>,

    #[serde(rename = "Features", default, deserialize_with = "null_as_empty")]
    pub features: Vec<String>,

    #[serde(rename = "Link")]
    pub link: Option<String>,

    #[serde(rename = "Github")]
    pub github: Option<String>,

    pub created_at: DateTime<Utc>,
}

/// The writable column set, sent on both insert and update. Tag sequences
/// are already normalized when this is built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectRecord {
    #[serde(rename = "Title")]
    pub title: String,

    #[serde(rename = "Description")]
    pub description: String,

    #[serde(rename = "Img")]
    pub img: String,

    #[serde(rename = "TechStack")]
    pub tech_stack: Vec<String>,

    #[serde(rename = "Features")]
    pub features: Vec<String>,

    #[serde(rename = "Link")]
    pub link: String,

    #[serde(rename = "Github")]
    pub github: String,
}

// ───── Input & Validation Requests ──────────────────────────────────

/// The project form as submitted by the dashboard. `TechStack` and
/// `Features` arrive as one comma-joined string each; `Img` carries the
/// already-stored image URL (empty on create) and is superseded by a
/// freshly uploaded file.
///
/// Only the title is enforced; every other field accepts an empty value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ProjectForm {
    #[serde(rename = "Title")]
    #[validate(custom(function = "validate_required_title"))]
    pub title: String,

    #[serde(rename = "Description", default)]
    pub description: String,

    #[serde(rename = "TechStack", default)]
    pub tech_stack: String,

    #[serde(rename = "Features", default)]
    pub features: String,

    #[serde(rename = "Link", default)]
    pub link: String,

    #[serde(rename = "Github", default)]
    pub github: String,

    #[serde(rename = "Img", default)]
    pub img: String,
}

impl ProjectForm {
    /// Normalizes the form into the writable record, referencing `img_url`
    /// as the stored image.
    pub fn into_record(self, img_url: String) -> ProjectRecord {
        ProjectRecord {
            title: self.title,
            description: self.description,
            img: img_url,
            tech_stack: parse_tags(&self.tech_stack),
            features: parse_tags(&self.features),
            link: self.link,
            github: self.github,
        }
    }
}

/// The multipart shape of the create/edit submission: the form fields as a
/// JSON part plus an optional image file.
#[derive(Debug, MultipartForm)]
pub struct ProjectUpload {
    #[multipart(rename = "image", limit = "5MB")]
    pub image: Option<TempFile>,

    #[multipart(rename = "metadata")]
    pub metadata: MpJson<ProjectForm>,
}

// ───── Tag Normalization ────────────────────────────────────────────

/// Comma-separated display string → trimmed, non-empty tag sequence.
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(String::from)
        .collect()
}

/// Tag sequence → the comma-joined string shown in the form.
pub fn display_tags(tags: &[String]) -> String {
    tags.join(", ")
}

// ───── Validation Helpers ───────────────────────────────────────────

fn validate_required_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        let mut err = ValidationError::new("title_required");
        err.message = Some(Cow::Borrowed("Title is required"));
        return Err(err);
    }
    Ok(())
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}
