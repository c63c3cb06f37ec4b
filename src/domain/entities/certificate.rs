use actix_multipart::form::{tempfile::TempFile, MultipartForm};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ───── Database Models ───────────────────────────────────────────────

/// A certificate image as stored in the `certificates` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Certificate {
    pub id: i64,

    #[serde(rename = "Img")]
    pub img: String,

    pub created_at: DateTime<Utc>,
}

/// The writable column set: a certificate is nothing but its image URL.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CertificateRecord {
    #[serde(rename = "Img")]
    pub img: String,
}

// ───── Input Requests ───────────────────────────────────────────────

/// The multipart upload submission; the image is the whole form.
#[derive(Debug, MultipartForm)]
pub struct CertificateUpload {
    #[multipart(rename = "image", limit = "10MB")]
    pub image: TempFile,
}
