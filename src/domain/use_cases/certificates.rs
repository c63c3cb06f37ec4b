use chrono::Utc;
use serde::Serialize;

use crate::{
    entities::certificate::{Certificate, CertificateRecord},
    errors::AppError,
    repositories::{certificates::CertificateRepository, storage::ObjectStorage},
    use_cases::projects::{image_content_type, ImageUpload},
    utils::slug::storage_object_name,
};

#[derive(Debug, Serialize)]
pub struct CertificateSaveOutcome {
    pub saved: bool,
    pub certificates: Vec<Certificate>,
}

pub struct CertificatesHandler<R, S>
where
    R: CertificateRepository,
    S: ObjectStorage,
{
    pub certificate_repo: R,
    pub storage: S,
    bucket: String,
}

impl<R, S> CertificatesHandler<R, S>
where
    R: CertificateRepository,
    S: ObjectStorage,
{
    pub fn new(certificate_repo: R, storage: S, bucket: impl Into<String>) -> Self {
        CertificatesHandler {
            certificate_repo,
            storage,
            bucket: bucket.into(),
        }
    }

    /// Full collection, newest first; empty on fetch failure.
    pub async fn list(&self) -> Vec<Certificate> {
        match self.certificate_repo.fetch_certificates().await {
            Ok(certificates) => certificates,
            Err(e) => {
                tracing::warn!("certificate fetch failed, rendering empty collection: {}", e);
                Vec::new()
            }
        }
    }

    /// Upload workflow: store the image, insert the record referencing its
    /// public URL, refetch regardless of outcome. The image is required and
    /// sniffed before any remote call.
    pub async fn upload(&self, image: ImageUpload) -> Result<CertificateSaveOutcome, AppError> {
        let content_type = image_content_type(&image.bytes)?;

        let result = self.store_and_insert(image, content_type).await;
        if let Err(e) = &result {
            tracing::error!("certificate upload failed: {}", e);
        }

        Ok(CertificateSaveOutcome {
            saved: result.is_ok(),
            certificates: self.list().await,
        })
    }

    /// Deletes one certificate, gated on the operator's confirmation.
    pub async fn remove(
        &self,
        id: i64,
        confirmed: bool,
    ) -> Result<Option<Vec<Certificate>>, AppError> {
        if !confirmed {
            tracing::debug!(id, "certificate deletion declined");
            return Ok(None);
        }

        self.certificate_repo.delete_certificate(id).await?;
        Ok(Some(self.list().await))
    }

    async fn store_and_insert(
        &self,
        image: ImageUpload,
        content_type: &str,
    ) -> Result<(), AppError> {
        let object = format!("cert-{}", storage_object_name(&image.file_name, Utc::now()));

        self.storage
            .upload(&self.bucket, &object, image.bytes, content_type)
            .await?;

        let record = CertificateRecord {
            img: self.storage.public_url(&self.bucket, &object),
        };
        self.certificate_repo.insert_certificate(&record).await
    }
}
