use chrono::Utc;
use serde::Serialize;
use validator::Validate;

use crate::{
    entities::project::{Project, ProjectForm},
    errors::AppError,
    repositories::{projects::ProjectRepository, storage::ObjectStorage},
    utils::slug::storage_object_name,
};

/// An image file taken out of the multipart form.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Outcome of a create/update: the workflow always ends with a full refetch,
/// whether or not the save itself went through.
#[derive(Debug, Serialize)]
pub struct ProjectSaveOutcome {
    pub saved: bool,
    pub projects: Vec<Project>,
}

pub struct ProjectsHandler<R, S>
where
    R: ProjectRepository,
    S: ObjectStorage,
{
    pub project_repo: R,
    pub storage: S,
    bucket: String,
}

impl<R, S> ProjectsHandler<R, S>
where
    R: ProjectRepository,
    S: ObjectStorage,
{
    pub fn new(project_repo: R, storage: S, bucket: impl Into<String>) -> Self {
        ProjectsHandler {
            project_repo,
            storage,
            bucket: bucket.into(),
        }
    }

    /// Full collection, newest first; empty on fetch failure.
    pub async fn list(&self) -> Vec<Project> {
        match self.project_repo.fetch_projects().await {
            Ok(projects) => projects,
            Err(e) => {
                tracing::warn!("project fetch failed, rendering empty collection: {}", e);
                Vec::new()
            }
        }
    }

    /// Create workflow: upload the image first (if any), then insert the
    /// record referencing its public URL. Validation failures reject before
    /// any remote call; later failures are logged and the collection is
    /// refetched regardless.
    pub async fn create(
        &self,
        form: ProjectForm,
        image: Option<ImageUpload>,
    ) -> Result<ProjectSaveOutcome, AppError> {
        form.validate()?;

        let result = self.save(None, form, image).await;
        if let Err(e) = &result {
            tracing::error!("project create failed: {}", e);
        }

        Ok(ProjectSaveOutcome {
            saved: result.is_ok(),
            projects: self.list().await,
        })
    }

    /// Edit workflow: same shape as create, updating by identifier. Without
    /// a new image the URL carried in the form (the record's current one) is
    /// retained.
    pub async fn update(
        &self,
        id: i64,
        form: ProjectForm,
        image: Option<ImageUpload>,
    ) -> Result<ProjectSaveOutcome, AppError> {
        form.validate()?;

        let result = self.save(Some(id), form, image).await;
        if let Err(e) = &result {
            tracing::error!(id, "project update failed: {}", e);
        }

        Ok(ProjectSaveOutcome {
            saved: result.is_ok(),
            projects: self.list().await,
        })
    }

    /// Deletes one project, gated on the operator's confirmation; declined
    /// confirmations perform no remote call and yield `None`.
    pub async fn remove(
        &self,
        id: i64,
        confirmed: bool,
    ) -> Result<Option<Vec<Project>>, AppError> {
        if !confirmed {
            tracing::debug!(id, "project deletion declined");
            return Ok(None);
        }

        self.project_repo.delete_project(id).await?;
        Ok(Some(self.list().await))
    }

    async fn save(
        &self,
        id: Option<i64>,
        form: ProjectForm,
        image: Option<ImageUpload>,
    ) -> Result<(), AppError> {
        let img_url = match image {
            Some(image) => self.store_image(image).await?,
            None => form.img.clone(),
        };

        let record = form.into_record(img_url);
        match id {
            Some(id) => self.project_repo.update_project(id, &record).await,
            None => self.project_repo.insert_project(&record).await,
        }
    }

    async fn store_image(&self, image: ImageUpload) -> Result<String, AppError> {
        let content_type = image_content_type(&image.bytes)?;
        let object = storage_object_name(&image.file_name, Utc::now());

        self.storage
            .upload(&self.bucket, &object, image.bytes, content_type)
            .await?;

        Ok(self.storage.public_url(&self.bucket, &object))
    }
}

/// Sniffs the upload and rejects anything that is not an image.
pub fn image_content_type(bytes: &[u8]) -> Result<&'static str, AppError> {
    match infer::get(bytes) {
        Some(kind) if kind.matcher_type() == infer::MatcherType::Image => Ok(kind.mime_type()),
        _ => Err(AppError::InvalidInput(
            "Uploaded file is not a supported image".to_string(),
        )),
    }
}
