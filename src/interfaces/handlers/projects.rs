use std::collections::HashMap;

use actix_multipart::form::{tempfile::TempFile, MultipartForm};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::project::ProjectUpload,
    errors::AppError,
    use_cases::{extractors::AdminAccess, projects::ImageUpload},
    AppState,
};

#[instrument(skip(_admin, state))]
#[get("")]
pub async fn list_projects(_admin: AdminAccess, state: web::Data<AppState>) -> impl Responder {
    let projects = state.projects_handler.list().await;
    HttpResponse::Ok().json(projects)
}

#[instrument(skip(_admin, state, form))]
#[post("")]
pub async fn create_project(
    _admin: AdminAccess,
    state: web::Data<AppState>,
    form: MultipartForm<ProjectUpload>,
) -> Result<impl Responder, AppError> {
    let form = form.into_inner();
    let image = read_image(form.image).await?;

    let outcome = state
        .projects_handler
        .create(form.metadata.into_inner(), image)
        .await?;

    Ok(HttpResponse::Created().json(outcome))
}

#[instrument(skip(_admin, state, form))]
#[put("/{id}")]
pub async fn update_project(
    _admin: AdminAccess,
    id: web::Path<i64>,
    state: web::Data<AppState>,
    form: MultipartForm<ProjectUpload>,
) -> Result<impl Responder, AppError> {
    let form = form.into_inner();
    let image = read_image(form.image).await?;

    let outcome = state
        .projects_handler
        .update(id.into_inner(), form.metadata.into_inner(), image)
        .await?;

    Ok(HttpResponse::Ok().json(outcome))
}

#[instrument(skip(_admin, state, query))]
#[delete("/{id}")]
pub async fn delete_project(
    _admin: AdminAccess,
    id: web::Path<i64>,
    state: web::Data<AppState>,
    query: web::Query<HashMap<String, String>>,
) -> Result<impl Responder, AppError> {
    let confirmed = query.get("confirm").is_some_and(|v| v == "true");

    match state
        .projects_handler
        .remove(id.into_inner(), confirmed)
        .await?
    {
        Some(projects) => Ok(HttpResponse::Ok().json(projects)),
        None => Err(AppError::ConfirmationRequired),
    }
}

/// Pulls the spooled upload into memory for the storage client.
pub(crate) async fn read_image(file: Option<TempFile>) -> Result<Option<ImageUpload>, AppError> {
    let Some(file) = file else {
        return Ok(None);
    };

    let file_name = file
        .file_name
        .clone()
        .unwrap_or_else(|| "upload".to_string());
    let bytes = tokio::fs::read(file.file.path()).await?;

    Ok(Some(ImageUpload { file_name, bytes }))
}
