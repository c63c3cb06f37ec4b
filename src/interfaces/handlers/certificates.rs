use std::collections::HashMap;

use actix_multipart::form::MultipartForm;
use actix_web::{delete, get, post, web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::certificate::CertificateUpload,
    errors::AppError,
    handlers::projects::read_image,
    use_cases::extractors::AdminAccess,
    AppState,
};

#[instrument(skip(_admin, state))]
#[get("")]
pub async fn list_certificates(_admin: AdminAccess, state: web::Data<AppState>) -> impl Responder {
    let certificates = state.certificates_handler.list().await;
    HttpResponse::Ok().json(certificates)
}

#[instrument(skip(_admin, state, form))]
#[post("")]
pub async fn upload_certificate(
    _admin: AdminAccess,
    state: web::Data<AppState>,
    form: MultipartForm<CertificateUpload>,
) -> Result<impl Responder, AppError> {
    let image = read_image(Some(form.into_inner().image))
        .await?
        .ok_or_else(|| AppError::InvalidInput("Certificate image is required".to_string()))?;

    let outcome = state.certificates_handler.upload(image).await?;
    Ok(HttpResponse::Created().json(outcome))
}

#[instrument(skip(_admin, state, query))]
#[delete("/{id}")]
pub async fn delete_certificate(
    _admin: AdminAccess,
    id: web::Path<i64>,
    state: web::Data<AppState>,
    query: web::Query<HashMap<String, String>>,
) -> Result<impl Responder, AppError> {
    let confirmed = query.get("confirm").is_some_and(|v| v == "true");

    match state
        .certificates_handler
        .remove(id.into_inner(), confirmed)
        .await?
    {
        Some(certificates) => Ok(HttpResponse::Ok().json(certificates)),
        None => Err(AppError::ConfirmationRequired),
    }
}
