use std::collections::HashMap;

use actix_web::{delete, get, patch, web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::comment::PinRequest,
    errors::AppError,
    listing::ListControls,
    use_cases::extractors::AdminAccess,
    AppState,
};

#[instrument(skip(_admin, state, query))]
#[get("")]
pub async fn list_comments(
    _admin: AdminAccess,
    state: web::Data<AppState>,
    query: web::Query<HashMap<String, String>>,
) -> impl Responder {
    let controls = ListControls::from_query(&query);
    let view = state.comments_handler.browse(&controls).await;
    HttpResponse::Ok().json(view)
}

#[instrument(skip(_admin, state, query, body))]
#[patch("/{id}/pin")]
pub async fn pin_comment(
    _admin: AdminAccess,
    id: web::Path<i64>,
    state: web::Data<AppState>,
    body: web::Json<PinRequest>,
    query: web::Query<HashMap<String, String>>,
) -> Result<impl Responder, AppError> {
    let controls = ListControls::from_query(&query);
    let view = state
        .comments_handler
        .set_pinned(id.into_inner(), body.pinned, &controls)
        .await?;

    Ok(HttpResponse::Ok().json(view))
}

#[instrument(skip(_admin, state, query))]
#[delete("/{id}")]
pub async fn delete_comment(
    _admin: AdminAccess,
    id: web::Path<i64>,
    state: web::Data<AppState>,
    query: web::Query<HashMap<String, String>>,
) -> Result<impl Responder, AppError> {
    let confirmed = query.get("confirm").is_some_and(|v| v == "true");
    let controls = ListControls::from_query(&query);

    match state
        .comments_handler
        .remove(id.into_inner(), confirmed, &controls)
        .await?
    {
        Some(view) => Ok(HttpResponse::Ok().json(view)),
        None => Err(AppError::ConfirmationRequired),
    }
}
