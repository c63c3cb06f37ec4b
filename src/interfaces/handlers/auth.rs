use actix_web::http::StatusCode;
use actix_web::{get, post, web, HttpRequest, HttpResponse, Responder, ResponseError};
use tracing::instrument;

use crate::entities::session::LoginRequest;
use crate::handlers::json_error::json_error;
use crate::use_cases::extractors::CurrentUser;
use crate::AppState;

#[instrument(skip(state, request))]
#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    request: web::Json<LoginRequest>,
) -> impl Responder {
    match state.auth_gate.login(request.into_inner()).await {
        Ok(session) => HttpResponse::Ok().json(session),
        Err(e) => e.error_response(),
    }
}

#[instrument(skip(request, state))]
#[post("/logout")]
pub async fn logout(request: HttpRequest, state: web::Data<AppState>) -> impl Responder {
    let Some(token) = bearer_token(&request) else {
        return json_error(
            StatusCode::UNAUTHORIZED,
            "Unauthorized",
            "Missing access token in Authorization header",
        );
    };

    match state.auth_gate.logout(&token).await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({"message": "Logged out successfully"})),
        Err(e) => e.error_response(),
    }
}

#[instrument(skip(user))]
#[get("/me")]
pub async fn me(user: CurrentUser) -> impl Responder {
    HttpResponse::Ok().json(user.0)
}

fn bearer_token(request: &HttpRequest) -> Option<String> {
    request
        .headers()
        .get("Authorization")
        .and_then(|header| header.to_str().ok())
        .and_then(|header| {
            let parts: Vec<&str> = header.split_whitespace().collect();
            if parts.len() == 2 && parts[0].eq_ignore_ascii_case("bearer") {
                Some(parts[1].to_string())
            } else {
                None
            }
        })
}
