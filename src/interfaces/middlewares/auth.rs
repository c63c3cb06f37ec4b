use actix_web::{
    body::BoxBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, HttpMessage, HttpResponse,
};
use futures_util::future::{ok, LocalBoxFuture, Ready};
use std::{
    rc::Rc,
    task::{Context, Poll},
};

use crate::{
    entities::profile::{AccessDecision, DenyReason},
    AppState,
};

/// Resolves the caller's bearer token against the managed backend once per
/// request and stores the authenticated user — plus, for admin paths, the
/// access decision — in the request extensions.
pub struct AuthMiddleware;

impl<S> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = Error> + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(AuthMiddlewareService {
            service: Rc::new(service),
        })
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = Error> + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let path = req.path().to_string();
            let method = req.method().as_str().to_string();

            if is_public_route(&path, &method) {
                return service.call(req).await;
            }

            let Some(state) = req.app_data::<web::Data<AppState>>() else {
                tracing::error!("AppState missing in middleware");
                return Ok(custom_error_response(
                    req,
                    HttpResponse::InternalServerError().json(serde_json::json!({
                        "error": "Internal server error"
                    })),
                ));
            };

            let Some(token) = extract_token(&req) else {
                tracing::warn!(%path, "missing or malformed Authorization header");
                return Ok(unauthorized(req, "Missing or invalid credentials"));
            };

            let user = match state.auth_gate.current_user(&token).await {
                Ok(Some(user)) => user,
                Ok(None) => {
                    tracing::warn!(%path, "bearer token no longer recognized");
                    return Ok(unauthorized(req, "Missing or invalid credentials"));
                }
                Err(e) => {
                    tracing::error!("session resolution failed: {}", e);
                    return Ok(custom_error_response(
                        req,
                        HttpResponse::BadGateway().json(serde_json::json!({
                            "error": "Authentication service unavailable"
                        })),
                    ));
                }
            };

            if is_admin_route(&path) {
                let decision = state.auth_gate.resolve(&user).await;
                if decision == AccessDecision::Denied(DenyReason::NotAdmin) {
                    tracing::warn!(%path, user_id = %user.id, "admin access required");
                    return Ok(custom_error_response(
                        req,
                        HttpResponse::Forbidden().json(serde_json::json!({
                            "error": "Admin access required"
                        })),
                    ));
                }
                req.extensions_mut().insert(decision);
            }

            req.extensions_mut().insert(user);
            service.call(req).await
        })
    }
}

fn is_public_route(path: &str, method: &str) -> bool {
    if method == "OPTIONS" {
        return true;
    }

    matches!(
        (path, method),
        ("/", "GET") | ("/api/v1/auth/login", "POST")
    )
}

fn is_admin_route(path: &str) -> bool {
    path.starts_with("/api/v1/admin")
}

fn extract_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
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

fn unauthorized(req: ServiceRequest, message: &str) -> ServiceResponse<BoxBody> {
    custom_error_response(
        req,
        HttpResponse::Unauthorized().json(serde_json::json!({ "error": message })),
    )
}

fn custom_error_response(req: ServiceRequest, res: HttpResponse) -> ServiceResponse<BoxBody> {
    req.into_response(res)
}
