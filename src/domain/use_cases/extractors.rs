use actix_web::{FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::{
    entities::{
        profile::{AccessDecision, DenyReason},
        session::AuthUser,
    },
    errors::AuthError,
};

/// Extractor for the authenticated operator, whatever their role.
/// Returns 401 if the middleware resolved no user for this request.
/// Usage: add `user: CurrentUser` as a handler parameter.
#[derive(Debug)]
pub struct CurrentUser(pub AuthUser);

impl FromRequest for CurrentUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<AuthUser>() {
            Some(user) => ready(Ok(CurrentUser(user.clone()))),
            None => ready(Err(AuthError::MissingCredentials.into())),
        }
    }
}

/// Extractor for an allowed admin access decision.
/// Returns 403 if the decision is a denial, 401 if it was never resolved —
/// a pending decision means the route was composed without the auth
/// middleware, and the request must not proceed.
#[derive(Debug)]
pub struct AdminAccess(pub AuthUser);

impl FromRequest for AdminAccess {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let decision = req
            .extensions()
            .get::<AccessDecision>()
            .cloned()
            .unwrap_or_default();

        match decision {
            AccessDecision::Allowed(user) => ready(Ok(AdminAccess(user))),
            AccessDecision::Denied(DenyReason::NotAdmin) => {
                ready(Err(AuthError::Forbidden("Admin access required".into()).into()))
            }
            AccessDecision::Denied(DenyReason::Unauthenticated) | AccessDecision::Pending => {
                ready(Err(AuthError::MissingCredentials.into()))
            }
        }
    }
}
