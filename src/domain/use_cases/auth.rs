use validator::Validate;

use crate::entities::profile::{AccessDecision, DenyReason, ADMIN_ROLE};
use crate::entities::session::{AuthUser, LoginRequest, SessionResponse};
use crate::errors::AuthError;
use crate::repositories::profiles::ProfileRepository;
use crate::repositories::sessions::SessionService;

/// Resolves operator sessions against the managed backend and turns the
/// `profiles.role` claim into an explicit access decision.
pub struct AuthGate<S, P>
where
    S: SessionService,
    P: ProfileRepository,
{
    pub session_service: S,
    pub profile_repo: P,
}

impl<S, P> AuthGate<S, P>
where
    S: SessionService,
    P: ProfileRepository,
{
    pub fn new(session_service: S, profile_repo: P) -> Self {
        AuthGate {
            session_service,
            profile_repo,
        }
    }

    /// Signs the operator in and checks the role claim. A non-admin session
    /// is signed out again immediately and the login is rejected.
    pub async fn login(&self, request: LoginRequest) -> Result<SessionResponse, AuthError> {
        request.validate()?;

        let session = self
            .session_service
            .sign_in(&request.email, &request.password)
            .await?;

        if !self.resolve(&session.user).await.is_allowed() {
            if let Err(e) = self.session_service.sign_out(&session.access_token).await {
                tracing::warn!("failed to discard non-admin session: {}", e);
            }
            return Err(AuthError::Forbidden("Access denied".to_string()));
        }

        tracing::info!("admin logged in");
        Ok(SessionResponse::new(session))
    }

    pub async fn logout(&self, access_token: &str) -> Result<(), AuthError> {
        self.session_service.sign_out(access_token).await
    }

    /// The user behind a bearer token, if the backend still recognizes it.
    pub async fn current_user(&self, access_token: &str) -> Result<Option<AuthUser>, AuthError> {
        self.session_service.current_user(access_token).await
    }

    /// Role lookup → access decision. A failed lookup denies: a user whose
    /// role cannot be established is not an admin.
    pub async fn resolve(&self, user: &AuthUser) -> AccessDecision {
        match self.profile_repo.fetch_role(&user.id).await {
            Ok(Some(role)) if role == ADMIN_ROLE => AccessDecision::Allowed(user.clone()),
            Ok(_) => AccessDecision::Denied(DenyReason::NotAdmin),
            Err(e) => {
                tracing::warn!(user_id = %user.id, "role lookup failed: {}", e);
                AccessDecision::Denied(DenyReason::NotAdmin)
            }
        }
    }
}
