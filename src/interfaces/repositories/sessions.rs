use async_trait::async_trait;

use crate::{
    entities::session::{AuthUser, Session},
    errors::AuthError,
    infrastructure::supabase::client::SupabaseClient,
};

/// The session operations the auth gate needs from the managed backend.
#[async_trait]
pub trait SessionService: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError>;
    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError>;
    /// `None` for tokens the backend no longer recognizes.
    async fn current_user(&self, access_token: &str) -> Result<Option<AuthUser>, AuthError>;
}

#[async_trait]
impl SessionService for SupabaseClient {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        SupabaseClient::sign_in(self, email, password).await
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
        SupabaseClient::sign_out(self, access_token).await
    }

    async fn current_user(&self, access_token: &str) -> Result<Option<AuthUser>, AuthError> {
        self.get_user(access_token).await
    }
}
