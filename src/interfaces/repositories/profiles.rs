use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    entities::profile::Profile,
    errors::AppError,
    infrastructure::supabase::client::SupabaseClient,
    repositories::supabase_repo::SupabaseProfileRepo,
};

const TABLE: &str = "profiles";

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// The role claim of one user; `None` when the user has no profile row
    /// or no role set.
    async fn fetch_role(&self, user_id: &Uuid) -> Result<Option<String>, AppError>;
}

impl SupabaseProfileRepo {
    pub fn new(client: SupabaseClient) -> Self {
        SupabaseProfileRepo { client }
    }
}

#[async_trait]
impl ProfileRepository for SupabaseProfileRepo {
    async fn fetch_role(&self, user_id: &Uuid) -> Result<Option<String>, AppError> {
        let profiles: Vec<Profile> = self
            .client
            .select(TABLE)
            .eq("id", user_id)
            .fetch()
            .await?;

        Ok(profiles.into_iter().next().and_then(|profile| profile.role))
    }
}
