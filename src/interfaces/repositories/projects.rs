use async_trait::async_trait;

use crate::{
    entities::project::{Project, ProjectRecord},
    errors::AppError,
    infrastructure::supabase::{client::SupabaseClient, rest::Order},
    repositories::supabase_repo::SupabaseProjectRepo,
};

const TABLE: &str = "projects";

#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Full collection, newest first.
    async fn fetch_projects(&self) -> Result<Vec<Project>, AppError>;
    async fn insert_project(&self, record: &ProjectRecord) -> Result<(), AppError>;
    async fn update_project(&self, id: i64, record: &ProjectRecord) -> Result<(), AppError>;
    async fn delete_project(&self, id: i64) -> Result<(), AppError>;
}

impl SupabaseProjectRepo {
    pub fn new(client: SupabaseClient) -> Self {
        SupabaseProjectRepo { client }
    }
}

#[async_trait]
impl ProjectRepository for SupabaseProjectRepo {
    async fn fetch_projects(&self) -> Result<Vec<Project>, AppError> {
        self.client
            .select(TABLE)
            .order("created_at", Order::Descending)
            .fetch()
            .await
    }

    async fn insert_project(&self, record: &ProjectRecord) -> Result<(), AppError> {
        self.client.insert_row(TABLE, record).await
    }

    async fn update_project(&self, id: i64, record: &ProjectRecord) -> Result<(), AppError> {
        self.client.update_row(TABLE, id, record).await
    }

    async fn delete_project(&self, id: i64) -> Result<(), AppError> {
        self.client.delete_row(TABLE, id).await
    }
}
