use async_trait::async_trait;

use crate::{
    entities::comment::Comment,
    errors::AppError,
    infrastructure::supabase::{client::SupabaseClient, rest::Order},
    repositories::supabase_repo::SupabaseCommentRepo,
};

const TABLE: &str = "portfolio_comments";

#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Full collection, pinned first, newest first within each group.
    async fn fetch_comments(&self) -> Result<Vec<Comment>, AppError>;
    async fn set_pinned(&self, id: i64, pinned: bool) -> Result<(), AppError>;
    async fn delete_comment(&self, id: i64) -> Result<(), AppError>;
}

impl SupabaseCommentRepo {
    pub fn new(client: SupabaseClient) -> Self {
        SupabaseCommentRepo { client }
    }
}

#[async_trait]
impl CommentRepository for SupabaseCommentRepo {
    async fn fetch_comments(&self) -> Result<Vec<Comment>, AppError> {
        self.client
            .select(TABLE)
            .order("is_pinned", Order::Descending)
            .order("created_at", Order::Descending)
            .fetch()
            .await
    }

    async fn set_pinned(&self, id: i64, pinned: bool) -> Result<(), AppError> {
        self.client
            .update_row(TABLE, id, &serde_json::json!({ "is_pinned": pinned }))
            .await
    }

    async fn delete_comment(&self, id: i64) -> Result<(), AppError> {
        self.client.delete_row(TABLE, id).await
    }
}
