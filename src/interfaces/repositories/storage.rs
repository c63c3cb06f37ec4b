use async_trait::async_trait;

use crate::{
    errors::AppError,
    infrastructure::supabase::client::SupabaseClient,
    repositories::supabase_repo::SupabaseStorage,
};

#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Uploads a named binary object into a bucket.
    async fn upload(
        &self,
        bucket: &str,
        object: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), AppError>;

    /// The public URL the uploaded object is served from.
    fn public_url(&self, bucket: &str, object: &str) -> String;
}

impl SupabaseStorage {
    pub fn new(client: SupabaseClient) -> Self {
        SupabaseStorage { client }
    }
}

#[async_trait]
impl ObjectStorage for SupabaseStorage {
    async fn upload(
        &self,
        bucket: &str,
        object: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), AppError> {
        self.client
            .upload_object(bucket, object, bytes, content_type)
            .await
    }

    fn public_url(&self, bucket: &str, object: &str) -> String {
        self.client.object_public_url(bucket, object)
    }
}
