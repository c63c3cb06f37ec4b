use async_trait::async_trait;

use crate::{
    entities::certificate::{Certificate, CertificateRecord},
    errors::AppError,
    infrastructure::supabase::{client::SupabaseClient, rest::Order},
    repositories::supabase_repo::SupabaseCertificateRepo,
};

const TABLE: &str = "certificates";

#[async_trait]
pub trait CertificateRepository: Send + Sync {
    /// Full collection, newest first.
    async fn fetch_certificates(&self) -> Result<Vec<Certificate>, AppError>;
    async fn insert_certificate(&self, record: &CertificateRecord) -> Result<(), AppError>;
    async fn delete_certificate(&self, id: i64) -> Result<(), AppError>;
}

impl SupabaseCertificateRepo {
    pub fn new(client: SupabaseClient) -> Self {
        SupabaseCertificateRepo { client }
    }
}

#[async_trait]
impl CertificateRepository for SupabaseCertificateRepo {
    async fn fetch_certificates(&self) -> Result<Vec<Certificate>, AppError> {
        self.client
            .select(TABLE)
            .order("created_at", Order::Descending)
            .fetch()
            .await
    }

    async fn insert_certificate(&self, record: &CertificateRecord) -> Result<(), AppError> {
        self.client.insert_row(TABLE, record).await
    }

    async fn delete_certificate(&self, id: i64) -> Result<(), AppError> {
        self.client.delete_row(TABLE, id).await
    }
}
