mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;

pub use domain::{entities, listing, use_cases};
pub use interfaces::{handlers, middlewares, repositories, routes};
pub use infrastructure::{supabase, utils};

use errors::AppError;
use infrastructure::supabase::client::SupabaseClient;
use repositories::supabase_repo::{
    SupabaseCertificateRepo, SupabaseCommentRepo, SupabaseProfileRepo, SupabaseProjectRepo,
    SupabaseStorage,
};
use use_cases::auth::AuthGate;
use use_cases::certificates::CertificatesHandler;
use use_cases::comments::CommentsHandler;
use use_cases::projects::ProjectsHandler;

pub struct AppState {
    pub auth_gate: AppAuthGate,
    pub projects_handler: AppProjectsHandler,
    pub certificates_handler: AppCertificatesHandler,
    pub comments_handler: AppCommentsHandler,
    pub supabase: SupabaseClient,
}

pub type AppAuthGate = AuthGate<SupabaseClient, SupabaseProfileRepo>;
pub type AppProjectsHandler = ProjectsHandler<SupabaseProjectRepo, SupabaseStorage>;
pub type AppCertificatesHandler = CertificatesHandler<SupabaseCertificateRepo, SupabaseStorage>;
pub type AppCommentsHandler = CommentsHandler<SupabaseCommentRepo>;

impl AppState {
    pub fn new(config: &settings::AppConfig) -> Result<Self, AppError> {
        let supabase = SupabaseClient::new(config)?;

        let auth_gate = AuthGate::new(
            supabase.clone(),
            SupabaseProfileRepo::new(supabase.clone()),
        );
        let projects_handler = ProjectsHandler::new(
            SupabaseProjectRepo::new(supabase.clone()),
            SupabaseStorage::new(supabase.clone()),
            config.project_image_bucket.clone(),
        );
        let certificates_handler = CertificatesHandler::new(
            SupabaseCertificateRepo::new(supabase.clone()),
            SupabaseStorage::new(supabase.clone()),
            config.certificate_image_bucket.clone(),
        );
        let comments_handler = CommentsHandler::new(SupabaseCommentRepo::new(supabase.clone()));

        Ok(AppState {
            auth_gate,
            projects_handler,
            certificates_handler,
            comments_handler,
            supabase,
        })
    }
}
