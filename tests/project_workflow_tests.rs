use chrono::Utc;
use mockall::{mock, predicate::eq, Sequence};

use portfolio_admin::entities::certificate::{Certificate, CertificateRecord};
use portfolio_admin::entities::project::{Project, ProjectForm, ProjectRecord};
use portfolio_admin::errors::AppError;
use portfolio_admin::use_cases::certificates::CertificatesHandler;
use portfolio_admin::use_cases::projects::{ImageUpload, ProjectsHandler};

mock! {
    pub ProjectRepo {}

    #[async_trait::async_trait]
    impl portfolio_admin::repositories::projects::ProjectRepository for ProjectRepo {
        async fn fetch_projects(&self) -> Result<Vec<Project>, AppError>;
        async fn insert_project(&self, record: &ProjectRecord) -> Result<(), AppError>;
        async fn update_project(&self, id: i64, record: &ProjectRecord) -> Result<(), AppError>;
        async fn delete_project(&self, id: i64) -> Result<(), AppError>;
    }
}

mock! {
    pub CertificateRepo {}

    #[async_trait::async_trait]
    impl portfolio_admin::repositories::certificates::CertificateRepository for CertificateRepo {
        async fn fetch_certificates(&self) -> Result<Vec<Certificate>, AppError>;
        async fn insert_certificate(&self, record: &CertificateRecord) -> Result<(), AppError>;
        async fn delete_certificate(&self, id: i64) -> Result<(), AppError>;
    }
}

mock! {
    pub Storage {}

    #[async_trait::async_trait]
    impl portfolio_admin::repositories::storage::ObjectStorage for Storage {
        async fn upload(
            &self,
            bucket: &str,
            object: &str,
            bytes: Vec<u8>,
            content_type: &str,
        ) -> Result<(), AppError>;

        fn public_url(&self, bucket: &str, object: &str) -> String;
    }
}

const BUCKET: &str = "project-images";

fn form(title: &str) -> ProjectForm {
    ProjectForm {
        title: title.to_string(),
        description: "A site".to_string(),
        tech_stack: "React, Tailwind,  Supabase".to_string(),
        features: "Auth, Dark mode".to_string(),
        link: "https://example.com".to_string(),
        github: String::new(),
        img: String::new(),
    }
}

fn png_upload(name: &str) -> ImageUpload {
    ImageUpload {
        file_name: name.to_string(),
        bytes: b"\x89PNG\r\n\x1a\n\x00\x00\x00\rIHDR".to_vec(),
    }
}

fn project(id: i64, title: &str) -> Project {
    Project {
        id,
        title: title.to_string(),
        description: None,
        img: None,
        tech_stack: Vec::new(),
        features: Vec::new(),
        link: None,
        github: None,
        created_at: Utc::now(),
    }
}

#[actix_rt::test]
async fn empty_title_is_rejected_before_any_remote_call() {
    // No expectations: any repository or storage call would panic.
    let repo = MockProjectRepo::new();
    let storage = MockStorage::new();
    let handler = ProjectsHandler::new(repo, storage, BUCKET);

    let result = handler.create(form(""), Some(png_upload("shot.png"))).await;
    assert!(matches!(result, Err(AppError::ValidationError(_))));

    let result = handler.create(form("   "), None).await;
    assert!(matches!(result, Err(AppError::ValidationError(_))));
}

#[actix_rt::test]
async fn create_uploads_the_image_then_inserts_the_record() {
    let mut repo = MockProjectRepo::new();
    let mut storage = MockStorage::new();
    let mut seq = Sequence::new();

    storage
        .expect_upload()
        .withf(|bucket, object, _bytes, content_type| {
            bucket == BUCKET
                && object.contains("my-screenshot")
                && object.ends_with(".png")
                && content_type == "image/png"
        })
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _, _, _| Ok(()));
    storage
        .expect_public_url()
        .times(1)
        .returning(|bucket, object| format!("https://cdn.test/{bucket}/{object}"));
    repo.expect_insert_project()
        .withf(|record: &ProjectRecord| {
            record.title == "Site"
                && record.img.starts_with("https://cdn.test/project-images/")
                && record.tech_stack == ["React", "Tailwind", "Supabase"]
                && record.features == ["Auth", "Dark mode"]
        })
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(()));
    repo.expect_fetch_projects()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|| Ok(vec![project(1, "Site")]));

    let handler = ProjectsHandler::new(repo, storage, BUCKET);
    let outcome = handler
        .create(form("Site"), Some(png_upload("My Screenshot.png")))
        .await
        .expect("create should go through");

    assert!(outcome.saved);
    assert_eq!(outcome.projects.len(), 1);
}

#[actix_rt::test]
async fn update_without_a_new_image_retains_the_existing_url() {
    let mut repo = MockProjectRepo::new();
    let storage = MockStorage::new();

    repo.expect_update_project()
        .withf(|id: &i64, record: &ProjectRecord| {
            *id == 7 && record.img == "https://cdn.test/project-images/old.png"
        })
        .times(1)
        .returning(|_, _| Ok(()));
    repo.expect_fetch_projects().returning(|| Ok(Vec::new()));

    let mut edited = form("Site");
    edited.img = "https://cdn.test/project-images/old.png".to_string();

    let handler = ProjectsHandler::new(repo, storage, BUCKET);
    let outcome = handler.update(7, edited, None).await.unwrap();

    assert!(outcome.saved);
}

#[actix_rt::test]
async fn failed_save_still_refetches_and_reports() {
    let mut repo = MockProjectRepo::new();
    let storage = MockStorage::new();
    let mut seq = Sequence::new();

    repo.expect_insert_project()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Err(AppError::RemoteApi("insert failed".to_string())));
    repo.expect_fetch_projects()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|| Ok(vec![project(1, "Existing")]));

    let handler = ProjectsHandler::new(repo, storage, BUCKET);
    let outcome = handler.create(form("Site"), None).await.unwrap();

    assert!(!outcome.saved);
    assert_eq!(outcome.projects.len(), 1, "the collection is still refreshed");
}

#[actix_rt::test]
async fn non_image_project_upload_fails_the_save_but_not_the_refetch() {
    let mut repo = MockProjectRepo::new();
    // Storage stays untouched: the sniff rejects before the upload.
    let storage = MockStorage::new();

    repo.expect_fetch_projects().times(1).returning(|| Ok(Vec::new()));

    let upload = ImageUpload {
        file_name: "notes.txt".to_string(),
        bytes: b"just text".to_vec(),
    };

    let handler = ProjectsHandler::new(repo, storage, BUCKET);
    let outcome = handler.create(form("Site"), Some(upload)).await.unwrap();

    assert!(!outcome.saved);
}

#[actix_rt::test]
async fn declined_project_delete_performs_no_remote_call() {
    let repo = MockProjectRepo::new();
    let storage = MockStorage::new();

    let handler = ProjectsHandler::new(repo, storage, BUCKET);
    let outcome = handler.remove(3, false).await.unwrap();

    assert!(outcome.is_none());
}

#[actix_rt::test]
async fn confirmed_project_delete_deletes_then_refetches() {
    let mut repo = MockProjectRepo::new();
    let storage = MockStorage::new();
    let mut seq = Sequence::new();

    repo.expect_delete_project()
        .with(eq(3))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(()));
    repo.expect_fetch_projects()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|| Ok(Vec::new()));

    let handler = ProjectsHandler::new(repo, storage, BUCKET);
    let outcome = handler.remove(3, true).await.unwrap();

    assert_eq!(outcome, Some(Vec::new()));
}

#[actix_rt::test]
async fn certificate_upload_stores_then_inserts_the_public_url() {
    let mut repo = MockCertificateRepo::new();
    let mut storage = MockStorage::new();
    let mut seq = Sequence::new();

    storage
        .expect_upload()
        .withf(|bucket, object, _bytes, content_type| {
            bucket == "certificate-images"
                && object.starts_with("cert-")
                && content_type == "image/png"
        })
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _, _, _| Ok(()));
    storage
        .expect_public_url()
        .times(1)
        .returning(|bucket, object| format!("https://cdn.test/{bucket}/{object}"));
    repo.expect_insert_certificate()
        .withf(|record: &CertificateRecord| {
            record.img.starts_with("https://cdn.test/certificate-images/cert-")
        })
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(()));
    repo.expect_fetch_certificates()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|| Ok(Vec::new()));

    let handler = CertificatesHandler::new(repo, storage, "certificate-images");
    let outcome = handler.upload(png_upload("aws-cert.png")).await.unwrap();

    assert!(outcome.saved);
}

#[actix_rt::test]
async fn certificate_upload_requires_an_actual_image() {
    // No expectations: the sniff failure must reject before any remote call.
    let repo = MockCertificateRepo::new();
    let storage = MockStorage::new();

    let handler = CertificatesHandler::new(repo, storage, "certificate-images");
    let result = handler
        .upload(ImageUpload {
            file_name: "resume.pdf".to_string(),
            bytes: b"%PDF-1.7 ...".to_vec(),
        })
        .await;

    assert!(matches!(result, Err(AppError::InvalidInput(_))));
}
