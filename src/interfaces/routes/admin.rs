use actix_web::web;

use crate::handlers::{certificates, comments, projects, system::admin_health_check};

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .service(admin_health_check)
            .service(
                web::scope("/projects")
                    .service(projects::list_projects)
                    .service(projects::create_project)
                    .service(projects::update_project)
                    .service(projects::delete_project),
            )
            .service(
                web::scope("/certificates")
                    .service(certificates::list_certificates)
                    .service(certificates::upload_certificate)
                    .service(certificates::delete_certificate),
            )
            .service(
                web::scope("/comments")
                    .service(comments::list_comments)
                    .service(comments::pin_comment)
                    .service(comments::delete_comment),
            ),
    );
}
