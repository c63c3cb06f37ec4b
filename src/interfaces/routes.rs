use actix_web::web;

use crate::handlers::home::home;

mod admin;
mod auth;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(home);

    cfg.service(
        web::scope("/api/v1")
            .configure(auth::config_routes)
            .configure(admin::config_routes),
    );
}
