//! HTTP handlers and route configuration.

mod files;
mod health;
mod leads;
mod posts;
mod root;
mod users;

use actix_web::web;

use crate::middleware::error::AppError;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    // Extractor failures become RFC 7807 bodies with status 400.
    cfg.app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .app_data(
        web::PathConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    );

    cfg.route("/", web::get().to(root::hello))
        .route("/db-status", web::get().to(health::db_status))
        .route("/leads/", web::get().to(leads::list_leads))
        .route("/files/", web::post().to(files::upload_file))
        .service(
            web::scope("/users")
                .route("/", web::get().to(users::list_users))
                .route("/", web::post().to(users::create_user))
                .route("/{id}", web::get().to(users::get_user))
                .route("/{id}", web::patch().to(users::update_user))
                .route("/{id}", web::delete().to(users::delete_user))
                .route("/{id}/posts", web::get().to(users::user_posts)),
        )
        .service(
            web::scope("/posts")
                .route("/", web::get().to(posts::list_posts))
                .route("/", web::post().to(posts::create_post))
                .route("/{id}", web::get().to(posts::get_post))
                .route("/{id}", web::patch().to(posts::update_post))
                .route("/{id}", web::delete().to(posts::delete_post)),
        );
}
