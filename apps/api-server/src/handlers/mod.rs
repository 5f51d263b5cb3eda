//! HTTP handlers and route configuration.

#[cfg(test)]
#[macro_use]
mod testing;

mod auth;
mod comments;
mod community;
mod health;

use actix_web::web;

use crate::middleware::error::{json_error_handler, path_error_handler, query_error_handler};

/// Configure all application routes.
///
/// Paths are registered without trailing slashes; `NormalizePath::trim`
/// strips them from incoming requests.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler));

    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Auth routes
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(auth::register))
                    .route("/login", web::post().to(auth::login))
                    .route("/me", web::get().to(auth::me)),
            ),
    );

    cfg.service(
        web::scope("/communities/{category}")
            .service(
                web::resource("")
                    .route(web::get().to(community::list_posts))
                    .route(web::post().to(community::create_post)),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(community::retrieve_post))
                    .route(web::put().to(community::update_post))
                    .route(web::patch().to(community::update_post))
                    .route(web::delete().to(community::delete_post)),
            )
            .service(
                web::resource("/{id}/like")
                    .route(web::post().to(community::like_post))
                    .route(web::delete().to(community::unlike_post)),
            )
            .service(
                web::resource("/{id}/comments")
                    .route(web::get().to(comments::list_comments))
                    .route(web::post().to(comments::add_comment)),
            )
            .service(
                web::resource("/{id}/comments/{comment_id}")
                    .route(web::put().to(comments::update_comment))
                    .route(web::patch().to(comments::update_comment))
                    .route(web::delete().to(comments::delete_comment)),
            ),
    );
}
