//! HTTP handlers and route configuration.

mod form;
mod health;
mod posts;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check))
        // Post routes
        .route("/posts", web::get().to(posts::list_posts))
        .route("/nuevoPost", web::post().to(posts::create_post))
        .route("/post/{id}", web::get().to(posts::get_post))
        .route("/delete/{id}", web::delete().to(posts::delete_post))
        .route("/postEdited/{id}", web::put().to(posts::update_post));
}
