pub mod articles;
pub mod auth;

use actix_web::web;

/// Registers every route of the service on an `App`.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    auth::configure_routes(cfg);
    articles::configure_routes(cfg);
}
