//! # Article Service Module
//!
//! Serves the article catalogue and enforces the per-session view allowance
//! on article detail pages.
//!
//! ## Sub-modules:
//! - `index`: Lists every article. Not metered.
//! - `show`: Returns one article, counting the view against the session.
//! - `clear`: Resets the session's view counter and logged-in user.

mod clear;
mod index;
mod show;

use actix_web::web::{self, delete, get};

/// Configures the article routes.
///
/// # Registered Routes:
///
/// *   **`GET /articles`**:
///     - **Handler**: `index::process`
///     - **Description**: `200` with every article, possibly an empty list.
///
/// *   **`GET /articles/{id}`**:
///     - **Handler**: `show::process`
///     - **Description**: Counts a view, then answers `200` with the article,
///       `404` if it does not exist, or `401` once the allowance is spent.
///
/// *   **`DELETE /clear`**:
///     - **Handler**: `clear::process`
///     - **Description**: Resets `page_views` and `user_id`, answers `204`.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/articles", get().to(index::process))
        .route("/articles/{id}", get().to(show::process))
        .route("/clear", delete().to(clear::process));
}
