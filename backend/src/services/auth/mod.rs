//! # Authentication Service Module
//!
//! Login, logout and session checks. A client is "logged in" when its session
//! holds a `user_id`; there are no passwords, a login is a plain lookup of the
//! submitted username in the store.
//!
//! ## Sub-modules:
//! - `login`: Resolves a username to a user and records it in the session.
//! - `logout`: Drops the user from the session, leaving the view counter alone.
//! - `check_session`: Reports the user currently attached to the session.

mod check_session;
mod login;
mod logout;

use actix_web::web::{self, delete, get, post};

/// Configures the authentication routes.
///
/// # Registered Routes:
///
/// *   **`POST /login`**:
///     - **Handler**: `login::process`
///     - **Description**: Expects `{"username": "..."}`. Answers `200` with the
///       user (articles embedded) on a match, `401` otherwise.
///
/// *   **`DELETE /logout`**:
///     - **Handler**: `logout::process`
///     - **Description**: Always answers `204 No Content`.
///
/// *   **`GET /check_session`**:
///     - **Handler**: `check_session::process`
///     - **Description**: `200` with the session's user, or `401` when no
///       user is attached or it no longer exists.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/login", post().to(login::process))
        .route("/logout", delete().to(logout::process))
        .route("/check_session", get().to(check_session::process));
}
