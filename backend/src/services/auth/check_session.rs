use crate::error::ApiError;
use crate::session::Session;
use crate::store::Database;
use actix_web::{web, HttpResponse};
use common::model::user::User;

/// Actix web handler for `GET /check_session`. Never modifies the session.
pub async fn process(db: web::Data<Database>, session: Session) -> HttpResponse {
    let outcome = current_user(&db, session.user_id())
        .await
        .map(|user| HttpResponse::Ok().json(user));

    session.commit(outcome).await
}

/// Resolves the session's `user_id`, failing when it is unset or the user has
/// since been removed from the store.
async fn current_user(db: &Database, user_id: Option<i64>) -> Result<User, ApiError> {
    let user_id = user_id.ok_or(ApiError::Unauthorized)?;

    let db = db.clone();
    web::block(move || db.find_user(user_id))
        .await??
        .ok_or(ApiError::Unauthorized)
}
