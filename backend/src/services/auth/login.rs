use crate::error::ApiError;
use crate::gate::AccessPolicy;
use crate::session::Session;
use crate::store::{Database, LookupField};
use actix_web::{web, HttpResponse};
use common::model::user::User;
use common::requests::LoginRequest;
use log::{info, warn};

/// Actix web handler for `POST /login`.
///
/// On success the user's id is stored in the session. A failed attempt leaves
/// the session exactly as it was.
pub async fn process(
    payload: web::Json<LoginRequest>,
    db: web::Data<Database>,
    policy: web::Data<AccessPolicy>,
    mut session: Session,
) -> HttpResponse {
    let outcome = authenticate(&db, policy.login_field, payload.into_inner().username)
        .await
        .map(|user| {
            session.set_user_id(Some(user.id));
            HttpResponse::Ok().json(user)
        });

    session.commit(outcome).await
}

/// Looks up the user whose `field` column equals `username` exactly.
///
/// A missing or blank username is rejected without touching the store.
async fn authenticate(
    db: &Database,
    field: LookupField,
    username: Option<String>,
) -> Result<User, ApiError> {
    let username = username
        .filter(|name| !name.trim().is_empty())
        .ok_or(ApiError::Unauthorized)?;

    let db = db.clone();
    let lookup = username.clone();
    match web::block(move || db.find_user_by(field, &lookup)).await?? {
        Some(user) => {
            info!("User {} logged in", user.id);
            Ok(user)
        }
        None => {
            warn!("Login rejected, no user with {} {:?}", field, username);
            Err(ApiError::Unauthorized)
        }
    }
}
