use crate::session::Session;
use actix_web::HttpResponse;

/// Actix web handler for `DELETE /logout`. Idempotent; the view counter is kept.
pub async fn process(mut session: Session) -> HttpResponse {
    session.set_user_id(None);
    session.commit(Ok(HttpResponse::NoContent().finish())).await
}
