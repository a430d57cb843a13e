use crate::gate;
use crate::session::Session;
use actix_web::HttpResponse;

/// Actix web handler for `DELETE /clear`.
///
/// Unlike `/logout` this also restarts the article view allowance.
pub async fn process(mut session: Session) -> HttpResponse {
    gate::clear(session.state_mut());
    session.commit(Ok(HttpResponse::NoContent().finish())).await
}
