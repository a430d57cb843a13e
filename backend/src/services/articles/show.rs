use crate::error::ApiError;
use crate::gate::{self, AccessPolicy, ViewDecision};
use crate::session::Session;
use crate::store::Database;
use actix_web::{web, HttpResponse};
use common::model::article::Article;
use log::info;

/// Actix web handler for `GET /articles/{id}`.
///
/// The view is counted before anything else, so requests for missing articles
/// and requests past the limit still consume the allowance.
pub async fn process(
    id: web::Path<i64>,
    db: web::Data<Database>,
    policy: web::Data<AccessPolicy>,
    mut session: Session,
) -> HttpResponse {
    let outcome = match gate::record_view(session.state_mut(), policy.view_limit) {
        ViewDecision::UnderLimit => find_article(&db, id.into_inner())
            .await
            .map(|article| HttpResponse::Ok().json(article)),
        ViewDecision::OverLimit => {
            info!(
                "View limit reached after {} views",
                session.state().page_views
            );
            Err(ApiError::ViewLimitExceeded)
        }
    };

    session.commit(outcome).await
}

async fn find_article(db: &Database, id: i64) -> Result<Article, ApiError> {
    let db = db.clone();
    web::block(move || db.find_article(id))
        .await??
        .ok_or(ApiError::ArticleNotFound)
}
