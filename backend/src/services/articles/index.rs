use crate::error::ApiError;
use crate::store::Database;
use actix_web::{web, HttpResponse};
use common::model::article::Article;

/// Actix web handler for `GET /articles`.
pub async fn process(db: web::Data<Database>) -> Result<HttpResponse, ApiError> {
    let articles = list_articles(&db).await?;
    Ok(HttpResponse::Ok().json(articles))
}

async fn list_articles(db: &Database) -> Result<Vec<Article>, ApiError> {
    let db = db.clone();
    Ok(web::block(move || db.list_articles()).await??)
}
