use crate::model::article::Article;
use serde::{Deserialize, Serialize};

/// A user together with every article linked to it through `user_id`.
///
/// Returned by `POST /login` and `GET /check_session`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub name: String,
    pub articles: Vec<Article>,
}
