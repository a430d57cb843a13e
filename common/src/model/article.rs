use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// An article as returned by `GET /articles` and `GET /articles/{id}`.
///
/// The author relationship is expressed only through `user_id`; an article
/// never embeds its `User`, which keeps the `User -> articles` nesting one
/// level deep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: i64,
    pub author: Option<String>,
    pub title: String,
    pub content: String,
    pub preview: Option<String>,
    pub minutes_to_read: i64,
    /// Creation time, serialized as an ISO-8601 string (`null` when unset).
    pub date: Option<NaiveDateTime>,
    pub user_id: Option<i64>,
}
