//! Request-level failures and their HTTP rendering.
//!
//! Every handler returns `Result<_, ApiError>`. The `ResponseError` impl maps
//! each variant onto a status code and an `ErrorBody` whose `kind` field lets
//! clients tell a failed login apart from an exhausted view allowance even
//! though both answer 401.

use crate::session::SessionError;
use actix_web::error::BlockingError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use common::responses::{ErrorBody, ErrorKind};
use log::error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Article not found")]
    ArticleNotFound,

    #[error("Maximum pageview limit reached")]
    ViewLimitExceeded,

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("blocking task failed: {0}")]
    Blocking(#[from] BlockingError),

    #[error("session store error: {0}")]
    Session(#[from] SessionError),

    #[error("session layer is not registered on the application")]
    SessionUnavailable,
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Unauthorized => ErrorKind::Unauthorized,
            ApiError::ArticleNotFound => ErrorKind::NotFound,
            ApiError::ViewLimitExceeded => ErrorKind::ViewLimitExceeded,
            ApiError::Database(_)
            | ApiError::Blocking(_)
            | ApiError::Session(_)
            | ApiError::SessionUnavailable => ErrorKind::Internal,
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::Unauthorized | ErrorKind::ViewLimitExceeded => StatusCode::UNAUTHORIZED,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let kind = self.kind();
        let message = if kind == ErrorKind::Internal {
            error!("Request failed: {}", self);
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        HttpResponse::build(self.status_code()).json(ErrorBody { kind, message })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_limit_shares_status_with_unauthorized() {
        assert_eq!(ApiError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::ViewLimitExceeded.status_code(), StatusCode::UNAUTHORIZED);
        assert_ne!(ApiError::Unauthorized.kind(), ApiError::ViewLimitExceeded.kind());
    }

    #[test]
    fn internal_errors_hide_details() {
        let err = ApiError::Database(rusqlite::Error::QueryReturnedNoRows);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.kind(), ErrorKind::Internal);
    }

    #[test]
    fn messages_match_the_api_contract() {
        assert_eq!(ApiError::Unauthorized.to_string(), "Unauthorized");
        assert_eq!(ApiError::ArticleNotFound.to_string(), "Article not found");
        assert_eq!(
            ApiError::ViewLimitExceeded.to_string(),
            "Maximum pageview limit reached"
        );
    }
}
