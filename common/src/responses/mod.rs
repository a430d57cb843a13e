use serde::{Deserialize, Serialize};

/// Machine-readable category of a failed request.
///
/// `Unauthorized` and `ViewLimitExceeded` share the 401 status code, so
/// clients should branch on this value rather than on the message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Unauthorized,
    NotFound,
    ViewLimitExceeded,
    Internal,
}

/// JSON body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub kind: ErrorKind,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_is_snake_case() {
        let body = ErrorBody {
            kind: ErrorKind::ViewLimitExceeded,
            message: "Maximum pageview limit reached".to_string(),
        };
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["kind"], "view_limit_exceeded");
        assert_eq!(json["message"], "Maximum pageview limit reached");
    }
}
