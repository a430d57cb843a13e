use serde::Deserialize;

#[derive(Deserialize, Debug, Default)]
/// Request payload for the login endpoint.
/// A missing `username` deserializes to `None` and is rejected by the handler.
pub struct LoginRequest {
    #[serde(default)]
    pub username: Option<String>,
}
