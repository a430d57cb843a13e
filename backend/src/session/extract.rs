use crate::error::ApiError;
use crate::session::{SessionState, Sessions};
use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest, HttpResponse, ResponseError};
use futures_util::future::LocalBoxFuture;
use log::{debug, error};
use uuid::Uuid;

/// The calling client's session, loaded before the handler runs.
///
/// Mutations stay local until `commit`, which writes the state back to the
/// store and, for a client that had no valid cookie yet, attaches a freshly
/// signed one to the response.
pub struct Session {
    sessions: web::Data<Sessions>,
    token: String,
    issued: bool,
    changed: bool,
    state: SessionState,
}

impl Session {
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn user_id(&self) -> Option<i64> {
        self.state.user_id
    }

    pub fn set_user_id(&mut self, user_id: Option<i64>) {
        if self.state.user_id != user_id {
            self.state.user_id = user_id;
            self.changed = true;
        }
    }

    /// Mutable access for gates that rewrite the whole record.
    pub fn state_mut(&mut self) -> &mut SessionState {
        self.changed = true;
        &mut self.state
    }

    /// Persists any change and turns the handler outcome into a response.
    ///
    /// The state is saved before the outcome is inspected, so a counter bump
    /// survives even when the handler answers with an error.
    pub async fn commit(self, outcome: Result<HttpResponse, ApiError>) -> HttpResponse {
        if self.changed {
            if let Err(e) = self.sessions.store().save(&self.token, self.state).await {
                return ApiError::from(e).error_response();
            }
        }

        let mut response = match outcome {
            Ok(response) => response,
            Err(e) => e.error_response(),
        };

        if self.issued && self.changed {
            match self.sessions.token_cookie(&self.token) {
                Some(cookie) => {
                    if let Err(e) = response.add_cookie(&cookie) {
                        error!("Failed to attach session cookie: {}", e);
                    }
                }
                None => error!("Failed to sign session cookie"),
            }
        }

        response
    }
}

impl FromRequest for Session {
    type Error = ApiError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let sessions = req.app_data::<web::Data<Sessions>>().cloned();
        let token = sessions.as_ref().and_then(|sessions| {
            req.cookie(sessions.cookie_name())
                .and_then(|cookie| sessions.token_from_cookie(cookie))
        });

        Box::pin(async move {
            let sessions = sessions.ok_or(ApiError::SessionUnavailable)?;

            if let Some(token) = token {
                if let Some(state) = sessions.store().load(&token).await? {
                    return Ok(Session {
                        sessions,
                        token,
                        issued: false,
                        changed: false,
                        state,
                    });
                }
                debug!("Unknown session token, starting a new session");
            }

            Ok(Session {
                sessions,
                token: Uuid::new_v4().to_string(),
                issued: true,
                changed: false,
                state: SessionState::default(),
            })
        })
    }
}
