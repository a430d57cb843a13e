//! Server-side session state keyed by a signed cookie token.
//!
//! The client only ever holds an opaque token. Everything the service
//! remembers about a client (the logged-in `user_id` and the article
//! `page_views` counter) lives in a `SessionStore` that is injected into the
//! application as `web::Data<Sessions>`, so handlers never reach for ambient
//! global state and tests can inspect the store directly.
//!
//! The main components are:
//! - `SessionState`: the per-client record.
//! - `SessionStore`: async get/set/delete interface over tokens.
//! - `MemorySessionStore`: the in-process implementation used by the binary.
//! - `Sessions`: the store plus the cookie signing key.
//! - `Session`: the request extractor handlers work with (see `extract`).

mod extract;

pub use extract::Session;

use actix_web::cookie::{time, Cookie, CookieJar, Key, SameSite};
use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::RwLock;

pub const SESSION_COOKIE: &str = "session";

/// Everything remembered about one client between requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// Set by a successful login, cleared by logout or `/clear`.
    pub user_id: Option<i64>,
    /// Article detail views so far. Only grows, except through `/clear`.
    pub page_views: u64,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session backend unavailable: {0}")]
    Backend(String),
}

/// Storage for session records, addressed by the client's token.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Returns the stored state, or `None` for an unknown token.
    async fn load(&self, token: &str) -> Result<Option<SessionState>, SessionError>;

    async fn save(&self, token: &str, state: SessionState) -> Result<(), SessionError>;

    async fn delete(&self, token: &str) -> Result<(), SessionError>;
}

/// Idle time after which a session is forgotten, unless configured otherwise.
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(24 * 60 * 60);

struct Entry {
    state: SessionState,
    last_seen: Instant,
}

struct Entries {
    map: HashMap<String, Entry>,
    last_sweep: Instant,
}

/// Process-local store. Sessions are lost on restart.
///
/// An entry idle for longer than the TTL loads as `None`. Expired entries are
/// swept from `save`, at most once per TTL, through `SessionStore::delete`.
#[derive(Clone)]
pub struct MemorySessionStore {
    entries: Arc<RwLock<Entries>>,
    ttl: Duration,
}

impl Default for MemorySessionStore {
    fn default() -> Self {
        Self::with_ttl(DEFAULT_SESSION_TTL)
    }
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(RwLock::new(Entries {
                map: HashMap::new(),
                last_sweep: Instant::now(),
            })),
            ttl,
        }
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.map.len()
    }

    fn is_expired(&self, entry: &Entry) -> bool {
        entry.last_seen.elapsed() > self.ttl
    }

    /// Deletes every expired entry if a full TTL has passed since the last
    /// sweep. Returns how many entries were removed.
    pub async fn sweep_expired(&self) -> Result<usize, SessionError> {
        let expired: Vec<String> = {
            let mut entries = self.entries.write().await;
            if entries.last_sweep.elapsed() < self.ttl {
                return Ok(0);
            }
            entries.last_sweep = Instant::now();
            let expired = entries
                .map
                .iter()
                .filter(|(_, entry)| self.is_expired(entry))
                .map(|(token, _)| token.clone())
                .collect();
            expired
        };

        for token in &expired {
            self.delete(token).await?;
        }
        if !expired.is_empty() {
            debug!("Swept {} expired sessions", expired.len());
        }
        Ok(expired.len())
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self, token: &str) -> Result<Option<SessionState>, SessionError> {
        match self.entries.read().await.map.get(token) {
            None => return Ok(None),
            Some(entry) if !self.is_expired(entry) => return Ok(Some(entry.state.clone())),
            Some(_) => {}
        };

        self.delete(token).await?;
        Ok(None)
    }

    async fn save(&self, token: &str, state: SessionState) -> Result<(), SessionError> {
        self.sweep_expired().await?;
        self.entries.write().await.map.insert(
            token.to_string(),
            Entry {
                state,
                last_seen: Instant::now(),
            },
        );
        Ok(())
    }

    async fn delete(&self, token: &str) -> Result<(), SessionError> {
        self.entries.write().await.map.remove(token);
        Ok(())
    }
}

/// Application-wide session settings, registered once as `web::Data<Sessions>`.
pub struct Sessions {
    store: Arc<dyn SessionStore>,
    key: Key,
    cookie_name: String,
    max_age: Option<Duration>,
}

impl Sessions {
    pub fn new(store: Arc<dyn SessionStore>, key: Key) -> Self {
        Self {
            store,
            key,
            cookie_name: SESSION_COOKIE.to_string(),
            max_age: None,
        }
    }

    /// Gives issued cookies a `Max-Age`, normally the store's idle TTL.
    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = Some(max_age);
        self
    }

    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    /// Extracts the token from a signed session cookie. A cookie whose
    /// signature does not verify yields `None`.
    pub fn token_from_cookie(&self, cookie: Cookie<'static>) -> Option<String> {
        let mut jar = CookieJar::new();
        jar.add_original(cookie);
        jar.signed(&self.key)
            .get(&self.cookie_name)
            .map(|verified| verified.value().to_string())
    }

    /// Builds the signed cookie that carries `token` back to the client.
    pub fn token_cookie(&self, token: &str) -> Option<Cookie<'static>> {
        let mut builder = Cookie::build(self.cookie_name.clone(), token.to_string())
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax);
        if let Some(max_age) = self.max_age {
            builder = builder.max_age(time::Duration::try_from(max_age).ok()?);
        }
        let cookie = builder.finish();

        let mut jar = CookieJar::new();
        jar.signed_mut(&self.key).add(cookie);
        jar.get(&self.cookie_name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sessions() -> Sessions {
        Sessions::new(Arc::new(MemorySessionStore::new()), Key::generate())
    }

    #[test]
    fn signed_cookie_yields_its_token() {
        let sessions = sessions();
        let cookie = sessions.token_cookie("abc-123").unwrap();

        assert_ne!(cookie.value(), "abc-123");
        assert!(cookie.http_only().unwrap_or(false));
        assert_eq!(sessions.token_from_cookie(cookie).as_deref(), Some("abc-123"));
    }

    #[test]
    fn tampered_cookie_is_rejected() {
        let sessions = sessions();
        let forged = Cookie::new(SESSION_COOKIE, "abc-123");
        assert!(sessions.token_from_cookie(forged).is_none());
    }

    #[test]
    fn cookie_from_another_key_is_rejected() {
        let issuer = sessions();
        let verifier = sessions();
        let cookie = issuer.token_cookie("abc-123").unwrap();

        assert!(verifier.token_from_cookie(cookie).is_none());
    }

    #[test]
    fn cookie_max_age_follows_ttl() {
        let limited = sessions().with_max_age(Duration::from_secs(90));
        let cookie = limited.token_cookie("abc-123").unwrap();

        assert_eq!(cookie.max_age(), Some(time::Duration::seconds(90)));
        assert_eq!(sessions().token_cookie("x").unwrap().max_age(), None);
    }

    #[actix_web::test]
    async fn expired_entry_loads_as_none_and_is_removed() {
        let store = MemorySessionStore::with_ttl(Duration::from_millis(20));
        store.save("t", SessionState::default()).await.unwrap();
        assert!(store.load("t").await.unwrap().is_some());

        actix_web::rt::time::sleep(Duration::from_millis(60)).await;

        assert!(store.load("t").await.unwrap().is_none());
        assert_eq!(store.len().await, 0);
    }

    #[actix_web::test]
    async fn save_sweeps_idle_entries() {
        let store = MemorySessionStore::with_ttl(Duration::from_millis(20));
        for token in ["a", "b", "c"] {
            store.save(token, SessionState::default()).await.unwrap();
        }

        actix_web::rt::time::sleep(Duration::from_millis(60)).await;
        store.save("d", SessionState::default()).await.unwrap();

        assert_eq!(store.len().await, 1);
        assert!(store.load("d").await.unwrap().is_some());
    }

    #[actix_web::test]
    async fn memory_store_round_trip() {
        let store = MemorySessionStore::new();
        let state = SessionState {
            user_id: Some(4),
            page_views: 2,
        };

        assert!(store.load("t").await.unwrap().is_none());
        store.save("t", state.clone()).await.unwrap();
        assert_eq!(store.load("t").await.unwrap(), Some(state));
        assert_eq!(store.len().await, 1);

        store.delete("t").await.unwrap();
        store.delete("t").await.unwrap();
        assert!(store.load("t").await.unwrap().is_none());
    }
}
