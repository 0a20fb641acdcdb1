//! Cookie sessions.
//!
//! The cookie carries an opaque random id; the user id lives server-side in a
//! [`SessionStore`]. Sessions expire after the store's TTL, which is also sent as the
//! cookie's `Max-Age`. Expired sessions are dropped when read and swept whenever a new
//! session is created.

use std::{collections::HashMap, time::Duration};

use async_trait::async_trait;
use axum::http::{header::COOKIE, HeaderMap};
use tokio::{sync::RwLock, time::Instant};
use tracing::debug;
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "canteen_session";

#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Starts a session for `user_id` and returns its id.
    async fn create(&self, user_id: i64) -> String;

    /// The user bound to a live session, if any.
    async fn user_id(&self, session_id: &str) -> Option<i64>;

    /// Ends the session. Unknown ids are ignored.
    async fn destroy(&self, session_id: &str);

    fn ttl(&self) -> Duration;
}

struct Session {
    user_id: i64,
    expires_at: Instant,
}

/// In-process session store. Sessions are lost on restart.
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<String, Session>>,
    ttl: Duration,
}

impl MemorySessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
        }
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn create(&self, user_id: i64) -> String {
        let id = Uuid::new_v4().to_string();
        let now = Instant::now();

        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| now < session.expires_at);
        let evicted = before - sessions.len();

        sessions.insert(
            id.clone(),
            Session {
                user_id,
                expires_at: now + self.ttl,
            },
        );
        debug!(user_id, evicted, live = sessions.len(), "Session created");
        id
    }

    async fn user_id(&self, session_id: &str) -> Option<i64> {
        {
            let sessions = self.sessions.read().await;
            match sessions.get(session_id) {
                Some(session) if Instant::now() < session.expires_at => {
                    return Some(session.user_id)
                }
                Some(_) => {}
                None => return None,
            }
        }

        debug!("Session expired");
        self.sessions.write().await.remove(session_id);
        None
    }

    async fn destroy(&self, session_id: &str) {
        if self.sessions.write().await.remove(session_id).is_some() {
            debug!("Session destroyed");
        }
    }

    fn ttl(&self) -> Duration {
        self.ttl
    }
}

/// Reads the session id from the `Cookie` headers.
pub fn session_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.to_string())
}

/// `Set-Cookie` value for a new session.
pub fn session_cookie(session_id: &str, ttl: Duration) -> String {
    format!(
        "{SESSION_COOKIE}={session_id}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        ttl.as_secs()
    )
}

/// `Set-Cookie` value that removes the session cookie.
pub fn expired_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}
