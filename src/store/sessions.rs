use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Sessions live this long unless configured otherwise
pub const DEFAULT_SESSION_TTL_SECS: i64 = 24 * 60 * 60;

/// Logged-in state for one client
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub username: String,
    /// Number of recommendations currently shown
    pub page_size: usize,
    pub created_at: DateTime<Utc>,
}

impl Session {
    fn is_expired(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        now - self.created_at >= ttl
    }
}

/// In-memory sessions keyed by bearer token
///
/// A session expires `ttl` after login. Expired entries are dropped when
/// looked up and swept whenever a new session is created.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, Session>>>,
    ttl: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_ttl(Duration::seconds(DEFAULT_SESSION_TTL_SECS))
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Starts a session and returns its token
    pub async fn create(&self, username: &str, page_size: usize) -> Uuid {
        let token = Uuid::new_v4();
        let now = Utc::now();
        let session = Session {
            username: username.to_string(),
            page_size,
            created_at: now,
        };

        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, existing| !existing.is_expired(self.ttl, now));
        if sessions.len() < before {
            tracing::debug!(expired = before - sessions.len(), "Swept expired sessions");
        }
        sessions.insert(token, session);
        token
    }

    /// The live session for `token`; an expired one is removed
    pub async fn get(&self, token: &Uuid) -> Option<Session> {
        let now = Utc::now();
        {
            let sessions = self.sessions.read().await;
            match sessions.get(token) {
                Some(session) if !session.is_expired(self.ttl, now) => {
                    return Some(session.clone())
                }
                Some(_) => {}
                None => return None,
            }
        }

        self.sessions.write().await.remove(token);
        tracing::debug!("Session expired");
        None
    }

    /// Ends a session; returns whether it existed
    pub async fn remove(&self, token: &Uuid) -> bool {
        self.sessions.write().await.remove(token).is_some()
    }

    /// Grows the page size by `step` and returns the new size
    pub async fn grow_page(&self, token: &Uuid, step: usize) -> Option<usize> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(token)?;
        if session.is_expired(self.ttl, Utc::now()) {
            sessions.remove(token);
            return None;
        }
        session.page_size = session.page_size.saturating_add(step);
        Some(session.page_size)
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_get_remove() {
        let store = SessionStore::new();
        let token = store.create("alice", 5).await;

        let session = store.get(&token).await.unwrap();
        assert_eq!(session.username, "alice");
        assert_eq!(session.page_size, 5);

        assert!(store.remove(&token).await);
        assert!(!store.remove(&token).await);
        assert!(store.get(&token).await.is_none());
    }

    #[tokio::test]
    async fn test_tokens_are_distinct() {
        let store = SessionStore::new();
        let first = store.create("alice", 5).await;
        let second = store.create("alice", 5).await;
        assert_ne!(first, second);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_grow_page() {
        let store = SessionStore::new();
        let token = store.create("bob", 5).await;

        assert_eq!(store.grow_page(&token, 5).await, Some(10));
        assert_eq!(store.get(&token).await.unwrap().page_size, 10);
        assert_eq!(store.grow_page(&Uuid::new_v4(), 5).await, None);
    }

    #[tokio::test]
    async fn test_default_ttl_is_one_day() {
        assert_eq!(SessionStore::new().ttl(), Duration::hours(24));
    }

    #[tokio::test]
    async fn test_expired_session_is_dropped_on_lookup() {
        let store = SessionStore::with_ttl(Duration::zero());
        let token = store.create("carol", 5).await;

        assert!(store.get(&token).await.is_none());
        assert_eq!(store.len().await, 0);
        assert!(!store.remove(&token).await);
    }

    #[tokio::test]
    async fn test_expired_session_cannot_grow() {
        let store = SessionStore::with_ttl(Duration::zero());
        let token = store.create("dave", 5).await;

        assert_eq!(store.grow_page(&token, 5).await, None);
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn test_create_sweeps_expired_sessions() {
        let store = SessionStore::with_ttl(Duration::zero());
        store.create("erin", 5).await;
        store.create("erin", 5).await;

        // only the session just created survives the sweep
        assert_eq!(store.len().await, 1);
    }
}
