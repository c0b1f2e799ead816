// src/services/session_store.rs - server-side sessions keyed by an opaque id

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Duration, Utc};
use log::{debug, info};
use tokio::task::JoinHandle;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct Session {
    pub id: String,
    pub user_id: i64,
    pub expires_at: DateTime<Utc>,
}

/// Binds session ids to user ids.
pub trait SessionStore: Send + Sync {
    /// Start a session for `user_id` and return it.
    fn create(&self, user_id: i64) -> Session;
    /// User id behind a live session; expired or unknown ids give `None`.
    fn resolve(&self, session_id: &str) -> Option<i64>;
    fn destroy(&self, session_id: &str);
    /// Drop expired sessions, returning how many were removed.
    fn sweep(&self) -> usize;
    fn ttl(&self) -> Duration;
}

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

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.sessions.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    fn resolve_at(&self, session_id: &str, now: DateTime<Utc>) -> Option<i64> {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(session_id)
            .filter(|s| s.expires_at > now)
            .map(|s| s.user_id)
    }

    fn sweep_at(&self, now: DateTime<Utc>) -> usize {
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        let before = sessions.len();
        sessions.retain(|_, s| s.expires_at > now);
        before - sessions.len()
    }
}

impl SessionStore for MemorySessionStore {
    fn create(&self, user_id: i64) -> Session {
        let session = Session {
            id: Uuid::new_v4().to_string(),
            user_id,
            expires_at: Utc::now()
                .checked_add_signed(self.ttl)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        };
        self.sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(session.id.clone(), session.clone());
        session
    }

    fn resolve(&self, session_id: &str) -> Option<i64> {
        self.resolve_at(session_id, Utc::now())
    }

    fn destroy(&self, session_id: &str) {
        self.sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(session_id);
    }

    fn sweep(&self) -> usize {
        self.sweep_at(Utc::now())
    }

    fn ttl(&self) -> Duration {
        self.ttl
    }
}

/// Periodically purge expired sessions until the returned handle is aborted.
pub fn spawn_sweeper(store: Arc<dyn SessionStore>, every: std::time::Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        loop {
            ticker.tick().await;
            let removed = store.sweep();
            if removed > 0 {
                info!("session sweep removed {} expired session(s)", removed);
            } else {
                debug!("session sweep: nothing to remove");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn created_session_resolves_to_user() {
        let store = MemorySessionStore::new(Duration::hours(24));
        let session = store.create(7);
        assert_eq!(store.resolve(&session.id), Some(7));
        assert!(store.resolve("not-a-session").is_none());
    }

    #[test]
    fn session_ids_are_unique() {
        let store = MemorySessionStore::new(Duration::hours(24));
        let a = store.create(1);
        let b = store.create(1);
        assert_ne!(a.id, b.id);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn destroyed_session_no_longer_resolves() {
        let store = MemorySessionStore::new(Duration::hours(24));
        let session = store.create(3);
        store.destroy(&session.id);
        assert!(store.resolve(&session.id).is_none());
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn expired_sessions_stop_resolving_and_get_swept() {
        let store = MemorySessionStore::new(Duration::minutes(30));
        let old = store.create(1);
        let later = Utc::now() + Duration::minutes(31);

        assert!(store.resolve_at(&old.id, later).is_none());
        assert_eq!(store.sweep_at(Utc::now()), 0);
        assert_eq!(store.sweep_at(later), 1);
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn huge_ttl_saturates_instead_of_overflowing() {
        let store = MemorySessionStore::new(Duration::MAX);
        let session = store.create(5);
        assert_eq!(session.expires_at, DateTime::<Utc>::MAX_UTC);
        assert_eq!(store.resolve(&session.id), Some(5));
    }

    #[tokio::test]
    async fn sweeper_task_purges_expired_sessions() {
        let store = Arc::new(MemorySessionStore::new(Duration::seconds(-1)));
        store.create(1);
        store.create(2);

        let handle = spawn_sweeper(store.clone(), std::time::Duration::from_millis(10));
        tokio::time::sleep(std::time::Duration::from_millis(60)).await;
        handle.abort();

        assert_eq!(store.len(), 0);
    }
}
