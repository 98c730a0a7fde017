//! Server-side registry of live login sessions.
//!
//! The session cookie carries a signed token naming a session id; a token is
//! only honoured while its id is present here, so logging out revokes it
//! even before the token expires.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionRecord {
    pub user_id: Uuid,
    pub expires_at: DateTime<Utc>,
}

#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, SessionRecord>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new session and return its id. Expired sessions are
    /// dropped on the way.
    pub fn create(&self, user_id: Uuid, expires_at: DateTime<Utc>) -> Uuid {
        let session_id = Uuid::new_v4();
        let now = Utc::now();

        if let Ok(mut sessions) = self.sessions.write() {
            sessions.retain(|_, record| record.expires_at > now);
            sessions.insert(session_id, SessionRecord { user_id, expires_at });
        }

        session_id
    }

    /// Look up a session that has not yet expired.
    pub fn get(&self, session_id: Uuid) -> Option<SessionRecord> {
        let sessions = self.sessions.read().ok()?;
        sessions
            .get(&session_id)
            .filter(|record| record.expires_at > Utc::now())
            .copied()
    }

    pub fn remove(&self, session_id: Uuid) {
        if let Ok(mut sessions) = self.sessions.write() {
            sessions.remove(&session_id);
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.read().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_create_and_get() {
        let store = SessionStore::new();
        let user_id = Uuid::new_v4();
        let sid = store.create(user_id, Utc::now() + Duration::hours(1));

        assert_eq!(store.get(sid).map(|r| r.user_id), Some(user_id));
        assert_eq!(store.get(Uuid::new_v4()), None);
    }

    #[test]
    fn test_remove_revokes() {
        let store = SessionStore::new();
        let sid = store.create(Uuid::new_v4(), Utc::now() + Duration::hours(1));
        store.remove(sid);

        assert!(store.get(sid).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_expired_sessions_are_invisible() {
        let store = SessionStore::new();
        let stale = store.create(Uuid::new_v4(), Utc::now() - Duration::minutes(1));

        assert!(store.get(stale).is_none());
    }

    #[test]
    fn test_create_drops_expired_sessions() {
        let store = SessionStore::new();
        for _ in 0..5 {
            store.create(Uuid::new_v4(), Utc::now() - Duration::minutes(1));
        }
        let live = store.create(Uuid::new_v4(), Utc::now() + Duration::hours(1));

        assert_eq!(store.len(), 1);
        assert!(store.get(live).is_some());
    }
}
