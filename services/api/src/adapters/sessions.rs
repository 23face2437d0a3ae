//! services/api/src/adapters/sessions.rs
//!
//! In-memory implementation of the `SessionStore` port. Sessions live only
//! for the lifetime of the process, matching the ephemeral cookie-store
//! semantics of the login flow.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use krishi_core::ports::{PortResult, SessionStore};
use std::collections::HashMap;
use tokio::sync::Mutex;
use uuid::Uuid;

/// How long a login session stays valid.
pub const SESSION_TTL_DAYS: i64 = 30;

struct SessionEntry {
    email: String,
    expires_at: DateTime<Utc>,
}

/// A process-local session store keyed by opaque ids.
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: Mutex<HashMap<String, SessionEntry>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create(&self, email: &str) -> PortResult<String> {
        let session_id = Uuid::new_v4().to_string();
        let entry = SessionEntry {
            email: email.to_string(),
            expires_at: Utc::now() + Duration::days(SESSION_TTL_DAYS),
        };
        self.sessions.lock().await.insert(session_id.clone(), entry);
        Ok(session_id)
    }

    async fn identity(&self, session_id: &str) -> PortResult<Option<String>> {
        let mut sessions = self.sessions.lock().await;
        let live = match sessions.get(session_id) {
            Some(entry) if entry.expires_at > Utc::now() => Some(entry.email.clone()),
            Some(_) | None => None,
        };
        if live.is_none() {
            // Expired or unknown: drop any stale entry on access.
            sessions.remove(session_id);
        }
        Ok(live)
    }

    async fn destroy(&self, session_id: &str) -> PortResult<()> {
        self.sessions.lock().await.remove(session_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn created_sessions_resolve_to_their_identity() {
        let store = InMemorySessionStore::new();
        let id = store.create("farmer@example.com").await.unwrap();
        assert_eq!(
            store.identity(&id).await.unwrap().as_deref(),
            Some("farmer@example.com")
        );
    }

    #[tokio::test]
    async fn destroyed_and_unknown_sessions_resolve_to_none() {
        let store = InMemorySessionStore::new();
        let id = store.create("farmer@example.com").await.unwrap();
        store.destroy(&id).await.unwrap();
        assert!(store.identity(&id).await.unwrap().is_none());
        assert!(store.identity("not-a-session").await.unwrap().is_none());
        // Destroying twice is fine.
        store.destroy(&id).await.unwrap();
    }

    #[tokio::test]
    async fn expired_sessions_are_swept_on_access() {
        let store = InMemorySessionStore::new();
        let id = store.create("farmer@example.com").await.unwrap();
        {
            let mut sessions = store.sessions.lock().await;
            let entry = sessions.get_mut(&id).expect("entry exists");
            entry.expires_at = Utc::now() - Duration::seconds(1);
        }
        assert!(store.identity(&id).await.unwrap().is_none());
        assert!(store.sessions.lock().await.is_empty());
    }
}
