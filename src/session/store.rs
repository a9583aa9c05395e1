//! Session and session storage.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::time::Duration;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::chat::SessionState;
use crate::dispatch::{DispatchPolicy, Dispatcher};
use crate::reply::ReplyBackend;

/// Default idle timeout (30 minutes).
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// A single mounted widget.
#[derive(Debug, Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

#[derive(Debug)]
struct SessionInner {
    /// Unique session identifier.
    id: String,
    /// Owner of the widget state.
    dispatcher: Dispatcher,
    /// Last request seen for this session.
    last_activity: Mutex<DateTime<Utc>>,
}

impl Session {
    fn new(id: String, dispatcher: Dispatcher) -> Self {
        let now = Utc::now();
        Self {
            inner: Arc::new(SessionInner {
                id,
                dispatcher,
                last_activity: Mutex::new(now),
            }),
        }
    }

    /// Get the session ID.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.inner.id
    }

    #[must_use]
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.inner.dispatcher
    }

    /// Update the last activity timestamp.
    pub fn touch(&self) {
        let mut guard = self
            .inner
            .last_activity
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        *guard = Utc::now();
    }

    /// Check if the session has been idle longer than `timeout`.
    #[must_use]
    pub fn is_expired_with_timeout(&self, timeout: Duration) -> bool {
        let last = *self
            .inner
            .last_activity
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        // Negative duration means clock skew; treat as active.
        (Utc::now() - last)
            .to_std()
            .is_ok_and(|idle| idle > timeout)
    }
}

/// Thread-safe store for sessions.
///
/// New sessions share the store's reply backend and dispatch policy.
#[derive(Debug, Clone)]
pub struct SessionStore {
    inner: Arc<SessionStoreInner>,
}

#[derive(Debug)]
struct SessionStoreInner {
    sessions: RwLock<HashMap<String, Session>>,
    backend: Arc<dyn ReplyBackend>,
    policy: DispatchPolicy,
}

impl SessionStore {
    /// Create an empty store.
    #[must_use]
    pub fn new(backend: Arc<dyn ReplyBackend>, policy: DispatchPolicy) -> Self {
        Self {
            inner: Arc::new(SessionStoreInner {
                sessions: RwLock::new(HashMap::new()),
                backend,
                policy,
            }),
        }
    }

    /// Mount a new session with the given initial state.
    #[must_use]
    pub fn create(&self, state: SessionState) -> Session {
        let id = Uuid::new_v4().to_string();
        let dispatcher = Dispatcher::new(state, Arc::clone(&self.inner.backend), self.inner.policy);
        let session = Session::new(id.clone(), dispatcher);
        self.inner
            .sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, session.clone());
        tracing::debug!(name: "session.created", session_id = %session.id(), "Session mounted");
        session
    }

    /// Get a session by ID, marking it active.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<Session> {
        let session = self
            .inner
            .sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()?;
        session.touch();
        Some(session)
    }

    /// Unmount a session, cancelling its pending replies.
    pub fn remove(&self, id: &str) -> Option<Session> {
        let removed = self
            .inner
            .sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id);
        if let Some(session) = &removed {
            session.dispatcher().close();
            tracing::debug!(name: "session.closed", session_id = %id, "Session unmounted");
        }
        removed
    }

    /// Get the number of mounted sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner
            .sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Check if there are no sessions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Unmount sessions that have been idle longer than the timeout.
    ///
    /// Returns the number of sessions removed.
    pub fn cleanup_expired_with_timeout(&self, timeout: Duration) -> usize {
        let expired: Vec<Session> = {
            let mut guard = self
                .inner
                .sessions
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            let ids: Vec<String> = guard
                .iter()
                .filter(|(_, session)| session.is_expired_with_timeout(timeout))
                .map(|(id, _)| id.clone())
                .collect();
            ids.iter().filter_map(|id| guard.remove(id)).collect()
        };

        for session in &expired {
            session.dispatcher().close();
        }
        expired.len()
    }

    /// List all session IDs.
    #[must_use]
    pub fn list_ids(&self) -> Vec<String> {
        self.inner
            .sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }
}
