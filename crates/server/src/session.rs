// SSE session table

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};
use uuid::Uuid;

/// Outgoing messages buffered per session before the stream picks them up
const SESSION_BUFFER: usize = 64;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Could not find session {0}")]
    NotFound(Uuid),

    #[error("Session {0} is closed")]
    Closed(Uuid),
}

/// Live SSE sessions keyed by id.
///
/// Each entry holds the sending half of the channel that feeds one
/// client's event stream.
#[derive(Clone, Default)]
pub struct SessionManager {
    sessions: Arc<RwLock<HashMap<Uuid, mpsc::Sender<String>>>>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a session and return its id and the receiving half
    pub async fn open(&self) -> (Uuid, mpsc::Receiver<String>) {
        let id = Uuid::new_v4();
        let (tx, rx) = mpsc::channel(SESSION_BUFFER);
        self.sessions.write().await.insert(id, tx);
        tracing::info!(session_id = %id, "SSE session opened");
        (id, rx)
    }

    pub async fn contains(&self, id: &Uuid) -> bool {
        self.sessions.read().await.contains_key(id)
    }

    /// Queue a serialized message for the session's stream
    pub async fn send(&self, id: &Uuid, message: String) -> Result<(), SessionError> {
        let sender = self
            .sessions
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or(SessionError::NotFound(*id))?;

        if sender.send(message).await.is_err() {
            self.remove(id).await;
            return Err(SessionError::Closed(*id));
        }
        Ok(())
    }

    pub async fn remove(&self, id: &Uuid) {
        if self.sessions.write().await.remove(id).is_some() {
            tracing::info!(session_id = %id, "SSE session closed");
        }
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Guard that removes the session when the owning stream is dropped
    pub fn guard(&self, id: Uuid) -> SessionGuard {
        SessionGuard {
            sessions: self.clone(),
            id,
        }
    }
}

pub struct SessionGuard {
    sessions: SessionManager,
    id: Uuid,
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        let sessions = self.sessions.clone();
        let id = self.id;
        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            handle.spawn(async move { sessions.remove(&id).await });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_send_receive() {
        let sessions = SessionManager::new();
        let (id, mut rx) = sessions.open().await;

        assert!(sessions.contains(&id).await);
        sessions.send(&id, "hello".to_string()).await.unwrap();
        assert_eq!(rx.recv().await.as_deref(), Some("hello"));
    }

    #[tokio::test]
    async fn test_unknown_session() {
        let sessions = SessionManager::new();
        let id = Uuid::new_v4();
        assert_eq!(
            sessions.send(&id, "x".to_string()).await,
            Err(SessionError::NotFound(id))
        );
    }

    #[tokio::test]
    async fn test_dropped_receiver_closes_session() {
        let sessions = SessionManager::new();
        let (id, rx) = sessions.open().await;
        drop(rx);

        assert_eq!(
            sessions.send(&id, "x".to_string()).await,
            Err(SessionError::Closed(id))
        );
        assert_eq!(sessions.len().await, 0);
    }

    #[tokio::test]
    async fn test_guard_removes_session() {
        let sessions = SessionManager::new();
        let (id, _rx) = sessions.open().await;
        drop(sessions.guard(id));

        for _ in 0..10 {
            if !sessions.contains(&id).await {
                break;
            }
            tokio::task::yield_now().await;
        }
        assert!(!sessions.contains(&id).await);
    }
}
