use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::domain::auth::{
  entities::SessionUser, errors::AuthError, ports::SessionStore, value_objects::SessionId,
};

/// Lifetime used by [`InMemorySessionStore::new`], one day
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(86400);

struct Entry {
  user: SessionUser,
  expires_at: Instant,
}

/// Process-local session store, for tests and single-node development
///
/// Entries expire after the configured TTL, which restarts on every write.
/// Expired entries read as absent and are pruned on the next write.
pub struct InMemorySessionStore {
  sessions: RwLock<HashMap<SessionId, Entry>>,
  ttl: Duration,
}

impl Default for InMemorySessionStore {
  fn default() -> Self {
    Self::with_ttl(DEFAULT_SESSION_TTL)
  }
}

impl InMemorySessionStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_ttl(ttl: Duration) -> Self {
    Self {
      sessions: RwLock::new(HashMap::new()),
      ttl,
    }
  }

  /// Number of entries held, including expired ones not yet pruned
  pub async fn len(&self) -> usize {
    self.sessions.read().await.len()
  }

  pub async fn is_empty(&self) -> bool {
    self.sessions.read().await.is_empty()
  }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
  async fn set_authenticated_user(
    &self,
    session_id: &SessionId,
    user: &SessionUser,
  ) -> Result<(), AuthError> {
    let now = Instant::now();
    let mut sessions = self.sessions.write().await;

    sessions.retain(|_, entry| entry.expires_at > now);
    sessions.insert(
      session_id.clone(),
      Entry {
        user: user.clone(),
        expires_at: now + self.ttl,
      },
    );
    Ok(())
  }

  async fn authenticated_user(
    &self,
    session_id: &SessionId,
  ) -> Result<Option<SessionUser>, AuthError> {
    let now = Instant::now();
    Ok(
      self
        .sessions
        .read()
        .await
        .get(session_id)
        .filter(|entry| entry.expires_at > now)
        .map(|entry| entry.user.clone()),
    )
  }

  async fn clear(&self, session_id: &SessionId) -> Result<(), AuthError> {
    self.sessions.write().await.remove(session_id);
    Ok(())
  }
}
