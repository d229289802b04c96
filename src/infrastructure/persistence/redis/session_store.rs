use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;

use crate::domain::auth::{
  entities::SessionUser,
  errors::{AuthError, PersistenceError},
  ports::SessionStore,
  value_objects::SessionId,
};

const KEY_PREFIX: &str = "authgate:session:";

/// Redis-backed session store
///
/// Each session is a JSON-encoded `SessionUser` stored under
/// `authgate:session:{id}` with a sliding TTL that restarts on every write.
pub struct RedisSessionStore {
  redis: ConnectionManager,
  ttl_seconds: u64,
}

impl RedisSessionStore {
  /// Creates a new RedisSessionStore with the given connection manager
  pub fn new(redis: ConnectionManager, ttl_seconds: u64) -> Self {
    Self { redis, ttl_seconds }
  }

  fn key(session_id: &SessionId) -> String {
    format!("{}{}", KEY_PREFIX, session_id.as_str())
  }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
  async fn set_authenticated_user(
    &self,
    session_id: &SessionId,
    user: &SessionUser,
  ) -> Result<(), AuthError> {
    let payload = serde_json::to_string(user)
      .map_err(|e| PersistenceError::SessionStore(format!("Failed to encode session: {}", e)))?;

    let mut conn = self.redis.clone();
    conn
      .set_ex::<_, _, ()>(Self::key(session_id), payload, self.ttl_seconds)
      .await
      .map_err(|e| {
        tracing::error!("Failed to write session: {}", e);
        AuthError::from(e)
      })?;

    Ok(())
  }

  async fn authenticated_user(
    &self,
    session_id: &SessionId,
  ) -> Result<Option<SessionUser>, AuthError> {
    let mut conn = self.redis.clone();
    let payload: Option<String> = conn.get(Self::key(session_id)).await?;

    match payload {
      Some(payload) => {
        let user = serde_json::from_str(&payload).map_err(|e| {
          PersistenceError::Corrupted(format!("Session {} is unreadable: {}", session_id, e))
        })?;
        Ok(Some(user))
      }
      None => Ok(None),
    }
  }

  async fn clear(&self, session_id: &SessionId) -> Result<(), AuthError> {
    let mut conn = self.redis.clone();
    conn.del::<_, ()>(Self::key(session_id)).await?;
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::auth::value_objects::{UserId, UserName};
  use testcontainers_modules::redis::{REDIS_PORT, Redis};
  use testcontainers_modules::testcontainers::{ContainerAsync, runners::AsyncRunner};

  async fn setup_test_redis() -> (ConnectionManager, ContainerAsync<Redis>) {
    // Start a Redis container
    let container = Redis::default()
      .start()
      .await
      .expect("Failed to start redis container");

    let host = container.get_host().await.expect("Failed to get host");
    let port = container
      .get_host_port_ipv4(REDIS_PORT)
      .await
      .expect("Failed to get port");

    let client = redis::Client::open(format!("redis://{}:{}", host, port))
      .expect("Invalid Redis URL");
    let conn = client
      .get_connection_manager()
      .await
      .expect("Failed to connect to test redis");

    (conn, container)
  }

  fn session_user(name: &str) -> SessionUser {
    SessionUser {
      user_id: UserId::new(),
      name: UserName::new(name).unwrap(),
    }
  }

  #[test]
  fn test_session_key_format() {
    let session_id = SessionId::new("abc123").unwrap();
    assert_eq!(RedisSessionStore::key(&session_id), "authgate:session:abc123");
  }

  #[tokio::test]
  #[ignore = "requires Docker"]
  async fn test_set_and_read_session() {
    let (conn, _container) = setup_test_redis().await;
    let store = RedisSessionStore::new(conn, 3600);
    let session_id = SessionId::generate();
    let alice = session_user("Alice");

    assert!(store.authenticated_user(&session_id).await.unwrap().is_none());

    store.set_authenticated_user(&session_id, &alice).await.unwrap();

    assert_eq!(store.authenticated_user(&session_id).await.unwrap(), Some(alice));
  }

  #[tokio::test]
  #[ignore = "requires Docker"]
  async fn test_set_overwrites_previous_user() {
    let (conn, _container) = setup_test_redis().await;
    let store = RedisSessionStore::new(conn, 3600);
    let session_id = SessionId::generate();

    store
      .set_authenticated_user(&session_id, &session_user("Alice"))
      .await
      .unwrap();
    let bob = session_user("Bob");
    store.set_authenticated_user(&session_id, &bob).await.unwrap();

    assert_eq!(store.authenticated_user(&session_id).await.unwrap(), Some(bob));
  }

  #[tokio::test]
  #[ignore = "requires Docker"]
  async fn test_clear_removes_session() {
    let (conn, _container) = setup_test_redis().await;
    let store = RedisSessionStore::new(conn, 3600);
    let first = SessionId::generate();
    let second = SessionId::generate();

    store
      .set_authenticated_user(&first, &session_user("Alice"))
      .await
      .unwrap();
    store
      .set_authenticated_user(&second, &session_user("Bob"))
      .await
      .unwrap();

    store.clear(&first).await.unwrap();

    assert!(store.authenticated_user(&first).await.unwrap().is_none());
    assert!(store.authenticated_user(&second).await.unwrap().is_some());
  }

  #[tokio::test]
  #[ignore = "requires Docker"]
  async fn test_session_is_written_with_ttl() {
    let (conn, _container) = setup_test_redis().await;
    let store = RedisSessionStore::new(conn.clone(), 120);
    let session_id = SessionId::generate();

    store
      .set_authenticated_user(&session_id, &session_user("Alice"))
      .await
      .unwrap();

    let mut conn = conn;
    let ttl: i64 = conn.ttl(RedisSessionStore::key(&session_id)).await.unwrap();
    assert!(ttl > 0 && ttl <= 120, "unexpected ttl {ttl}");
  }

  #[tokio::test]
  #[ignore = "requires Docker"]
  async fn test_unreadable_payload_is_reported() {
    let (conn, _container) = setup_test_redis().await;
    let store = RedisSessionStore::new(conn.clone(), 3600);
    let session_id = SessionId::generate();

    let mut conn = conn;
    conn
      .set::<_, _, ()>(RedisSessionStore::key(&session_id), "not json")
      .await
      .unwrap();

    assert!(matches!(
      store.authenticated_user(&session_id).await,
      Err(AuthError::Persistence(PersistenceError::Corrupted(_)))
    ));
  }
}
