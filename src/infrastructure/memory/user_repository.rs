use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::auth::{
  entities::{NewUserRecord, User},
  errors::{AuthError, PersistenceError},
  ports::UserRepository,
  value_objects::{Email, UserId},
};

/// In-process implementation of the UserRepository trait
///
/// Keyed by normalized email, which gives the same uniqueness guarantee as
/// the unique index on `users.email`.
#[derive(Default)]
pub struct InMemoryUserRepository {
  users: RwLock<HashMap<Email, User>>,
}

impl InMemoryUserRepository {
  pub fn new() -> Self {
    Self::default()
  }

  /// Number of stored users
  pub async fn len(&self) -> usize {
    self.users.read().await.len()
  }

  pub async fn is_empty(&self) -> bool {
    self.users.read().await.is_empty()
  }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
  async fn create(&self, user: NewUserRecord) -> Result<User, AuthError> {
    let mut users = self.users.write().await;

    if users.contains_key(&user.email) {
      return Err(AuthError::Persistence(PersistenceError::DuplicateKey(
        format!("email {} already exists", user.email),
      )));
    }

    let created = User::from_db(
      UserId::new(),
      user.name,
      user.email.clone(),
      user.password_hash,
      Utc::now(),
    );
    users.insert(user.email, created.clone());

    Ok(created)
  }

  async fn find_by_email(&self, email: &Email) -> Result<Option<User>, AuthError> {
    Ok(self.users.read().await.get(email).cloned())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::auth::value_objects::{PasswordHash, UserName};

  fn record(name: &str, email: &str) -> NewUserRecord {
    NewUserRecord {
      name: UserName::new(name).unwrap(),
      email: Email::new(email).unwrap(),
      password_hash: PasswordHash::from_hash(
        "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$MTIzNDU2Nzg5MDEyMzQ1Njc4OTAxMjM0NTY3ODkwMTI",
      )
      .unwrap(),
    }
  }

  #[tokio::test]
  async fn test_create_and_find_by_email() {
    let repo = InMemoryUserRepository::new();

    let created = repo.create(record("Alice", "alice@example.com")).await.unwrap();
    let found = repo
      .find_by_email(&Email::new("alice@example.com").unwrap())
      .await
      .unwrap()
      .unwrap();

    assert_eq!(found.id, created.id);
    assert_eq!(found.name.as_str(), "Alice");
  }

  #[tokio::test]
  async fn test_find_missing_email_is_none() {
    let repo = InMemoryUserRepository::new();

    let found = repo
      .find_by_email(&Email::new("nobody@example.com").unwrap())
      .await
      .unwrap();

    assert!(found.is_none());
    assert!(repo.is_empty().await);
  }

  #[tokio::test]
  async fn test_duplicate_email() {
    let repo = InMemoryUserRepository::new();

    repo.create(record("Alice", "alice@example.com")).await.unwrap();
    let result = repo.create(record("Other", "alice@example.com")).await;

    match result {
      Err(AuthError::Persistence(PersistenceError::DuplicateKey(_))) => {}
      other => panic!("Expected DuplicateKey error, got {:?}", other),
    }
    assert_eq!(repo.len().await, 1);
  }
}
