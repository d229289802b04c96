use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::auth::{
  entities::{NewUserRecord, User},
  errors::{AuthError, PersistenceError, ValidationError},
  ports::UserRepository,
  value_objects::{Email, PasswordHash, UserId, UserName},
};

/// PostgreSQL implementation of the UserRepository trait
pub struct PostgresUserRepository {
  pool: PgPool,
}

impl PostgresUserRepository {
  /// Creates a new instance of PostgresUserRepository
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

/// Database row structure for users table
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
  id: Uuid,
  name: String,
  email: String,
  password_hash: String,
  created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
  type Error = PersistenceError;

  fn try_from(row: UserRow) -> Result<Self, Self::Error> {
    let id = row.id;
    let corrupted = |e: ValidationError| {
      PersistenceError::Corrupted(format!("user {} has invalid {}: {}", id, e.field(), e))
    };

    let name = UserName::new(row.name).map_err(corrupted)?;
    let email = Email::new(row.email).map_err(corrupted)?;
    let password_hash = PasswordHash::from_hash(row.password_hash).map_err(corrupted)?;

    Ok(User::from_db(
      UserId::from_uuid(id),
      name,
      email,
      password_hash,
      row.created_at,
    ))
  }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
  async fn create(&self, user: NewUserRecord) -> Result<User, AuthError> {
    let row = sqlx::query_as::<_, UserRow>(
      r#"
            INSERT INTO users (name, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, password_hash, created_at
            "#,
    )
    .bind(user.name.into_inner())
    .bind(user.email.into_inner())
    .bind(user.password_hash.into_inner())
    .fetch_one(&self.pool)
    .await?;

    Ok(User::try_from(row)?)
  }

  async fn find_by_email(&self, email: &Email) -> Result<Option<User>, AuthError> {
    let row = sqlx::query_as::<_, UserRow>(
      r#"
            SELECT id, name, email, password_hash, created_at
            FROM users
            WHERE email = $1
            "#,
    )
    .bind(email.as_str())
    .fetch_optional(&self.pool)
    .await
    .map_err(|e| {
      tracing::error!("Failed to find user by email: {}", e);
      AuthError::from(e)
    })?;

    match row {
      Some(row) => Ok(Some(User::try_from(row)?)),
      None => Ok(None),
    }
  }
}
