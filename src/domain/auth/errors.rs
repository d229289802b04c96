use thiserror::Error;

/// Message shown to callers for any infrastructure failure
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong, please try again later";

/// Main authentication error type
///
/// Expected business results (duplicate email, bad credentials) are not errors;
/// they are returned as outcomes. Only invalid input and infrastructure
/// failures travel through this type.
#[derive(Debug, Error)]
pub enum AuthError {
  #[error("Validation error: {0}")]
  Validation(#[from] ValidationError),

  #[error("Persistence error: {0}")]
  Persistence(#[from] PersistenceError),

  #[error("Hash error: {0}")]
  Hash(#[from] HashError),
}

impl AuthError {
  /// Returns a message safe to show to the end user
  ///
  /// Validation errors carry field-level feedback. Everything else collapses
  /// into a generic retry message so storage details never reach the caller.
  pub fn user_message(&self) -> String {
    match self {
      AuthError::Validation(e) => e.to_string(),
      AuthError::Persistence(_) | AuthError::Hash(_) => GENERIC_FAILURE_MESSAGE.to_string(),
    }
  }
}

/// Storage and session store errors
#[derive(Debug, Error)]
pub enum PersistenceError {
  #[error("Database connection failed: {0}")]
  ConnectionFailed(String),

  #[error("Query execution failed: {0}")]
  QueryFailed(String),

  #[error("Duplicate key violation: {0}")]
  DuplicateKey(String),

  #[error("Session store failure: {0}")]
  SessionStore(String),

  #[error("Stored record is corrupted: {0}")]
  Corrupted(String),
}

/// Password hashing errors
#[derive(Debug, Error)]
pub enum HashError {
  #[error("Failed to hash password: {0}")]
  HashingFailed(String),

  #[error("Invalid hash format")]
  InvalidFormat,
}

/// Input validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
  #[error("Invalid email format")]
  InvalidEmail,

  #[error("Email is too long, maximum {max} characters allowed")]
  EmailTooLong { max: usize },

  #[error("Name is required")]
  NameEmpty,

  #[error("Name is too long, maximum {max} characters allowed")]
  NameTooLong { max: usize },

  #[error("Name contains invalid characters")]
  NameInvalidCharacters,

  #[error("Password is required")]
  PasswordEmpty,

  #[error("Password too short, minimum {min} characters required")]
  PasswordTooShort { min: usize },

  #[error("Password too long, maximum {max} characters allowed")]
  PasswordTooLong { max: usize },

  #[error("Password must contain at least one uppercase letter")]
  PasswordMissingUppercase,

  #[error("Password must contain at least one lowercase letter")]
  PasswordMissingLowercase,

  #[error("Password must contain at least one digit")]
  PasswordMissingDigit,

  #[error("Invalid password hash format")]
  InvalidPasswordHash,

  #[error("Invalid session identifier")]
  InvalidSessionId,
}

impl ValidationError {
  /// Name of the input field this error refers to
  pub fn field(&self) -> &'static str {
    match self {
      Self::InvalidEmail | Self::EmailTooLong { .. } => "email",
      Self::NameEmpty | Self::NameTooLong { .. } | Self::NameInvalidCharacters => "name",
      Self::PasswordEmpty
      | Self::PasswordTooShort { .. }
      | Self::PasswordTooLong { .. }
      | Self::PasswordMissingUppercase
      | Self::PasswordMissingLowercase
      | Self::PasswordMissingDigit => "password",
      Self::InvalidPasswordHash => "password_hash",
      Self::InvalidSessionId => "session_id",
    }
  }
}

// Automatic conversions from external error types

impl From<sqlx::Error> for PersistenceError {
  fn from(error: sqlx::Error) -> Self {
    match error {
      sqlx::Error::Database(db_err) => {
        if db_err.is_unique_violation() {
          PersistenceError::DuplicateKey(db_err.message().to_string())
        } else {
          PersistenceError::QueryFailed(db_err.message().to_string())
        }
      }
      sqlx::Error::PoolTimedOut => PersistenceError::ConnectionFailed("Pool timed out".to_string()),
      sqlx::Error::PoolClosed => PersistenceError::ConnectionFailed("Pool closed".to_string()),
      sqlx::Error::Io(e) => PersistenceError::ConnectionFailed(e.to_string()),
      _ => PersistenceError::QueryFailed(error.to_string()),
    }
  }
}

impl From<sqlx::Error> for AuthError {
  fn from(error: sqlx::Error) -> Self {
    AuthError::Persistence(PersistenceError::from(error))
  }
}

impl From<redis::RedisError> for PersistenceError {
  fn from(error: redis::RedisError) -> Self {
    PersistenceError::SessionStore(error.to_string())
  }
}

impl From<redis::RedisError> for AuthError {
  fn from(error: redis::RedisError) -> Self {
    AuthError::Persistence(PersistenceError::from(error))
  }
}

impl From<argon2::password_hash::Error> for HashError {
  fn from(error: argon2::password_hash::Error) -> Self {
    use argon2::password_hash::Error;
    match error {
      Error::PhcStringField | Error::PhcStringTrailingData => HashError::InvalidFormat,
      _ => HashError::HashingFailed(error.to_string()),
    }
  }
}
