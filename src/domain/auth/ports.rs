use async_trait::async_trait;

use super::entities::{NewUserRecord, SessionUser, User};
use super::errors::AuthError;
use super::value_objects::{Email, Password, PasswordHash, SessionId};

/// Repository trait for user persistence operations
#[async_trait]
pub trait UserRepository: Send + Sync {
  /// Inserts a new user and returns the stored record with its assigned id
  ///
  /// Does not check email uniqueness itself. A storage-level unique
  /// violation is reported as `PersistenceError::DuplicateKey`.
  async fn create(&self, user: NewUserRecord) -> Result<User, AuthError>;

  /// Finds a user by their email address; `None` when no record matches
  async fn find_by_email(&self, email: &Email) -> Result<Option<User>, AuthError>;
}

/// Service trait for password hashing operations
#[async_trait]
pub trait PasswordHasher: Send + Sync {
  /// Hashes a plain text password with a fresh random salt
  async fn hash(&self, password: &Password) -> Result<PasswordHash, AuthError>;

  /// Verifies a plain text password against a stored hash
  ///
  /// Returns `false` for a mismatch and for a hash that cannot be parsed.
  async fn verify(&self, password: &Password, hashed_password: &PasswordHash) -> bool;

  /// Performs a verification that always fails, at the same cost as `verify`
  /// against a hash produced by this hasher
  ///
  /// Used when no stored hash exists so that a miss takes as long as a
  /// wrong password.
  async fn dummy_verify(&self, password: &Password);
}

/// Server-side session storage keyed by a caller-scoped identifier
#[async_trait]
pub trait SessionStore: Send + Sync {
  /// Records the authenticated user for this session, replacing any previous one
  async fn set_authenticated_user(
    &self,
    session_id: &SessionId,
    user: &SessionUser,
  ) -> Result<(), AuthError>;

  /// Returns the user authenticated in this session, if any
  async fn authenticated_user(&self, session_id: &SessionId)
  -> Result<Option<SessionUser>, AuthError>;

  /// Removes the session (used by logout)
  async fn clear(&self, session_id: &SessionId) -> Result<(), AuthError>;
}
