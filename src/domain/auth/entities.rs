use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::value_objects::{Email, NewPassword, Password, PasswordHash, UserId, UserName};

/// User entity as held by the repository
#[derive(Debug, Clone)]
pub struct User {
  /// Unique identifier, assigned by storage
  pub id: UserId,
  /// Display name
  pub name: UserName,
  /// User's email address (unique)
  pub email: Email,
  /// Argon2 hash of the password
  pub password_hash: PasswordHash,
  /// Timestamp when the user was created
  pub created_at: DateTime<Utc>,
}

impl User {
  /// Creates a user from stored fields (for reconstruction)
  pub fn from_db(
    id: UserId,
    name: UserName,
    email: Email,
    password_hash: PasswordHash,
    created_at: DateTime<Utc>,
  ) -> Self {
    Self {
      id,
      name,
      email,
      password_hash,
      created_at,
    }
  }

  /// Identity written into the session after a successful login
  pub fn session_user(&self) -> SessionUser {
    SessionUser {
      user_id: self.id,
      name: self.name.clone(),
    }
  }
}

/// Registration intent: validated input for a new account
///
/// Consumed once by the registration workflow, which replaces the password
/// with its hash before anything is stored.
#[derive(Debug)]
pub struct NewUser {
  pub name: UserName,
  pub email: Email,
  pub password: NewPassword,
}

impl NewUser {
  pub fn new(name: UserName, email: Email, password: NewPassword) -> Self {
    Self {
      name,
      email,
      password,
    }
  }

  /// Swaps the plain password for its hash, producing the record to insert
  pub fn into_record(self, password_hash: PasswordHash) -> NewUserRecord {
    NewUserRecord {
      name: self.name,
      email: self.email,
      password_hash,
    }
  }
}

/// A new user ready for insertion
#[derive(Debug, Clone)]
pub struct NewUserRecord {
  pub name: UserName,
  pub email: Email,
  pub password_hash: PasswordHash,
}

/// Login intent: email and password as typed
#[derive(Debug)]
pub struct Credentials {
  pub email: Email,
  pub password: Password,
}

impl Credentials {
  pub fn new(email: Email, password: Password) -> Self {
    Self { email, password }
  }
}

/// Authenticated identity kept in the session store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
  pub user_id: UserId,
  pub name: UserName,
}
