use std::sync::Arc;

use super::entities::{Credentials, NewUser};
use super::errors::{AuthError, PersistenceError};
use super::outcomes::{AuthenticationOutcome, RegistrationOutcome};
use super::ports::{PasswordHasher, SessionStore, UserRepository};
use super::value_objects::SessionId;

/// Authentication service implementing core business logic
pub struct AuthService {
  user_repo: Arc<dyn UserRepository>,
  password_hasher: Arc<dyn PasswordHasher>,
  session_store: Arc<dyn SessionStore>,
}

impl AuthService {
  /// Creates a new instance of AuthService
  pub fn new(
    user_repo: Arc<dyn UserRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
    session_store: Arc<dyn SessionStore>,
  ) -> Self {
    Self {
      user_repo,
      password_hasher,
      session_store,
    }
  }

  /// Registers a new user
  ///
  /// The email lookup is only a fast path: a concurrent registration that
  /// wins the race is caught by the storage unique constraint and reported
  /// the same way.
  ///
  /// # Errors
  /// Returns `AuthError` only for infrastructure failures (storage, hashing).
  /// A duplicate email is an `AlreadyExists` outcome, not an error.
  pub async fn register(&self, new_user: NewUser) -> Result<RegistrationOutcome, AuthError> {
    let email = new_user.email.clone();

    if self.user_repo.find_by_email(&email).await?.is_some() {
      tracing::info!(email = %email, "Registration rejected, email already registered");
      return Ok(RegistrationOutcome::already_exists());
    }

    let password_hash = self
      .password_hasher
      .hash(new_user.password.as_password())
      .await?;

    match self.user_repo.create(new_user.into_record(password_hash)).await {
      Ok(user) => {
        tracing::info!(user_id = %user.id, email = %email, "User registered");
        Ok(RegistrationOutcome::registered(user.id))
      }
      Err(AuthError::Persistence(PersistenceError::DuplicateKey(_))) => {
        tracing::warn!(email = %email, "Registration lost a race on a duplicate email");
        Ok(RegistrationOutcome::already_exists())
      }
      Err(e) => {
        tracing::error!(email = %email, error = %e, "Failed to store new user");
        Err(e)
      }
    }
  }

  /// Verifies credentials and records the user in the caller's session
  ///
  /// An unknown email and a wrong password produce the same outcome and
  /// message, and no session is written in either case.
  ///
  /// # Errors
  /// Returns `AuthError` only for storage or session store failures.
  pub async fn authenticate(
    &self,
    session_id: &SessionId,
    credentials: Credentials,
  ) -> Result<AuthenticationOutcome, AuthError> {
    let Some(user) = self.user_repo.find_by_email(&credentials.email).await? else {
      self.password_hasher.dummy_verify(&credentials.password).await;
      tracing::info!(email = %credentials.email, "Login failed");
      return Ok(AuthenticationOutcome::invalid_credentials());
    };

    let is_valid = self
      .password_hasher
      .verify(&credentials.password, &user.password_hash)
      .await;

    if !is_valid {
      tracing::info!(email = %credentials.email, "Login failed");
      return Ok(AuthenticationOutcome::invalid_credentials());
    }

    self
      .session_store
      .set_authenticated_user(session_id, &user.session_user())
      .await?;

    tracing::info!(user_id = %user.id, "User logged in");
    Ok(AuthenticationOutcome::authenticated(user))
  }
}
