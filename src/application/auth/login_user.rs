use std::sync::Arc;

use crate::domain::auth::entities::Credentials;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::outcomes::AuthenticationOutcome;
use crate::domain::auth::services::AuthService;
use crate::domain::auth::value_objects::{Email, Password, SessionId};

/// Command for logging in a user
#[derive(Clone)]
pub struct LoginUserCommand {
  /// User's email address
  pub email: String,
  /// User's password (plain text)
  pub password: String,
}

impl std::fmt::Debug for LoginUserCommand {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("LoginUserCommand")
      .field("email", &self.email)
      .field("password", &"***")
      .finish()
  }
}

/// Use case for logging in a user
pub struct LoginUserUseCase {
  auth_service: Arc<AuthService>,
}

impl LoginUserUseCase {
  /// Creates a new instance of LoginUserUseCase
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// Executes the user login use case
  ///
  /// # Arguments
  /// * `command` - The login command containing credentials
  /// * `session_id` - Session of the calling client; receives the user on success
  ///
  /// # Errors
  /// Returns `AuthError::Validation` for malformed input and infrastructure
  /// errors from the workflow. Bad credentials are an outcome, not an error.
  pub async fn execute(
    &self,
    command: LoginUserCommand,
    session_id: &SessionId,
  ) -> Result<AuthenticationOutcome, AuthError> {
    // Parse and validate email
    let email = Email::new(command.email)?;

    // Parse and validate password
    let password = Password::new(command.password)?;

    self
      .auth_service
      .authenticate(session_id, Credentials::new(email, password))
      .await
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::application::auth::{RegisterUserCommand, RegisterUserUseCase};
  use crate::domain::auth::errors::ValidationError;
  use crate::domain::auth::ports::SessionStore;
  use crate::domain::auth::value_objects::PasswordPolicy;
  use crate::infrastructure::memory::{InMemorySessionStore, InMemoryUserRepository};
  use crate::infrastructure::security::{Argon2Params, Argon2PasswordHasher};

  async fn setup() -> (LoginUserUseCase, Arc<InMemorySessionStore>) {
    let sessions = Arc::new(InMemorySessionStore::new());
    let hasher = Arc::new(Argon2PasswordHasher::with_params(Argon2Params::fast_for_tests()).unwrap());
    let service = Arc::new(AuthService::new(
      Arc::new(InMemoryUserRepository::new()),
      hasher,
      sessions.clone(),
    ));

    RegisterUserUseCase::new(service.clone(), PasswordPolicy::default())
      .execute(RegisterUserCommand {
        name: "Alice".to_string(),
        email: "alice@example.com".to_string(),
        password: "Secret123".to_string(),
      })
      .await
      .unwrap();

    (LoginUserUseCase::new(service), sessions)
  }

  fn command(email: &str, password: &str) -> LoginUserCommand {
    LoginUserCommand {
      email: email.to_string(),
      password: password.to_string(),
    }
  }

  #[tokio::test]
  async fn test_login_normalizes_email() {
    let (use_case, sessions) = setup().await;
    let session_id = SessionId::generate();

    let outcome = use_case
      .execute(command(" Alice@Example.com", "Secret123"), &session_id)
      .await
      .unwrap();

    assert!(outcome.is_success());
    assert!(sessions.authenticated_user(&session_id).await.unwrap().is_some());
  }

  #[tokio::test]
  async fn test_short_wrong_password_is_invalid_credentials() {
    let (use_case, sessions) = setup().await;
    let session_id = SessionId::generate();

    let outcome = use_case
      .execute(command("alice@example.com", "wrong"), &session_id)
      .await
      .unwrap();

    assert!(matches!(
      outcome,
      AuthenticationOutcome::InvalidCredentials { .. }
    ));
    assert!(sessions.authenticated_user(&session_id).await.unwrap().is_none());
  }

  #[tokio::test]
  async fn test_empty_password_is_validation_error() {
    let (use_case, _sessions) = setup().await;

    let err = use_case
      .execute(command("alice@example.com", ""), &SessionId::generate())
      .await
      .unwrap_err();

    assert!(matches!(
      err,
      AuthError::Validation(ValidationError::PasswordEmpty)
    ));
  }
}
