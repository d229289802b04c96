use std::sync::Arc;

use crate::domain::auth::entities::NewUser;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::outcomes::RegistrationOutcome;
use crate::domain::auth::services::AuthService;
use crate::domain::auth::value_objects::{Email, NewPassword, PasswordPolicy, UserName};

/// Command for registering a new user
#[derive(Clone)]
pub struct RegisterUserCommand {
  /// Display name
  pub name: String,
  /// User's email address
  pub email: String,
  /// User's password (plain text, will be hashed)
  pub password: String,
}

impl std::fmt::Debug for RegisterUserCommand {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("RegisterUserCommand")
      .field("name", &self.name)
      .field("email", &self.email)
      .field("password", &"***")
      .finish()
  }
}

/// Use case for registering a new user
pub struct RegisterUserUseCase {
  auth_service: Arc<AuthService>,
  password_policy: PasswordPolicy,
}

impl RegisterUserUseCase {
  /// Creates a new instance of RegisterUserUseCase
  pub fn new(auth_service: Arc<AuthService>, password_policy: PasswordPolicy) -> Self {
    Self {
      auth_service,
      password_policy,
    }
  }

  /// Executes the user registration use case
  ///
  /// # Returns
  /// `Registered` or `AlreadyExists`
  ///
  /// # Errors
  /// Returns `AuthError::Validation` for malformed input, before any lookup
  /// happens, and infrastructure errors from the workflow.
  pub async fn execute(&self, command: RegisterUserCommand) -> Result<RegistrationOutcome, AuthError> {
    let name = UserName::new(command.name)?;
    let email = Email::new(command.email)?;
    let password = NewPassword::with_policy(command.password, &self.password_policy)?;

    self
      .auth_service
      .register(NewUser::new(name, email, password))
      .await
  }
}
