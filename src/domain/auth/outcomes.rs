use super::entities::User;
use super::value_objects::UserId;

pub const REGISTERED_MESSAGE: &str = "Registration completed";
pub const ALREADY_EXISTS_MESSAGE: &str = "This email address is already registered";
pub const AUTHENTICATED_MESSAGE: &str = "Logged in";
/// Shared by the unknown-email and wrong-password cases
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Incorrect email address or password";

/// Result of a registration attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationOutcome {
  /// The account was created
  Registered { user_id: UserId, message: String },
  /// An account with this email already exists; nothing was written
  AlreadyExists { message: String },
}

impl RegistrationOutcome {
  pub(crate) fn registered(user_id: UserId) -> Self {
    Self::Registered {
      user_id,
      message: REGISTERED_MESSAGE.to_string(),
    }
  }

  pub(crate) fn already_exists() -> Self {
    Self::AlreadyExists {
      message: ALREADY_EXISTS_MESSAGE.to_string(),
    }
  }

  /// User-facing message for this outcome
  pub fn message(&self) -> &str {
    match self {
      Self::Registered { message, .. } | Self::AlreadyExists { message } => message,
    }
  }

  pub fn is_success(&self) -> bool {
    matches!(self, Self::Registered { .. })
  }
}

/// Result of a login attempt
#[derive(Debug, Clone)]
pub enum AuthenticationOutcome {
  /// Credentials matched and the session now holds the user
  Authenticated { user: User, message: String },
  /// Unknown email or wrong password, deliberately indistinguishable
  InvalidCredentials { message: String },
}

impl AuthenticationOutcome {
  pub(crate) fn authenticated(user: User) -> Self {
    Self::Authenticated {
      user,
      message: AUTHENTICATED_MESSAGE.to_string(),
    }
  }

  pub(crate) fn invalid_credentials() -> Self {
    Self::InvalidCredentials {
      message: INVALID_CREDENTIALS_MESSAGE.to_string(),
    }
  }

  /// User-facing message for this outcome
  pub fn message(&self) -> &str {
    match self {
      Self::Authenticated { message, .. } | Self::InvalidCredentials { message } => message,
    }
  }

  pub fn is_success(&self) -> bool {
    matches!(self, Self::Authenticated { .. })
  }

  /// The authenticated user, if any
  pub fn user(&self) -> Option<&User> {
    match self {
      Self::Authenticated { user, .. } => Some(user),
      Self::InvalidCredentials { .. } => None,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_registration_outcome_messages() {
    let registered = RegistrationOutcome::registered(UserId::new());
    assert!(registered.is_success());
    assert_eq!(registered.message(), REGISTERED_MESSAGE);

    let exists = RegistrationOutcome::already_exists();
    assert!(!exists.is_success());
    assert_eq!(exists.message(), ALREADY_EXISTS_MESSAGE);
  }

  #[test]
  fn test_invalid_credentials_outcome() {
    let outcome = AuthenticationOutcome::invalid_credentials();
    assert!(!outcome.is_success());
    assert!(outcome.user().is_none());
    assert_eq!(outcome.message(), INVALID_CREDENTIALS_MESSAGE);
  }
}
