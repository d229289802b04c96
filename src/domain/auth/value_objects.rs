use argon2::PasswordHash as Argon2PasswordHash;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;
use validator::ValidateEmail;
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::errors::ValidationError;

// ============================================================================
// Email Value Object
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
  const MAX_LENGTH: usize = 254;

  /// Creates a new Email after validation
  pub fn new(email: impl Into<String>) -> Result<Self, ValidationError> {
    // Lowercasing can grow some characters, so the limit applies afterwards
    let email: String = email.into();
    let email = email.trim().to_lowercase();

    if email.len() > Self::MAX_LENGTH {
      return Err(ValidationError::EmailTooLong {
        max: Self::MAX_LENGTH,
      });
    }

    if !email.validate_email() {
      return Err(ValidationError::InvalidEmail);
    }

    Ok(Self(email))
  }

  /// Returns the email as a string slice
  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// Consumes self and returns the inner String
  pub fn into_inner(self) -> String {
    self.0
  }
}

impl fmt::Display for Email {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl AsRef<str> for Email {
  fn as_ref(&self) -> &str {
    &self.0
  }
}

impl TryFrom<String> for Email {
  type Error = ValidationError;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    Self::new(value)
  }
}

impl From<Email> for String {
  fn from(email: Email) -> Self {
    email.0
  }
}

// ============================================================================
// UserName Value Object
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserName(String);

impl UserName {
  const MAX_LENGTH: usize = 50;

  /// Creates a new display name, trimmed and checked for length
  pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
    let name = name.into();
    let name = name.trim();

    if name.is_empty() {
      return Err(ValidationError::NameEmpty);
    }

    if name.chars().count() > Self::MAX_LENGTH {
      return Err(ValidationError::NameTooLong {
        max: Self::MAX_LENGTH,
      });
    }

    if name.chars().any(char::is_control) {
      return Err(ValidationError::NameInvalidCharacters);
    }

    Ok(Self(name.to_string()))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

impl fmt::Display for UserName {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl TryFrom<String> for UserName {
  type Error = ValidationError;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    Self::new(value)
  }
}

impl From<UserName> for String {
  fn from(name: UserName) -> Self {
    name.0
  }
}

// ============================================================================
// Password Value Object (Plain Password - Never Stored)
// ============================================================================

/// Plain text password as typed by the user
///
/// Only presence and an upper bound are enforced here, so a login attempt
/// with a short or simple password still reaches verification. The memory is
/// zeroized when the value is dropped.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Password(String);

impl Password {
  pub const MAX_LENGTH: usize = 128;

  /// Creates a new Password after validation
  pub fn new(password: impl Into<String>) -> Result<Self, ValidationError> {
    // Wrap first so rejected input is zeroized on drop as well
    let password = Self(password.into());

    if password.0.is_empty() {
      return Err(ValidationError::PasswordEmpty);
    }

    if password.0.len() > Self::MAX_LENGTH {
      return Err(ValidationError::PasswordTooLong {
        max: Self::MAX_LENGTH,
      });
    }

    Ok(password)
  }

  /// Returns the password as a string slice (use with caution)
  pub fn as_str(&self) -> &str {
    &self.0
  }
}

// Implement Debug without exposing the password
impl fmt::Debug for Password {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("Password(***)")
  }
}

// Implement Display without exposing the password
impl fmt::Display for Password {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("***")
  }
}

// ============================================================================
// Password Policy
// ============================================================================

/// Strength rules applied to passwords chosen at registration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordPolicy {
  pub min_length: usize,
  pub max_length: usize,
  pub require_uppercase: bool,
  pub require_lowercase: bool,
  pub require_digit: bool,
}

impl PasswordPolicy {
  pub const DEFAULT_MIN_LENGTH: usize = 8;

  /// Default policy with a custom minimum length
  pub fn with_min_length(min_length: usize) -> Self {
    Self {
      min_length,
      ..Self::default()
    }
  }

  /// Checks a candidate password against this policy
  pub fn check(&self, password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < self.min_length {
      return Err(ValidationError::PasswordTooShort {
        min: self.min_length,
      });
    }

    if password.len() > self.max_length {
      return Err(ValidationError::PasswordTooLong {
        max: self.max_length,
      });
    }

    if self.require_uppercase && !password.chars().any(char::is_uppercase) {
      return Err(ValidationError::PasswordMissingUppercase);
    }

    if self.require_lowercase && !password.chars().any(char::is_lowercase) {
      return Err(ValidationError::PasswordMissingLowercase);
    }

    if self.require_digit && !password.chars().any(|c| c.is_ascii_digit()) {
      return Err(ValidationError::PasswordMissingDigit);
    }

    Ok(())
  }
}

impl Default for PasswordPolicy {
  fn default() -> Self {
    Self {
      min_length: Self::DEFAULT_MIN_LENGTH,
      max_length: Password::MAX_LENGTH,
      require_uppercase: true,
      require_lowercase: true,
      require_digit: true,
    }
  }
}

// ============================================================================
// NewPassword Value Object (Password chosen at registration)
// ============================================================================

/// A password that satisfied the registration policy
#[derive(Clone)]
pub struct NewPassword(Password);

impl NewPassword {
  /// Creates a new password checked against the default policy
  pub fn new(password: impl Into<String>) -> Result<Self, ValidationError> {
    Self::with_policy(password, &PasswordPolicy::default())
  }

  /// Creates a new password checked against the given policy
  pub fn with_policy(
    password: impl Into<String>,
    policy: &PasswordPolicy,
  ) -> Result<Self, ValidationError> {
    let password = Password::new(password)?;
    policy.check(password.as_str())?;
    Ok(Self(password))
  }

  pub fn as_password(&self) -> &Password {
    &self.0
  }
}

impl fmt::Debug for NewPassword {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("NewPassword(***)")
  }
}

// ============================================================================
// PasswordHash Value Object (Argon2id Hash)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
  /// Creates a new PasswordHash from an existing PHC hash string
  pub fn from_hash(hash: impl Into<String>) -> Result<Self, ValidationError> {
    let hash = hash.into();

    // Validate it's a proper PHC string
    Argon2PasswordHash::new(&hash).map_err(|_| ValidationError::InvalidPasswordHash)?;

    Ok(Self(hash))
  }

  /// Returns the hash as a string slice
  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// Consumes self and returns the inner String
  pub fn into_inner(self) -> String {
    self.0
  }
}

impl fmt::Display for PasswordHash {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

// ============================================================================
// UserId Value Object
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
  /// Creates a new random UserId
  pub fn new() -> Self {
    Self(Uuid::new_v4())
  }

  /// Creates a UserId from an existing UUID
  pub fn from_uuid(uuid: Uuid) -> Self {
    Self(uuid)
  }
}

impl Default for UserId {
  fn default() -> Self {
    Self::new()
  }
}

impl fmt::Display for UserId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl From<Uuid> for UserId {
  fn from(uuid: Uuid) -> Self {
    Self(uuid)
  }
}

impl From<UserId> for Uuid {
  fn from(user_id: UserId) -> Self {
    user_id.0
  }
}

// ============================================================================
// SessionId Value Object
// ============================================================================

/// Caller-scoped key of a server-side session, e.g. a cookie value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
  const MAX_LENGTH: usize = 128;

  /// Wraps an identifier received from the caller
  pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
    let id = id.into();

    let well_formed = !id.is_empty()
      && id.len() <= Self::MAX_LENGTH
      && id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if !well_formed {
      return Err(ValidationError::InvalidSessionId);
    }

    Ok(Self(id))
  }

  /// Generates a fresh random identifier
  pub fn generate() -> Self {
    Self(Uuid::new_v4().simple().to_string())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for SessionId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}
