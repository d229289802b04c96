use argon2::password_hash::SaltString;
use argon2::{
  Algorithm, Argon2, Params, Version,
  password_hash::{
    PasswordHash as Argon2PasswordHash, PasswordHasher as Argon2PasswordHasherTrait,
    PasswordVerifier,
  },
};
use async_trait::async_trait;
use rand::rngs::OsRng;

use crate::domain::auth::errors::{AuthError, HashError};
use crate::domain::auth::ports::PasswordHasher;
use crate::domain::auth::value_objects::{Password, PasswordHash};

/// Cost parameters for Argon2id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Argon2Params {
  /// Memory cost in KiB
  pub memory_kib: u32,
  /// Number of iterations
  pub iterations: u32,
  /// Degree of parallelism
  pub parallelism: u32,
}

impl Argon2Params {
  /// Cheapest parameters argon2 accepts
  ///
  /// Offers no real protection; meant for test suites of crates that wire
  /// `authgate` in.
  pub fn fast_for_tests() -> Self {
    Self {
      memory_kib: 8,
      iterations: 1,
      parallelism: 1,
    }
  }
}

impl Default for Argon2Params {
  /// 19 MiB, 2 iterations, 1 lane
  fn default() -> Self {
    Self {
      memory_kib: 19456,
      iterations: 2,
      parallelism: 1,
    }
  }
}

/// Argon2id password hasher implementation
///
/// Hashing and verification are CPU-bound and deliberately slow, so both run
/// on the blocking thread pool rather than on the async executor.
pub struct Argon2PasswordHasher {
  argon2: Argon2<'static>,
  /// Hash of a random throwaway secret, made with this hasher's own params
  decoy_hash: PasswordHash,
}

impl Argon2PasswordHasher {
  /// Creates a hasher with the default cost parameters
  pub fn new() -> Result<Self, AuthError> {
    Self::with_params(Argon2Params::default())
  }

  /// Creates a hasher with custom cost parameters
  pub fn with_params(params: Argon2Params) -> Result<Self, AuthError> {
    // Output length: 32 bytes
    let params = Params::new(
      params.memory_kib,
      params.iterations,
      params.parallelism,
      Some(32),
    )
    .map_err(|e| {
      AuthError::Hash(HashError::HashingFailed(format!(
        "Failed to create Argon2 params: {}",
        e
      )))
    })?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
    let decoy_hash = Self::make_decoy_hash(&argon2)?;

    Ok(Self { argon2, decoy_hash })
  }

  fn make_decoy_hash(argon2: &Argon2<'static>) -> Result<PasswordHash, AuthError> {
    let secret = SaltString::generate(&mut OsRng);
    let salt = SaltString::generate(&mut OsRng);

    let hash = argon2
      .hash_password(secret.as_str().as_bytes(), &salt)
      .map_err(HashError::from)?
      .to_string();

    PasswordHash::from_hash(hash).map_err(|_| AuthError::Hash(HashError::InvalidFormat))
  }
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
  /// Hashes a plain text password using Argon2id
  ///
  /// A fresh random salt is generated for every call, so hashing the same
  /// password twice yields different PHC strings.
  async fn hash(&self, password: &Password) -> Result<PasswordHash, AuthError> {
    let argon2 = self.argon2.clone();
    let password = password.clone();

    let hash = tokio::task::spawn_blocking(move || {
      let salt = SaltString::generate(&mut OsRng);
      argon2
        .hash_password(password.as_str().as_bytes(), &salt)
        .map(|hash| hash.to_string())
    })
    .await
    .map_err(|e| HashError::HashingFailed(format!("Hashing task failed: {}", e)))?
    .map_err(HashError::from)?;

    PasswordHash::from_hash(hash).map_err(|_| AuthError::Hash(HashError::InvalidFormat))
  }

  /// Verifies a plain text password against a hashed password
  ///
  /// The salt and cost parameters are read from the stored hash, and the
  /// comparison inside `verify_password` is constant-time.
  async fn verify(&self, password: &Password, hashed_password: &PasswordHash) -> bool {
    let argon2 = self.argon2.clone();
    let password = password.clone();
    let stored = hashed_password.as_str().to_string();

    let result = tokio::task::spawn_blocking(move || {
      let parsed_hash = match Argon2PasswordHash::new(&stored) {
        Ok(parsed) => parsed,
        Err(e) => {
          tracing::warn!(error = %e, "Stored password hash could not be parsed");
          return false;
        }
      };

      argon2
        .verify_password(password.as_str().as_bytes(), &parsed_hash)
        .is_ok()
    })
    .await;

    match result {
      Ok(is_valid) => is_valid,
      Err(e) => {
        tracing::error!(error = %e, "Password verification task failed");
        false
      }
    }
  }

  async fn dummy_verify(&self, password: &Password) {
    self.verify(password, &self.decoy_hash).await;
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn hasher() -> Argon2PasswordHasher {
    Argon2PasswordHasher::with_params(Argon2Params::fast_for_tests()).unwrap()
  }

  #[tokio::test]
  async fn test_hash_password() {
    let password = Password::new("Secret123").unwrap();

    let hash = hasher().hash(&password).await.unwrap();

    assert!(hash.as_str().starts_with("$argon2id$"));
    assert!(!hash.as_str().contains("Secret123"));
  }

  #[tokio::test]
  async fn test_verify_round_trip() {
    let hasher = hasher();
    let passwords = ["Secret123", "correct horse battery staple", "пароль-Ω-1"];

    for raw in passwords {
      let password = Password::new(raw).unwrap();
      let hash = hasher.hash(&password).await.unwrap();
      assert!(hasher.verify(&password, &hash).await, "{raw} should verify");
    }
  }

  #[tokio::test]
  async fn test_verify_incorrect_password() {
    let hasher = hasher();
    let password = Password::new("Secret123").unwrap();
    let wrong_password = Password::new("Secret124").unwrap();

    let hash = hasher.hash(&password).await.unwrap();

    assert!(!hasher.verify(&wrong_password, &hash).await);
  }

  #[tokio::test]
  async fn test_hash_produces_different_salts() {
    let hasher = hasher();
    let password = Password::new("Secret123").unwrap();

    let hash1 = hasher.hash(&password).await.unwrap();
    let hash2 = hasher.hash(&password).await.unwrap();

    // Same password should produce different hashes due to random salt
    assert_ne!(hash1.as_str(), hash2.as_str());

    // Both should verify correctly
    assert!(hasher.verify(&password, &hash1).await);
    assert!(hasher.verify(&password, &hash2).await);
  }

  #[tokio::test]
  async fn test_verify_uses_parameters_from_stored_hash() {
    let password = Password::new("Secret123").unwrap();
    let hash = hasher().hash(&password).await.unwrap();

    // A hasher configured differently must still verify existing hashes
    let other = Argon2PasswordHasher::with_params(Argon2Params {
      memory_kib: 16,
      iterations: 2,
      parallelism: 1,
    })
    .unwrap();

    assert!(other.verify(&password, &hash).await);
  }

  #[test]
  fn test_argon2_parameters() {
    let hasher = Argon2PasswordHasher::new().unwrap();
    let params = hasher.argon2.params();

    assert_eq!(params.m_cost(), 19456);
    assert_eq!(params.t_cost(), 2);
    assert_eq!(params.p_cost(), 1);
  }

  #[tokio::test]
  async fn test_decoy_hash_matches_configured_cost() {
    let hasher = Argon2PasswordHasher::with_params(Argon2Params {
      memory_kib: 64,
      iterations: 3,
      parallelism: 1,
    })
    .unwrap();
    let password = Password::new("Secret123").unwrap();
    let real_hash = hasher.hash(&password).await.unwrap();

    let cost = |hash: &str| hash.split('$').nth(3).map(str::to_string);

    assert_eq!(cost(hasher.decoy_hash.as_str()).as_deref(), Some("m=64,t=3,p=1"));
    assert_eq!(cost(hasher.decoy_hash.as_str()), cost(real_hash.as_str()));
  }

  #[tokio::test]
  async fn test_decoy_hash_rejects_any_password() {
    let hasher = hasher();
    let password = Password::new("Secret123").unwrap();

    assert!(!hasher.verify(&password, &hasher.decoy_hash).await);
    hasher.dummy_verify(&password).await;
  }

  #[test]
  fn test_invalid_parameters_are_rejected() {
    let result = Argon2PasswordHasher::with_params(Argon2Params {
      memory_kib: 1,
      iterations: 0,
      parallelism: 1,
    });

    assert!(matches!(result, Err(AuthError::Hash(HashError::HashingFailed(_)))));
  }
}
