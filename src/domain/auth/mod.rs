pub mod entities;
pub mod errors;
pub mod outcomes;
pub mod ports;
pub mod services;
pub mod value_objects;

// Re-export commonly used types
pub use entities::{Credentials, NewUser, NewUserRecord, SessionUser, User};
pub use errors::{AuthError, HashError, PersistenceError, ValidationError};
pub use outcomes::{AuthenticationOutcome, RegistrationOutcome};
pub use ports::{PasswordHasher, SessionStore, UserRepository};
pub use services::AuthService;
pub use value_objects::{
  Email, NewPassword, Password, PasswordHash, PasswordPolicy, SessionId, UserId, UserName,
};
