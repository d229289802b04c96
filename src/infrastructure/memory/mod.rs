//! In-process adapters for the authentication ports
//!
//! Used by tests and when no database or Redis is configured.

pub mod session_store;
pub mod user_repository;

pub use session_store::InMemorySessionStore;
pub use user_repository::InMemoryUserRepository;
