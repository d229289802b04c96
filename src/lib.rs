//! User registration and password authentication.
//!
//! The crate is layered the usual hexagonal way:
//! - [`domain`] holds value objects, the `AuthService` workflows and the ports
//!   they depend on (user repository, password hasher, session store);
//! - [`application`] parses raw caller input into validated commands;
//! - [`infrastructure`] provides Argon2, PostgreSQL, Redis and in-memory
//!   adapters together with configuration and wiring.

pub mod application;
pub mod domain;
pub mod infrastructure;
