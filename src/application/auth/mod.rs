//! Authentication use cases
//!
//! This module contains the use cases that turn raw caller input into
//! validated intent objects and hand them to the domain workflows.

mod login_user;
mod register_user;

pub use login_user::{LoginUserCommand, LoginUserUseCase};
pub use register_user::{RegisterUserCommand, RegisterUserUseCase};
