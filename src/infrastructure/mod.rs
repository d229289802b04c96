pub mod bootstrap;
pub mod config;
pub mod memory;
pub mod persistence;
pub mod security;
pub mod telemetry;
