//! The main implementation crate for the agent launcher.

mod command;
pub mod env;
pub mod error;
pub mod launch;
pub mod log;
pub mod signal;
pub mod style;
