//! Salon Admin - command-line back office for the salon website

pub mod cli;
pub mod commands;
pub mod render;
pub mod session;

pub use cli::{Cli, Command};
pub use session::{SessionFile, SessionFileError};
