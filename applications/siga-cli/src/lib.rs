//! SIGA console
//!
//! Library half of the `siga` binary: configuration, wiring, and command
//! handlers, kept here so they can be tested without spawning a process.

pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod render;

pub use app::App;
pub use cli::{Cli, Commands};
pub use config::SigaConfig;
pub use error::CliError;
