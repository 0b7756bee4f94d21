#![forbid(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod page;
pub mod screen;
pub mod terminal;

pub use cli::run_from_env;
pub use error::{CliError, Result};
