//! Command-line interface and orchestration for npm-rank
//!
//! This module implements the CLI commands and wires the registry collaborators,
//! the ranking pipeline, and the report generators together.
//!
//! # Commands
//!
//! - **user**: Rank every package maintained by an npm user
//! - **packages**: Rank an explicit list of packages
//! - **init**: Generate a default configuration file
//! - **validate**: Check a configuration file
//!
//! ## Execution Flow
//!
//! The `run` function parses command-line arguments using clap and routes
//! to the appropriate command handler. The ranking commands follow the same steps:
//!
//! 1. Set up logging, load configuration, and compute the reference date
//! 2. Build HTTP collaborators and a ranker from the configuration
//! 3. Rank the packages for the chosen window
//! 4. Write the console table and any requested CSV or JSON report
//!
//! A failing ranking command writes its error with the full context chain to the
//! host's error stream and exits with status 1.
//!
//! Configuration is a TOML file (`npm-rank.toml`) naming the registry and downloads
//! hosts along with request limits.

mod common;
mod config;
mod host;
mod init;
mod packages;
mod progress_reporter;
mod run;
mod user;
mod validate;

#[cfg(debug_assertions)]
pub use config::Config;

pub use host::Host;
pub use init::{InitArgs, init_config};
pub use packages::{PackagesArgs, process_packages};
pub use progress_reporter::ProgressReporter;
pub use run::run;
pub use user::{UserArgs, process_user};
pub use validate::{ValidateArgs, validate_config};
