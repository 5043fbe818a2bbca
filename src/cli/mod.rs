//! CLI module.
//!
//! # Usage
//!
//! The CLI dispatcher is called early in main() to handle flags before the
//! server starts:
//!
//! ```ignore
//! use keyserver::cli::{parse_args, run_cli_command};
//!
//! let command = parse_args(std::env::args());
//! if let Some(result) = run_cli_command(command, &settings) {
//!     // A one-shot command ran, exit with its result
//! }
//! // No CLI command, start serving
//! ```

pub mod args;
pub mod check;
pub mod version;

pub use args::{parse_args, CliCommand, USAGE};
pub use check::handle_check_command;
pub use version::{handle_version_command, version_line, VERSION};

use color_eyre::Result;

use crate::startup::ServerConfig;

/// Run a one-shot CLI command if applicable.
///
/// Returns `None` for `Serve`.
pub fn run_cli_command(command: CliCommand, settings: &ServerConfig) -> Option<Result<()>> {
    match command {
        CliCommand::Version => handle_version_command(),
        CliCommand::Help => {
            print!("{}", USAGE);
            Some(Ok(()))
        }
        CliCommand::Check => Some(handle_check_command(settings)),
        CliCommand::Serve => None,
    }
}
