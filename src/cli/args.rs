//! Command-line argument parsing.
//!
//! The server takes its settings from the environment; flags only select
//! what to do with them.

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Load config and keyring once, report, and exit
    Check,
    /// Run the server (default)
    Serve,
}

/// Usage text for `--help`.
pub const USAGE: &str = "\
Usage: keyserver [--check | --version | --help]

Serves SSH authorized keys at GET /keys/{hostname}.

Options:
  --check        Load the config file and keyring, print a summary, exit
  -V, --version  Print version
  -h, --help     Print this help

Environment:
  KEYSERVER_CONFIG_PATH          Host/group YAML file (default: config.yaml)
  KEYSERVER_KEYRING_PATH         Keyring directory (default: keyring)
  KEYSERVER_PORT                 Listening port (default: 8080)
  KEYSERVER_BIND                 Listening address (default: 0.0.0.0)
  KEYSERVER_KEYRING_DEBOUNCE_MS  Keyring reload quiet period (default: 1000)
  KEYSERVER_CONFIG_DEBOUNCE_MS   Config reload quiet period (default: 500)
  RUST_LOG                       Log filter (default: info)
";

/// Parse command-line arguments and return the command to run.
///
/// # Examples
///
/// ```
/// use keyserver::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["keyserver".to_string(), "--check".to_string()];
/// assert_eq!(parse_args(args.into_iter()), CliCommand::Check);
/// ```
pub fn parse_args<I>(args: I) -> CliCommand
where
    I: Iterator<Item = String>,
{
    for arg in args.skip(1) {
        match arg.as_str() {
            "--version" | "-V" => return CliCommand::Version,
            "--help" | "-h" => return CliCommand::Help,
            "--check" => return CliCommand::Check,
            _ => {}
        }
    }
    CliCommand::Serve
}
