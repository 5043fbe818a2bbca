//! `--version`.

/// Crate version baked in at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Line printed by `--version`.
pub fn version_line() -> String {
    format!("keyserver {}", VERSION)
}

/// Print the version line and exit 0. Runs before logging is set up.
pub fn handle_version_command() -> ! {
    println!("{}", version_line());
    std::process::exit(0)
}
