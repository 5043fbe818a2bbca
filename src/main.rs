use color_eyre::Result;
use keyserver::cli::{handle_version_command, parse_args, run_cli_command, CliCommand};
use keyserver::server;
use keyserver::startup::{shutdown_signal, Keyserver, ServerConfig};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let command = parse_args(std::env::args());

    // Handle --version before any initialization
    if command == CliCommand::Version {
        handle_version_command();
    }

    color_eyre::install()?;
    init_tracing();

    let settings = ServerConfig::from_env()?;
    if let Some(result) = run_cli_command(command, &settings) {
        return result;
    }

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(run(settings))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(settings: ServerConfig) -> Result<()> {
    tracing::info!(
        config = %settings.config_path.display(),
        keyring = %settings.keyring_path.display(),
        "Starting key server"
    );

    // Watchers live as long as `keyserver` does.
    let keyserver = Keyserver::start(&settings)?;
    let listener = server::bind(settings.listen_addr()).await?;

    server::serve(listener, keyserver.resolver(), shutdown_signal()).await?;

    drop(keyserver);
    tracing::info!("Key server stopped");
    Ok(())
}
