//! Hotcool CLI
//!
//! Command-line interface for Hot+Cool fan heaters, working on the device's
//! last reported status snapshot.

use anyhow::Result;
use clap::Parser;
use hotcool_core::{resolve_config_path, StaticConfig, CONFIG_ENV_VAR};
use hotcoolctl::cli::{
    generate_completion, handle_config, handle_entities, handle_heat, handle_number,
    handle_oscillation, handle_status, Cli, Commands,
};
use hotcoolctl::session::Session;
use tracing::{debug, error};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let env_config = std::env::var(CONFIG_ENV_VAR).ok();
    let config_path = resolve_config_path(cli.config.as_deref(), env_config.as_deref());
    debug!("Configuration file: {}", config_path.display());

    let config = match StaticConfig::load(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let command = match cli.command {
        Commands::Config { command } => {
            return handle_config(command, &config, &config_path, &cli.format);
        }
        Commands::Completion { shell } => {
            generate_completion(shell);
            return Ok(());
        }
        command => command,
    };

    let session = match Session::open(&config, cli.device.as_deref(), cli.status.as_deref()) {
        Ok(session) => session,
        Err(e) => {
            error!("Cannot open device: {:#}", e);
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };

    let result = match command {
        Commands::Status => handle_status(&session, &cli.format),
        Commands::Oscillation { command } => handle_oscillation(&session, command, &cli.format),
        Commands::Heat { command } => handle_heat(&session, command, &cli.format),
        Commands::Entities => handle_entities(&session, &cli.format).await,
        Commands::Number { command } => handle_number(&session, command, &cli.format).await,
        Commands::Config { .. } | Commands::Completion { .. } => Ok(()),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        if cli.verbose {
            eprintln!("Error details: {:?}", e);
        }
        std::process::exit(1);
    }

    if cli.write_back && !session.sent_commands().is_empty() {
        session.write_back()?;
    }

    Ok(())
}

/// Initialize tracing subscriber for logging
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
