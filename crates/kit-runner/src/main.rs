//! kitd - Kit Protocol host daemon
//!
//! Usage:
//!   kitd [--config kitd.yaml] [--log-level debug] serve --bind 127.0.0.1:5150
//!   kitd stdio
//!   kitd discover

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use kit_runner::{serve_stdio, serve_tcp, telemetry, ConfigError, KitConfig};
use parking_lot::Mutex;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "kitd", version, about = "Kit Protocol host daemon over simulated device buses")]
struct Cli {
    /// YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log filter, overrides RUST_LOG (e.g. "debug" or "kit_protocol=trace")
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve hosts over TCP, one connection at a time
    Serve {
        #[arg(short, long, default_value = "127.0.0.1:5150")]
        bind: String,
    },
    /// Serve a single host over stdin/stdout
    Stdio,
    /// Scan the configured buses and print what was found
    Discover,
}

fn init_logging(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    // stdout carries protocol responses in stdio mode
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> Result<KitConfig, ConfigError> {
    match path {
        Some(path) => {
            tracing::info!("Loading config from {}", path.display());
            KitConfig::load(path)
        }
        None => {
            tracing::info!("No config file given, no buses registered");
            Ok(KitConfig::default())
        }
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(cli.config.as_ref())?;

    if let Command::Discover = cli.command {
        let mut hal = config.build_hal();
        let mut lines: Vec<String> = Vec::new();
        hal.discover(&mut lines);
        for line in &lines {
            println!("{}", line);
        }
        tracing::info!("{} device(s) found", hal.device_count());
        return Ok(());
    }

    telemetry::describe_metrics();
    let mut interp = config.build_interpreter()?;
    interp.discover();
    tracing::info!("{} device(s) discovered at startup", interp.hal().device_count());
    let interp = Arc::new(Mutex::new(interp));

    let served = match cli.command {
        Command::Serve { bind } => {
            let listener = TcpListener::bind(&bind).await?;
            tracing::info!("Listening on {}", listener.local_addr()?);
            tokio::select! {
                result = serve_tcp(listener, interp) => result,
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Interrupted, shutting down");
                    Ok(())
                }
            }
        }
        Command::Stdio => serve_stdio(interp).await,
        Command::Discover => Ok(()),
    };
    served?;
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref());

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
