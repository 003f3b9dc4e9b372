use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use crs_engine::api::{AppState, ProfileRequest, create_router};
use crs_engine::calculation::score;
use crs_engine::config::ConfigLoader;
use crs_engine::error::EngineError;
use crs_engine::models::{CandidateProfile, CutoffScores};
use crs_engine::telemetry;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(
    name = "crs-engine",
    about = "Score Express Entry profiles and evaluate program eligibility",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service
    Serve(ServeArgs),
    /// Score a single profile and print the result as JSON
    Score(ScoreArgs),
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// Directory holding the scoring tables; the built-in tables are used when omitted
    #[arg(long, env = "CRS_CONFIG_DIR")]
    config_dir: Option<PathBuf>,
    /// Cutoff draw history overriding the one in the configuration directory
    #[arg(long, env = "CRS_CUTOFFS")]
    cutoffs: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ServeArgs {
    #[command(flatten)]
    source: SourceArgs,
    /// Host to bind the HTTP server to
    #[arg(long, env = "CRS_HOST", default_value = "127.0.0.1")]
    host: String,
    /// Port to bind the HTTP server to
    #[arg(long, env = "CRS_PORT", default_value_t = 3000)]
    port: u16,
    /// Log level or filter directive; RUST_LOG takes precedence
    #[arg(long, env = "CRS_LOG_LEVEL", default_value = "info")]
    log_level: String,
}

#[derive(Args, Debug)]
struct ScoreArgs {
    #[command(flatten)]
    source: SourceArgs,
    /// Path to a JSON profile
    #[arg(long)]
    profile: PathBuf,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error(transparent)]
    Telemetry(#[from] telemetry::TelemetryError),
    #[error("failed to read profile '{path}': {source}")]
    Profile {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid profile '{path}': {source}")]
    ProfileJson {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid listen address '{0}'")]
    Address(String),
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
    #[error("failed to serialize result: {0}")]
    Output(serde_json::Error),
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve(args) => serve(args).await,
        Command::Score(args) => score_profile(args),
    }
}

async fn serve(args: ServeArgs) -> Result<(), CliError> {
    telemetry::init(&args.log_level)?;

    let state = match load(&args.source) {
        Ok(loader) => {
            info!(
                version = %loader.config().metadata().version,
                cutoffs = loader.cutoffs().len(),
                "Loaded scoring configuration"
            );
            AppState::from_loader(loader)
        }
        Err(err) => {
            warn!(error = %err, "No session configuration; requests must carry a snapshot");
            let cutoffs = match args.source.cutoffs.as_deref().map(ConfigLoader::load_cutoffs) {
                Some(Ok(cutoffs)) => cutoffs,
                Some(Err(err)) => {
                    warn!(error = %err, "Failed to load cutoffs; all cutoffs unknown");
                    CutoffScores::new()
                }
                None => CutoffScores::new(),
            };
            AppState::without_config(cutoffs)
        }
    };

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .map_err(|_| CliError::Address(format!("{}:{}", args.host, args.port)))?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "Listening");
    axum::serve(listener, create_router(state)).await?;

    Ok(())
}

fn score_profile(args: ScoreArgs) -> Result<(), CliError> {
    let loader = load(&args.source)?;
    let profile = read_profile(&args.profile)?;

    let result = score(&profile, Some(loader.config()), loader.cutoffs())?;
    let output = serde_json::to_string_pretty(&result).map_err(CliError::Output)?;
    println!("{output}");

    Ok(())
}

/// Loads the configuration directory, or the built-in tables, and applies
/// any cutoff override.
fn load(source: &SourceArgs) -> Result<ConfigLoader, EngineError> {
    let loader = match &source.config_dir {
        Some(dir) => ConfigLoader::load(dir)?,
        None => ConfigLoader::embedded()?,
    };

    match &source.cutoffs {
        Some(path) => {
            let cutoffs = ConfigLoader::load_cutoffs(path)?;
            let (config, _) = loader.into_parts();
            Ok(ConfigLoader::from_parts(config, cutoffs))
        }
        None => Ok(loader),
    }
}

fn read_profile(path: &Path) -> Result<CandidateProfile, CliError> {
    let display = path.display().to_string();
    let content = fs::read_to_string(path).map_err(|source| CliError::Profile {
        path: display.clone(),
        source,
    })?;
    let request: ProfileRequest =
        serde_json::from_str(&content).map_err(|source| CliError::ProfileJson {
            path: display,
            source,
        })?;
    Ok(request.into())
}
