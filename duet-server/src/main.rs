// Duet server: two-voice podcast generation over HTTP

use clap::Parser;
use duet_core::DuetConfig;
use duet_gen::{ArtifactStorage, CommandGenerator, Orchestrator};
use duet_server::http::{create_router, ApiState};
use duet_spk::catalog::VoiceCatalog;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "duet-server")]
#[command(about = "Two-voice podcast generation service", long_about = None)]
#[command(version)]
struct Args {
    /// Configuration file (JSON, TOML or YAML)
    #[arg(long, short)]
    config: Option<String>,

    #[arg(long)]
    host: Option<String>,

    #[arg(long)]
    port: Option<u16>,

    /// Root directory for transcripts and audio
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Voice catalog data file
    #[arg(long)]
    voices: Option<PathBuf>,

    /// Generation program
    #[arg(long)]
    generator: Option<String>,

    /// Log as JSON lines
    #[arg(long)]
    json_logs: bool,
}

fn load_config(args: &Args) -> anyhow::Result<DuetConfig> {
    let mut config = match &args.config {
        Some(path) => DuetConfig::from_file(path)?,
        None => DuetConfig::default(),
    };
    config.apply_env(|key| std::env::var(key).ok());

    if let Some(host) = &args.host {
        config.server.bind_address = host.clone();
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(data_dir) = &args.data_dir {
        config.storage.data_dir = data_dir.clone();
    }
    if let Some(voices) = &args.voices {
        config.voices.catalog_path = voices.clone();
    }
    if let Some(generator) = &args.generator {
        config.generator.program = generator.clone();
    }
    if args.json_logs {
        config.logging.json = true;
    }

    config.validate()?;
    Ok(config)
}

fn init_logging(config: &DuetConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false);

    if config.logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = load_config(&args)?;
    init_logging(&config);

    info!("Starting Duet {}", env!("CARGO_PKG_VERSION"));

    let storage = ArtifactStorage::new(&config.storage.data_dir);
    storage.ensure()?;
    info!(
        transcripts = %storage.transcripts_dir().display(),
        audio = %storage.audio_dir().display(),
        "Artifact storage ready"
    );

    // Loaded once, before the listener accepts anything
    let load = VoiceCatalog::load(&config.voices.catalog_path);

    let generator = CommandGenerator::from_config(&config.generator);
    if !generator.is_available() {
        warn!(
            program = %config.generator.program,
            "Generation program not found; generation requests will fail until it is installed"
        );
    }

    let orchestrator = Orchestrator::new(Arc::new(load.catalog), Arc::new(generator), storage)
        .with_timeout(Duration::from_secs(config.generator.timeout_secs));

    let state = ApiState {
        orchestrator: Arc::new(orchestrator),
        catalog_origin: load.origin,
    };
    let app = create_router(state);

    let addr = format!("{}:{}", config.server.bind_address, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("HTTP server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Wait for shutdown signal
async fn wait_for_shutdown() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
