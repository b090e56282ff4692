//! Story Generator (hush-sg) - Main entry point
//!
//! This is the story generation service for Hush: it accepts story requests
//! over HTTP, drives the sequential-text then concurrent image+audio
//! pipeline with per-stage fallback chains, and serves the persisted assets.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hush_common::events::EventBus;
use hush_common::PerformanceBudget;
use hush_sg::api;
use hush_sg::assets::AssetStore;
use hush_sg::config::Config;
use hush_sg::generate::GenerationOrchestrator;
use hush_sg::providers::{ProviderRegistry, RemoteBackendClient};
use hush_sg::state::AppContext;

/// Command-line arguments for hush-sg
#[derive(Parser, Debug)]
#[command(name = "hush-sg")]
#[command(about = "Story generation service for Hush")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "8806", env = "HUSH_SG_PORT")]
    port: u16,

    /// Root folder for persisted story assets
    #[arg(short, long, env = "HUSH_ASSETS_ROOT")]
    assets_root: Option<String>,

    /// Remote story backend base URL
    #[arg(short, long, env = "HUSH_BACKEND_URL")]
    backend_url: Option<String>,

    /// Explicit narration voice override
    #[arg(long, env = "HUSH_VOICE")]
    voice: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hush_sg=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse command-line arguments
    let args = Args::parse();

    let assets_root =
        hush_common::config::resolve_assets_root(args.assets_root.as_deref(), "HUSH_ASSETS_ROOT")
            .context("Failed to resolve assets root")?;

    let config = Config {
        assets_root,
        port: args.port,
        backend_url: args
            .backend_url
            .or_else(|| hush_common::config::config_file_string("backend_url")),
        voice_override: args.voice,
    };

    info!("Starting Hush Story Generator on port {}", config.port);
    info!("Assets root: {}", config.assets_root.display());

    let store = Arc::new(
        AssetStore::new(&config.assets_root).context("Failed to initialize asset store")?,
    );

    // On-device model bindings are registered here when the platform loads
    // them; an empty registry still serves complete (placeholder) stories.
    let providers = Arc::new(ProviderRegistry::empty());

    let backend = config
        .backend_url
        .as_ref()
        .map(|url| Arc::new(RemoteBackendClient::new(url.clone())));
    if let Some(client) = &backend {
        info!(remote = client.is_remote(), "Story backend configured");
    }

    let events = EventBus::default();
    let orchestrator = Arc::new(GenerationOrchestrator::new(
        providers,
        backend,
        store,
        PerformanceBudget::default(),
        events.clone(),
        config.voice_override.clone(),
    ));

    let ctx = AppContext {
        orchestrator,
        events,
        assets_root: config.assets_root.clone(),
    };

    let app = api::create_router(ctx);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Starting HTTP server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
