mod app;
mod config;
mod handlers;
mod state;
mod storage;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use listenfd::ListenFd;
use localemgmt_auth::{AuthConfig, AuthState};
use localemgmt_core::auth::SessionRepository;
use tokio::{net::TcpListener, signal};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{app::create_app, config::Config, state::AppState, storage::SqliteRepository};

/// Locale management - Manage localized strings grouped by bundle and language
#[derive(Parser, Debug)]
#[command(name = "localemgmt")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Host address to bind the server to
    #[arg(long, short = 'H', default_value = "0.0.0.0", env = "HOST")]
    host: String,

    /// Port to listen on
    #[arg(long, short, default_value = "3000", env = "PORT")]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "localemgmt=debug,localemgmt_auth=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();

    tracing::info!(database = %config.database_url, "Opening locale database");
    let repo = SqliteRepository::connect(&config.database_url, config.sql_scripts()?).await?;

    let auth = init_auth(&config).await?;
    let state = AppState::new(Arc::new(repo), auth);

    let app = create_app(state, config.request_timeout());

    // Auto-reload support via listenfd
    let mut listenfd = ListenFd::from_env();
    let listener = match listenfd.take_tcp_listener(0)? {
        // If we are given a tcp listener on listen fd 0, use that one
        Some(listener) => {
            listener.set_nonblocking(true)?;
            TcpListener::from_std(listener)?
        }
        // Otherwise fall back to CLI-specified host:port
        None => {
            let addr = format!("{}:{}", cli.host, cli.port);
            TcpListener::bind(&addr).await?
        }
    };

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Build the session store and identity provider.
#[cfg_attr(not(feature = "auth-sqlite"), allow(unused_variables))]
async fn init_auth(config: &Config) -> Result<AuthState> {
    let auth_config = AuthConfig::from_env()?;

    #[cfg(feature = "auth-sqlite")]
    let sessions: Arc<dyn SessionRepository> = {
        tracing::info!(path = %config.session_db_path, "Using SQLite session store");
        Arc::new(localemgmt_auth::SqliteSessionStore::open(&config.session_db_path).await?)
    };

    #[cfg(not(feature = "auth-sqlite"))]
    let sessions: Arc<dyn SessionRepository> = {
        tracing::info!("Using in-memory session store");
        Arc::new(localemgmt_auth::InMemorySessionStore::new())
    };

    #[cfg(feature = "auth-mock")]
    let auth = {
        tracing::warn!("Mock identity provider enabled, every login is the local developer");
        let provider = localemgmt_auth::MockProvider::developer(auth_config.callback_url()?);
        AuthState::with_provider(sessions, Arc::new(provider), auth_config)
    };

    #[cfg(not(feature = "auth-mock"))]
    let auth = AuthState::new(sessions, auth_config).await?;

    Ok(auth)
}

/// Wait for shutdown signals (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down...");
        }
    }
}
