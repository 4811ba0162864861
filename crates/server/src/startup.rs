use std::net::SocketAddr;

use axum::Router;
use configs::AppConfig;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::{errors::StartupError, middleware, routes, state::AppState};

const BANNER_WIDTH: usize = 70;

fn log_banner() {
    let title = "  A C C O U N T   S E R V I C E   R U N N I N G  ";
    info!("{}", "*".repeat(BANNER_WIDTH));
    let centered = format!("{:*^width$}", title, width = BANNER_WIDTH);
    info!("{}", centered);
    info!("{}", "*".repeat(BANNER_WIDTH));
}

/// Check a loaded config. Database settings are checked first and fail as
/// `StartupError::Database` so they share the database exit status.
pub fn validate_config(mut cfg: AppConfig) -> Result<AppConfig, StartupError> {
    cfg.database
        .validate()
        .map_err(|e| StartupError::Database(e.to_string()))?;
    cfg.normalize_and_validate()
        .map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    Ok(cfg)
}

/// Read `CONFIG_PATH` (or `config.toml`), apply env overrides and validate.
pub fn load_config() -> Result<AppConfig, StartupError> {
    let mut cfg = configs::load_default().map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    cfg.apply_env_overrides();
    validate_config(cfg)
}

/// Connect the database, apply migrations and build the handler context.
pub async fn init_state(cfg: &AppConfig) -> Result<AppState, StartupError> {
    let db = models::db::init_db(&cfg.database)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;
    Ok(AppState::new(db))
}

pub fn build_app(state: AppState) -> Router {
    routes::build_router(state, middleware::build_cors())
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    cfg.server
        .bind_addr()
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bad bind address {}: {e}", cfg.server.bind_addr())))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!(event = "shutdown_signal", "received Ctrl+C, shutting down");
}

/// Serve an already built app until Ctrl+C.
pub async fn serve(listener: TcpListener, app: Router) -> Result<(), StartupError> {
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

/// Public entry: initialize the service and run the HTTP server.
pub async fn run(cfg: AppConfig) -> Result<(), StartupError> {
    log_banner();

    let state = match init_state(&cfg).await {
        Ok(state) => state,
        Err(e) => {
            error!(event = "db_init_failed", error = %e, "Cannot continue");
            return Err(e);
        }
    };
    info!("Service initialized!");

    let app = build_app(state);
    let addr = bind_addr(&cfg)?;
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "account service listening");
    serve(listener, app).await
}
