use std::process::ExitCode;

use dotenvy::dotenv;
use tracing::{error, info};
use uuid::Uuid;

use configs::AppConfig;
use server::errors::StartupError;

enum Command {
    Serve,
    DbCreate,
}

fn parse_command() -> Result<Command, String> {
    match std::env::args().nth(1).as_deref() {
        None | Some("serve") => Ok(Command::Serve),
        Some("db-create") => Ok(Command::DbCreate),
        Some(other) => Err(format!("unknown command {other}; expected serve or db-create")),
    }
}

fn exit_with(e: &StartupError) -> ExitCode {
    error!(service = "accounts", event = "startup_failed", error = %e, code = e.exit_code(), "Cannot continue");
    ExitCode::from(e.exit_code())
}

/// Drop and recreate every table, then exit.
async fn db_create(cfg: &AppConfig) -> Result<(), StartupError> {
    let db = models::db::connect_with_config(&cfg.database)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;
    models::db::recreate_schema(&db)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;
    info!(service = "accounts", event = "db_created", "database schema recreated");
    Ok(())
}

fn main() -> ExitCode {
    dotenv().ok();

    let cfg = match server::startup::load_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            common::utils::logging::init_logging_default();
            return exit_with(&e);
        }
    };
    common::utils::logging::init_logging_with_format(&cfg.logging.format);

    let command = match parse_command() {
        Ok(c) => c,
        Err(msg) => return exit_with(&StartupError::InvalidConfig(msg)),
    };

    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new(move |info| {
        error!(
            service = "accounts",
            event = "panic",
            %service_id,
            pid,
            message = %info,
            "unhandled panic occurred"
        );
    }));

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = cfg.server.worker_threads {
        builder.worker_threads(w);
    }
    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => return exit_with(&StartupError::Io(e)),
    };

    info!(
        service = "accounts",
        event = "start",
        %service_id,
        pid,
        version,
        threads = cfg.server.worker_threads.unwrap_or_default(),
        "account service starting"
    );

    let result = rt.block_on(async move {
        match command {
            Command::Serve => server::run(cfg).await,
            Command::DbCreate => db_create(&cfg).await,
        }
    });

    match result {
        Ok(()) => {
            info!(service = "accounts", event = "stop", %service_id, pid, "account service stopped");
            ExitCode::SUCCESS
        }
        Err(e) => exit_with(&e),
    }
}
