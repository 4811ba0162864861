use axum::Router;
use configs::DatabaseConfig;
use migration::MigratorTrait;
use server::state::AppState;

/// App wired to a fresh in-memory SQLite database with the schema applied.
pub async fn test_app() -> anyhow::Result<(Router, AppState)> {
    let cfg = DatabaseConfig {
        url: "sqlite::memory:".into(),
        max_connections: 1,
        min_connections: 1,
        ..DatabaseConfig::default()
    };
    let db = models::db::connect_with_config(&cfg).await?;
    migration::Migrator::up(&db, None).await?;
    let state = AppState::new(db);
    Ok((server::startup::build_app(state.clone()), state))
}
