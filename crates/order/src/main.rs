use anyhow::{Context, Result};
use orders_function::{
    abstract_trait::order::repository::DynOrderConnectionFactory,
    config::myconfig::Config,
    handler::AppRouter,
    repository::order::PgOrderConnectionFactory,
    state::AppState,
};
use shared::{
    config::ConnectionManager,
    utils::{Telemetry, init_logger},
};
use std::sync::Arc;
use tracing::{error, info};

const SERVICE_NAME: &str = "orders-function";

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let config = Config::init().context("Failed to load configuration")?;

    let telemetry = match config.otel_endpoint.as_deref() {
        Some(endpoint) => Some(
            Telemetry::init(SERVICE_NAME, endpoint).context("Failed to initialize telemetry")?,
        ),
        None => None,
    };

    let _log_guard = init_logger(
        telemetry.as_ref().map(Telemetry::logger_provider),
        SERVICE_NAME,
        config.is_dev,
        config.enable_file_log,
    )
    .context("Failed to initialize logger")?;

    if config.run_migrations {
        run_migrations(&config.database_url)
            .await
            .context("failed to migration database")?;
    }

    let connections: DynOrderConnectionFactory = Arc::new(PgOrderConnectionFactory::new(
        config.database_url.clone(),
        config.order_timezone.clone(),
    ));

    let state = Arc::new(AppState::new(connections));

    info!("✅ Application setup completed successfully.");

    let served = AppRouter::serve(config.port, state)
        .await
        .context("Failed to start server");

    if let Some(telemetry) = telemetry {
        if let Err(e) = telemetry.shutdown() {
            error!("Failed to shutdown telemetry: {}", e);
        }
    }

    info!("✅ Orders function shutdown complete.");
    served
}

async fn run_migrations(database_url: &str) -> Result<()> {
    let mut conn = ConnectionManager::connect(database_url).await?;

    sqlx::migrate!("./migrations").run(&mut conn).await?;

    ConnectionManager::close(conn).await?;

    info!("✅ Database migrations applied");
    Ok(())
}
