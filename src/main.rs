//! EventDesk API server
//!
//! Main application entry point

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use EventDesk::{
    build_router,
    config::Settings,
    database::{create_pool, run_migrations, DatabaseService},
    services::ServiceFactory,
    utils::logging,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging; the guard flushes the file writer on exit
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", EventDesk::info());

    let database_service = if settings.uses_memory_store() {
        info!("Using in-memory store, data will not survive a restart");
        DatabaseService::in_memory()
    } else {
        info!("Connecting to database...");
        let db_pool = create_pool(&settings.database).await?;
        run_migrations(&db_pool).await?;
        DatabaseService::new(db_pool)
    };

    info!("Initializing services...");
    let services = Arc::new(ServiceFactory::new(&settings, database_service));
    let app = build_router(services);

    let address = settings.bind_address();
    let listener = TcpListener::bind(&address).await?;
    info!(address = %address, "EventDesk API is listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("EventDesk API has been shut down.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    info!("Shutdown signal received, finishing in-flight requests");
}
