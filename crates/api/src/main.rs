//! Taskflow API server binary entrypoint.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use taskflow_common::config::AppConfig;
use taskflow_common::db::create_pool;
use taskflow_engine::dispatcher::ReminderDispatcher;
use taskflow_engine::queue::reminder_queue;
use taskflow_notifier::LogSink;

use taskflow_api::routes::create_router;
use taskflow_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    tracing::info!("Starting Taskflow API server...");

    // Load configuration
    let config = AppConfig::from_env()?;

    // Create database connection pool
    let pool = create_pool(&config).await?;

    // Run migrations
    sqlx::migrate!("../../migrations").run(&pool).await?;
    tracing::info!("Database migrations applied");

    // Reminder queue + dispatcher
    let (reminders, receiver) = reminder_queue(
        config.reminder_queue_capacity,
        config.reminder_overflow_policy,
    );
    let dispatcher = ReminderDispatcher::new(Arc::new(pool.clone()), Arc::new(LogSink))
        .with_max_in_flight(config.reminder_max_in_flight)
        .spawn(receiver);
    tracing::info!(
        capacity = config.reminder_queue_capacity,
        overflow_policy = %config.reminder_overflow_policy,
        "Reminder dispatcher running"
    );

    let addr: SocketAddr = config
        .bind_addr
        .parse()
        .map_err(|e| anyhow::anyhow!("BIND_ADDR '{}' is invalid: {}", config.bind_addr, e))?;

    // Build application state
    let state = AppState::new(pool, config, reminders);

    // Build router
    let app = create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Start server
    tracing::info!("API server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // The router held the last queue handle; the dispatcher now drains and exits.
    match tokio::time::timeout(Duration::from_secs(5), dispatcher).await {
        Ok(Ok(dispatched)) => tracing::info!(dispatched, "Reminder dispatcher drained"),
        Ok(Err(e)) => tracing::error!(error = %e, "Reminder dispatcher panicked"),
        Err(_) => tracing::warn!("Reminder dispatcher did not stop within 5s"),
    }

    tracing::info!("Taskflow API server stopped.");
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(
            "taskflow_api=debug,taskflow_engine=debug,taskflow_notifier=debug,taskflow::reminder=info,tower_http=debug",
        )
    });

    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Received shutdown signal, stopping gracefully...");
}
