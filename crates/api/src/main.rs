use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use dishduty_core::clock::{Clock, SystemClock};
use dishduty_core::roster;
use dishduty_core::store::DutyStore;
use dishduty_db::PgDutyStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dishduty_api::auth::AdminSecret;
use dishduty_api::background;
use dishduty_api::config::ServerConfig;
use dishduty_api::router::build_app_router;
use dishduty_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    let json_logs = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "dishduty_api=debug,dishduty_core=debug,dishduty_db=debug,tower_http=debug".into()
            }),
        )
        .with(json_logs.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json_logs).then(|| tracing_subscriber::fmt::layer()))
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    let admin = AdminSecret::new(config.admin_password.clone());
    if !admin.is_configured() {
        tracing::warn!("ADMIN_PASS is not set; all admin actions will be rejected");
    }

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = dishduty_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    dishduty_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    dishduty_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    let store: Arc<dyn DutyStore> = Arc::new(PgDutyStore::new(pool));
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    // --- Roster seed ---
    let seeded = roster::seed_roster(store.as_ref(), &config.seed_workers)
        .await
        .expect("Failed to seed worker roster");
    tracing::info!(
        created = seeded.len(),
        configured = config.seed_workers.len(),
        "Worker roster seeded"
    );

    // --- Startup resolve ---
    let cancel = tokio_util::sync::CancellationToken::new();
    let resolve_handle = tokio::spawn(background::startup_resolve::run(
        Arc::clone(&store),
        Arc::clone(&clock),
        Duration::from_secs(config.startup_resolve_delay_secs),
        cancel.clone(),
    ));

    // --- App state ---
    let state = AppState {
        store,
        clock,
        config: Arc::new(config.clone()),
        admin: Arc::new(admin),
    };

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    cancel.cancel();
    let _ = tokio::time::timeout(Duration::from_secs(5), resolve_handle).await;
    tracing::info!("Background tasks stopped");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
