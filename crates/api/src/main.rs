use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use canteen_api::config::ServerConfig;
use canteen_api::router::build_app_router;
use canteen_api::state::AppState;
use canteen_core::types::today;
use canteen_db::repositories::MenuRepo;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "canteen_api=debug,canteen_db=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = config.port,
        min_password_length = config.min_password_length,
        "Loaded canteen configuration",
    );

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = canteen_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    canteen_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    canteen_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database ready, migrations applied");

    match MenuRepo::find_by_date(&pool, today()).await {
        Ok(Some(menu)) => tracing::info!(menu_id = menu.id, "Today's menu is published"),
        Ok(None) => tracing::warn!(date = %today(), "No menu published for today yet"),
        Err(e) => tracing::warn!(error = %e, "Could not look up today's menu"),
    }

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    let app = build_app_router(state, &config);

    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    let (signal_tx, signal_rx) = tokio::sync::oneshot::channel::<()>();
    let mut server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                shutdown_signal().await;
                let _ = signal_tx.send(());
            })
            .await
    });

    let drain = Duration::from_secs(config.shutdown_timeout_secs);
    tokio::select! {
        result = &mut server => {
            log_server_exit(result);
        }
        _ = signal_rx => {
            match tokio::time::timeout(drain, &mut server).await {
                Ok(result) => log_server_exit(result),
                Err(_) => {
                    tracing::warn!(secs = drain.as_secs(), "In-flight requests did not drain in time");
                    server.abort();
                }
            }
        }
    }

    tracing::info!("Graceful shutdown complete");
}

fn log_server_exit(result: Result<std::io::Result<()>, tokio::task::JoinError>) {
    match result {
        Ok(Ok(())) => tracing::info!("Server stopped accepting connections"),
        Ok(Err(e)) => tracing::error!(error = %e, "Server error"),
        Err(e) => tracing::error!(error = %e, "Server task failed"),
    }
}

/// Wait for SIGINT, or SIGTERM on Unix.
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
