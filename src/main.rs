use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use dosetrack::api::start_server;
use dosetrack::config;
use dosetrack::state::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let db_path = config::database_path();
    let state = match AppState::new(db_path.clone()) {
        Ok(state) => Arc::new(state),
        Err(e) => {
            tracing::error!(path = %db_path.display(), "Failed to open database: {e}");
            std::process::exit(1);
        }
    };

    let mut server = match start_server(state, config::bind_addr()).await {
        Ok(server) => server,
        Err(e) => {
            tracing::error!("Failed to start server: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!(addr = %server.addr, "Serving API");

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
    }
    server.shutdown();
}
