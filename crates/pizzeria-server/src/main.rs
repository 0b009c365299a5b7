//! Binary entrypoint for the pizzeria HTTP server.
//!
//! Configuration comes from flags or environment variables (see
//! [`ServerConfig`]); log filtering follows `RUST_LOG`.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use pizzeria_server::config::ServerConfig;
use pizzeria_server::router::build_router;
use pizzeria_server::state::AppState;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("pizzeria_server=info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false).compact())
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();
    let config = ServerConfig::parse();

    let state = AppState::new(&config.db_path).expect("Failed to open menu database");
    let app = build_router(state);

    let addr = config.listen_addr();
    tracing::info!(db_path = %config.db_path, "pizzeria server starting on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind listen address");
    axum::serve(listener, app).await.expect("Server terminated");
}
