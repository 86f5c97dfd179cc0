//! fieldguard host binary.
//!
//! Loads model config, attaches the read-only mixin to configured models,
//! and serves the REST remoting surface.
//!
//! Usage: `fieldguard-host [config.yaml]` (default `fieldguard.yaml`).

use std::net::SocketAddr;
use tracing_subscriber::{fmt, EnvFilter};

use fieldguard_host::{app_state, config, router};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let path = std::env::args().nth(1).unwrap_or_else(|| "fieldguard.yaml".into());
    let cfg = config::load_from_file(&path).expect("config load failed");
    let listen: SocketAddr = cfg
        .server
        .listen
        .parse()
        .expect("server.listen must be a valid SocketAddr");

    let state = app_state::AppState::new(cfg).expect("model boot failed");
    let app = router::build_router(state);

    tracing::info!(%listen, config = %path, "fieldguard-host starting");
    let listener = tokio::net::TcpListener::bind(listen).await.expect("failed to bind");

    axum::serve(listener, app).await.expect("server failed");
}
