//! Documentation of a regional Indonesian foods API.
//!
//! # General Infrastructure
//! - Clients talk to this gateway over plain JSON
//! - Every data request turns into exactly one request against the Supabase project
//! - Nothing is cached or retried, store failures come back as 500 with the store's message
//!
//!
//!
//! # Routes
//!
//! | Method | Path | Response |
//! |---|---|---|
//! | GET | `/` | `api jalan hehe` |
//! | GET | `/foods` | all foods, ascending id |
//! | GET | `/foods/{daerah}` | foods of one region, store order |
//! | POST | `/foods` | `{message, data}` |
//!
//!
//!
//! # Setup
//!
//! Required environment.
//! ```sh
//! export SUPABASE_URL=https://<project>.supabase.co
//! export SUPABASE_ANON_KEY=<anon key>
//! ```
//!
//! Run with logs.
//! ```sh
//! RUST_LOG=info,tower_http=debug cargo run -p food-api
//! ```
//!
//! Poke a running server.
//! ```sh
//! cargo run -p tester
//! ```
use std::sync::Arc;

use axum::{Router, routing::get};
#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};
use tokio::{net::TcpListener, signal::ctrl_c};
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

pub mod config;
pub mod cors;
pub mod error;
pub mod routes;
pub mod state;
pub mod store;
pub mod supabase;

use config::Config;
use cors::build_cors_layer;
use routes::{create_handler, foods_handler, region_handler, root_handler};
use state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    let cors = build_cors_layer(&state.config.cors);

    let app = Router::new()
        .route("/", get(root_handler))
        .route("/foods", get(foods_handler).post(create_handler))
        .route("/foods/{daerah}", get(region_handler))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    match cors {
        Some(cors) => app.layer(cors),
        None => app,
    }
}

pub async fn start_server() -> anyhow::Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Initializing state...");
    let state = AppState::from_config(Config::load()?)?;

    info!("Starting server...");

    let address = format!("0.0.0.0:{}", state.config.port);
    let app = router(state);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutting down...");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
