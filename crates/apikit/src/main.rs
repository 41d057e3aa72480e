//! apikit demo server - Main entry point
//!
//! Wires the endpoint pipeline to an HTTP router:
//! - Composes each endpoint with its decode/encode adapters
//! - Attaches the telemetry interceptor as request middleware
//! - Handles configuration and process bootstrap

use std::sync::Arc;

use anyhow::Result;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use apikit::api;
use apikit::config::AppConfig;
use apikit::telemetry::{RequestInterceptor, TelemetryClient};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,apikit=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting apikit server");

    // Load configuration
    let config = AppConfig::from_env();
    tracing::info!("Configuration loaded: {:?}", config);

    // Initialize the telemetry interceptor; run without it if init fails
    let interceptor: Option<Arc<dyn RequestInterceptor>> = if config.telemetry.enabled {
        match TelemetryClient::init(config.telemetry.clone()) {
            Ok(client) => Some(Arc::new(client)),
            Err(err) => {
                tracing::error!("Error initializing telemetry client: {:#}", err);
                None
            }
        }
    } else {
        None
    };

    let app = api::create_router(&config, interceptor).layer(TraceLayer::new_for_http());

    let addr = format!("0.0.0.0:{}", config.listen_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
