//! EatIt - restaurant recommendation bot
//!
//! A LINE webhook service that collects cuisine/rating/radius preferences
//! over a short dialog, searches nearby restaurants, and serves fresh,
//! non-repeating suggestions on demand.

mod api;
mod config;
mod engine;
mod line;
mod places;

use api::{create_router, AppState};
use config::Config;
use engine::{InMemoryCursorStore, InMemorySessionStore, ProductionEngine};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "eatit=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    let config = Config::from_env();

    if config.google_api_key.is_empty() {
        tracing::warn!("GOOGLE_MAPS_API_KEY is not set; searches will fail");
    }
    if config.line_channel_token.is_empty() {
        tracing::warn!("LINE_CHANNEL_ACCESS_TOKEN is not set; replies will fail");
    }

    let places = places::GoogleMapsService::new(
        config.google_api_key.clone(),
        config.request_timeout,
    )?;
    let sink = line::LineClient::new(config.line_channel_token.clone(), config.request_timeout)?;

    let engine: ProductionEngine = engine::Engine::new(
        places,
        InMemorySessionStore::new(),
        InMemoryCursorStore::new(),
    );

    let state = AppState {
        engine: Arc::new(engine),
        renderer: line::Renderer::new(config.google_api_key.clone()),
        sink: Arc::new(sink),
    };

    let app = create_router(state).layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("EatIt bot listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
