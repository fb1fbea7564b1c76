use std::sync::Arc;

use anyhow::Result;
use axum::{
    Router,
    http::{HeaderValue, header},
    middleware,
    response::Response,
    routing::get,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use reqwest::Client;

use crate::{config::Config, core::Resolver, handlers};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) resolver: Arc<Resolver>,
    pub(crate) filename: Arc<str>,
    pub(crate) cache_control: Arc<str>,
    seed: Option<u64>,
}

impl AppState {
    pub(crate) fn new(config: &Config) -> Result<Self> {
        let client = Client::builder().build()?;

        Ok(Self {
            resolver: Arc::new(Resolver::new(config, client)),
            filename: Arc::from(config.response.filename.as_str()),
            cache_control: Arc::from(config.response.cache_control.as_str()),
            seed: config.search.seed,
        })
    }

    /// Per-request random source, fixed when a seed is configured.
    pub(crate) fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

async fn set_cors_headers(mut response: Response) -> Response {
    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET,OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
    response
}

pub(crate) fn router(state: AppState) -> Router {
    let jump = get(handlers::jump::get_image).options(handlers::jump::preflight);

    Router::new()
        .route("/", jump.clone())
        .route("/api/jump", jump)
        .layer(middleware::map_response(set_cors_headers))
        .with_state(state)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for ctrl-c: {}", e);
    }
    log::info!("Shutting down...");
}

pub async fn run(config: Config) -> Result<()> {
    let state = AppState::new(&config)?;
    let listener =
        tokio::net::TcpListener::bind((config.server.host.as_str(), config.server.port)).await?;

    log::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
