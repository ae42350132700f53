use std::sync::Arc;

use anyhow::Context;
use axum::extract::DefaultBodyLimit;
use clap::Args;
use http::{header, HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use diagram_store::handlers::{configure_routes, AppState};
use diagram_store::{DiagramService, RedisDiagramStore};
use diagram_store_core::config::{
    ServerConfig, DEFAULT_FRONTEND_URL, DEFAULT_MAX_BODY_BYTES, DEFAULT_REDIS_URL,
};

#[derive(Args)]
pub struct ServeCommand {
    /// Port to bind the HTTP server to
    #[arg(long, default_value_t = 3080, env = "PORT")]
    pub port: u16,

    /// Redis connection URL (a bare host:port is accepted)
    #[arg(long, default_value = DEFAULT_REDIS_URL, env = "REDIS_URL")]
    pub redis_url: String,

    /// Frontend origin allowed for cross-origin requests
    #[arg(long, default_value = DEFAULT_FRONTEND_URL, env = "FRONTEND_URL")]
    pub frontend_url: String,

    /// Diagram time-to-live in seconds (0 = never expire)
    #[arg(long, default_value_t = 0, env = "DIAGRAM_TTL")]
    pub ttl: u64,

    /// Maximum accepted request body size in bytes
    #[arg(long, default_value_t = DEFAULT_MAX_BODY_BYTES, env = "MAX_BODY_BYTES")]
    pub max_body_bytes: usize,
}

impl ServeCommand {
    pub fn execute(self) -> anyhow::Result<()> {
        let rt = tokio::runtime::Runtime::new()?;
        rt.block_on(self.run())
    }

    async fn run(self) -> anyhow::Result<()> {
        let config = ServerConfig::new(
            self.port,
            self.redis_url,
            self.frontend_url,
            self.ttl,
            self.max_body_bytes,
        );

        // The service is useless without the store, so a connection failure
        // here is fatal.
        let store = RedisDiagramStore::connect(&config.redis_url)
            .await
            .with_context(|| format!("failed to connect to Redis at {}", config.redis_url))?;
        info!("Connected to Redis");

        let diagram_service = Arc::new(DiagramService::new(Arc::new(store), config.ttl_seconds));
        let state = Arc::new(AppState { diagram_service });

        let cors = build_cors_layer(&config)?;

        let app = configure_routes()
            .with_state(state)
            .layer(cors)
            .layer(DefaultBodyLimit::max(config.max_body_bytes));

        let addr = config.listen_addr();
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .with_context(|| format!("failed to bind {}", addr))?;

        info!("Diagram store API running on http://{}", addr);
        info!("Health check: http://{}/health", addr);
        if config.ttl_enabled() {
            info!(
                "Diagram TTL: {} seconds ({} days)",
                config.ttl_seconds,
                config.ttl_seconds / 86_400
            );
        } else {
            info!("Diagram TTL: no expiration (persist forever)");
        }

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        // In-flight requests have drained; releasing the state drops the
        // store handle and closes the connection.
        info!("Store connection closed, exiting");

        Ok(())
    }
}

fn build_cors_layer(config: &ServerConfig) -> anyhow::Result<CorsLayer> {
    let methods = [Method::GET, Method::POST, Method::DELETE];

    // A localhost frontend means the browser-visible origin is unpredictable
    // (Docker setups map ports freely), so allow any origin there.
    let cors = if config.allow_any_origin() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers([header::CONTENT_TYPE])
    } else {
        let origin = config
            .frontend_url
            .parse::<HeaderValue>()
            .with_context(|| format!("invalid frontend URL: {}", config.frontend_url))?;
        CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(methods)
            .allow_headers([header::CONTENT_TYPE])
    };

    Ok(cors)
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to listen for ctrl-c signal");
    info!("Received Ctrl+C, initiating graceful shutdown...");
}
