//! Server configuration shared between the CLI and the service crate.

/// Documented default for the request body ceiling (10 MiB).
pub const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Default Redis connection URL for local development.
pub const DEFAULT_REDIS_URL: &str = "redis://localhost:6379";

/// Default allowed frontend origin for local development.
pub const DEFAULT_FRONTEND_URL: &str = "http://localhost:5173";

/// Process-wide configuration for the diagram store service.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port the HTTP server listens on.
    pub port: u16,
    /// Redis connection URL, always carrying a `redis://` or `rediss://` scheme.
    pub redis_url: String,
    /// Frontend origin allowed for cross-origin requests.
    pub frontend_url: String,
    /// Diagram time-to-live in seconds. 0 disables expiration.
    pub ttl_seconds: u64,
    /// Maximum accepted request body size in bytes.
    pub max_body_bytes: usize,
}

impl ServerConfig {
    pub fn new(
        port: u16,
        redis_url: String,
        frontend_url: String,
        ttl_seconds: u64,
        max_body_bytes: usize,
    ) -> Self {
        Self {
            port,
            redis_url: normalize_redis_url(redis_url),
            frontend_url,
            ttl_seconds,
            max_body_bytes,
        }
    }

    /// Address the HTTP listener binds to.
    pub fn listen_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }

    /// Whether CORS should allow any origin.
    ///
    /// A localhost frontend URL indicates a local or containerized development
    /// setup where the browser-visible origin is not predictable.
    pub fn allow_any_origin(&self) -> bool {
        self.frontend_url.contains("localhost") || self.frontend_url.contains("127.0.0.1")
    }

    /// Whether stored diagrams expire at all.
    pub fn ttl_enabled(&self) -> bool {
        self.ttl_seconds > 0
    }
}

/// Ensure the Redis URL carries a scheme, accepting bare `host:port` values.
fn normalize_redis_url(url: String) -> String {
    if url.starts_with("redis://") || url.starts_with("rediss://") {
        url
    } else {
        format!("redis://{}", url)
    }
}
