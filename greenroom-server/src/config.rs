use crate::error::ConfigError;
use std::net::SocketAddr;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

/// Host-level configuration. The relay itself needs nothing beyond a
/// listen address and the origins allowed to open cross-origin
/// connections.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to.
    pub listen_addr: SocketAddr,

    /// Allowed CORS origins; `"*"` permits any origin.
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            allowed_origins: vec!["*".to_string()],
        }
    }
}

impl ServerConfig {
    /// Build a configuration from `GREENROOM_ADDR` and
    /// `GREENROOM_ALLOWED_ORIGINS` (comma-separated), falling back to
    /// defaults for unset variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(addr) = std::env::var("GREENROOM_ADDR") {
            config.listen_addr = addr
                .parse()
                .map_err(|source| ConfigError::InvalidAddr { addr, source })?;
        }

        if let Ok(origins) = std::env::var("GREENROOM_ALLOWED_ORIGINS") {
            config.allowed_origins = origins
                .split(',')
                .map(|origin| origin.trim().to_string())
                .filter(|origin| !origin.is_empty())
                .collect();
        }

        Ok(config)
    }

    pub(crate) fn cors_layer(&self) -> CorsLayer {
        if self.allowed_origins.iter().any(|origin| origin == "*") {
            return CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any);
        }

        let origins: Vec<_> = self
            .allowed_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
