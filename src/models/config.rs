use serde::Deserialize;

/// Configuration options for the Habitloop server, loaded from an optional
/// `habitloop.yaml` file overridden by environment variables.
#[derive(Clone, Deserialize)]
pub struct ServerConfig {
    /// SQLite database URL.
    pub database_url: String,
    /// Address the HTTP server binds to.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    /// Shared secret used to verify bearer tokens.
    pub jwt_secret: String,
}

fn default_bind_address() -> String {
    "127.0.0.1:8080".to_string()
}
