/// Server configuration.
///
/// Defaults can be overridden with the `MATCH3_HOST` and `MATCH3_PORT` environment variables.
use log::warn;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    /// Read the bind address from the environment, falling back to the defaults.
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::var("MATCH3_HOST").ok(),
            std::env::var("MATCH3_PORT").ok(),
        )
    }

    fn from_vars(host: Option<String>, port: Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(host) = host.filter(|h| !h.trim().is_empty()) {
            config.host = host;
        }
        if let Some(raw) = port {
            match raw.trim().parse::<u16>() {
                Ok(port) => config.port = port,
                Err(_) => warn!("[Config] Ignoring invalid MATCH3_PORT={:?}, using {}", raw, DEFAULT_PORT),
            }
        }
        config
    }
}
