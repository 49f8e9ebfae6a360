//! Server configuration.
//!
//! The engine itself takes no configuration beyond per-call
//! [`AnalysisOptions`](crate::types::AnalysisOptions); this only covers the
//! HTTP binary.

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 8080;
/// Default bind address.
pub const DEFAULT_BIND: &str = "0.0.0.0";

/// Settings for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to bind (`RESONANCE_BIND`).
    pub bind: String,
    /// Port to listen on (`PORT`).
    pub port: u16,
}

impl ServerConfig {
    /// Load from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` to resolve variable names. Unset or unparsable
    /// values fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = lookup("PORT")
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(DEFAULT_PORT);
        let bind = lookup("RESONANCE_BIND")
            .map(|b| b.trim().to_string())
            .filter(|b| !b.is_empty())
            .unwrap_or_else(|| DEFAULT_BIND.into());
        Self { bind, port }
    }

    /// `host:port` string for binding a listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.into(),
            port: DEFAULT_PORT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_unset() {
        let config = ServerConfig::from_lookup(|_| None);
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_reads_port_and_bind() {
        let config = ServerConfig::from_lookup(|key| match key {
            "PORT" => Some("3000".into()),
            "RESONANCE_BIND" => Some("127.0.0.1".into()),
            _ => None,
        });
        assert_eq!(config.bind_addr(), "127.0.0.1:3000");
    }

    #[test]
    fn test_bad_port_falls_back() {
        let config = ServerConfig::from_lookup(|key| (key == "PORT").then(|| "eighty".into()));
        assert_eq!(config.port, DEFAULT_PORT);
    }
}
