// Engine settings: defaults with environment-variable overrides.
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct EngineSettings {
    pub host: String,
    pub port: u16,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            host: "127.0.0.1".to_string(),
            port: 50051,
        }
    }
}

impl EngineSettings {
    /// Defaults overridden by `ENGINE_HOST` / `ENGINE_PORT` when set.
    pub fn from_env() -> Self {
        let mut settings = EngineSettings::default();
        if let Ok(host) = std::env::var("ENGINE_HOST") {
            if !host.is_empty() {
                settings.host = host;
            }
        }
        if let Ok(port) = std::env::var("ENGINE_PORT") {
            match port.parse() {
                Ok(p) => settings.port = p,
                Err(_) => tracing::warn!(value = %port, "Ignoring unparseable ENGINE_PORT"),
            }
        }
        settings
    }
}
