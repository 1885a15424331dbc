use crate::error::AppError;
use config::{Config as Cfg, File};
use serde::Deserialize;

pub const DEFAULT_PORT: u16 = 3001;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
        }
    }
}

impl Config {
    /// Load from `configuration.*`, then `APP__*` variables, then a bare `PORT`.
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::build(std::env::var("PORT").ok())
    }

    fn build(port_override: Option<String>) -> Result<Self, AppError> {
        let config = Cfg::builder()
            .add_source(File::with_name("configuration").required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .set_override_option("port", port_override.filter(|p| !p.is_empty()))?
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_defaults_to_3001() {
        let config = Config::build(None).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn bare_port_variable_wins() {
        let config = Config::build(Some("8089".to_string())).unwrap();
        assert_eq!(config.port, 8089);
    }

    #[test]
    fn empty_port_variable_is_ignored() {
        let config = Config::build(Some(String::new())).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn garbage_port_is_a_config_error() {
        let err = Config::build(Some("not-a-port".to_string())).unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));
    }
}
