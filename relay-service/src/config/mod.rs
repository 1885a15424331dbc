use secrecy::Secret;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub common: core_config::Config,
    pub models: ModelConfig,
    pub google: GoogleConfig,
}

#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Model used for every structured JSON request.
    pub text_model: String,
}

#[derive(Debug, Clone)]
pub struct GoogleConfig {
    pub api_key: Secret<String>,
    pub api_base: String,
    /// Client-side timeout for a single model call.
    pub timeout_secs: u64,
}

impl RelayConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        Self::from_lookup(common_config, |key| env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Empty values count as unset.
    pub fn from_lookup<F>(common: core_config::Config, lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = get("GEMINI_API_KEY").ok_or_else(|| {
            AppError::ConfigError(anyhow::anyhow!("GEMINI_API_KEY is required but not set"))
        })?;

        let timeout_secs = match get("GEMINI_TIMEOUT_SECS") {
            Some(raw) => raw.parse().map_err(|e| {
                AppError::ConfigError(anyhow::anyhow!(
                    "GEMINI_TIMEOUT_SECS must be a whole number of seconds: {}",
                    e
                ))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(RelayConfig {
            common,
            models: ModelConfig {
                text_model: get("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_TEXT_MODEL.to_string()),
            },
            google: GoogleConfig {
                api_key: Secret::new(api_key),
                api_base: get("GEMINI_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
                timeout_secs,
            },
        })
    }
}
