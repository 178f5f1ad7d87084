//! API configuration
//!
//! Layered in order: built-in defaults, an optional `redress.toml` in the
//! working directory, then `API_*` environment variables. Nested sections
//! use a double underscore, e.g. `API_SCHEME__PLEVIN_THRESHOLD_PCT=40` or
//! `API_PRIORITY__OUTSTANDING_COSTS_SUM=20000` or `API_LFA__FUNDING_CAP=75000`.

use serde::{Deserialize, Serialize};

use core_kernel::Timezone;
use domain_distribution::{DbaTerms, LfaTerms, PriorityTerms};
use domain_redress::SchemeRules;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Log level or `EnvFilter` directive
    pub log_level: String,
    pub log_format: LogFormat,
    /// Claims per blocking task in batch validation
    pub batch_chunk_size: usize,
    /// Zone whose calendar date is "today" for evaluations
    pub timezone: Timezone,
    pub scheme: SchemeRules,
    pub priority: PriorityTerms,
    pub dba: DbaTerms,
    pub lfa: LfaTerms,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            log_level: "info".to_string(),
            log_format: LogFormat::default(),
            batch_chunk_size: 250,
            timezone: Timezone::default(),
            scheme: SchemeRules::default(),
            priority: PriorityTerms::default(),
            dba: DbaTerms::default(),
            lfa: LfaTerms::default(),
        }
    }
}

impl ApiConfig {
    /// Loads configuration from `redress.toml` (if present) and environment
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::with_name("redress").required(false))
            .add_source(
                config::Environment::with_prefix("API")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
