use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub providers: ProvidersSettings,
    pub recommendation: RecommendationSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// One external hotel data source
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderSettings {
    pub endpoint: String,
    pub api_key: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_min_interval_ms")]
    pub min_interval_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProvidersSettings {
    pub stayhub: ProviderSettings,
    pub roomatlas: ProviderSettings,
    pub nestpoint: ProviderSettings,
}

fn default_enabled() -> bool {
    true
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_min_interval_ms() -> u64 {
    250
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationSettings {
    pub max_results: Option<usize>,
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_price_weight")]
    pub price: f64,
    #[serde(default = "default_amenities_weight")]
    pub amenities: f64,
    #[serde(default = "default_star_rating_weight")]
    pub star_rating: f64,
    #[serde(default = "default_location_weight")]
    pub location: f64,
    #[serde(default = "default_conference_weight")]
    pub conference: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            price: default_price_weight(),
            amenities: default_amenities_weight(),
            star_rating: default_star_rating_weight(),
            location: default_location_weight(),
            conference: default_conference_weight(),
        }
    }
}

fn default_price_weight() -> f64 {
    0.25
}
fn default_amenities_weight() -> f64 {
    0.25
}
fn default_star_rating_weight() -> f64 {
    0.15
}
fn default_location_weight() -> f64 {
    0.15
}
fn default_conference_weight() -> f64 {
    0.20
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Environment variables (prefixed with VELORA_)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            // Add default config file
            .add_source(File::with_name("config/default").required(false))
            // Add local config file (for development overrides)
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables (prefixed with VELORA_)
            // e.g., VELORA_SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("VELORA")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = apply_key_overrides(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("VELORA")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Apply provider API keys from their conventional plain environment
/// variable names (STAYHUB_API_KEY etc.), which deployments set without
/// the VELORA_ prefix
fn apply_key_overrides(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    for (var, path) in [
        ("STAYHUB_API_KEY", "providers.stayhub.api_key"),
        ("ROOMATLAS_API_KEY", "providers.roomatlas.api_key"),
        ("NESTPOINT_API_KEY", "providers.nestpoint.api_key"),
    ] {
        if let Ok(key) = env::var(var) {
            builder = builder.set_override(path, key)?;
        }
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights() {
        let weights = WeightsConfig::default();
        assert_eq!(weights.price, 0.25);
        assert_eq!(weights.amenities, 0.25);
        assert_eq!(weights.star_rating, 0.15);
        assert_eq!(weights.location, 0.15);
        assert_eq!(weights.conference, 0.20);
    }

    #[test]
    fn test_default_logging() {
        assert_eq!(default_log_level(), "info");
        assert_eq!(default_log_format(), "json");
    }

    #[test]
    fn test_provider_defaults() {
        assert!(default_enabled());
        assert_eq!(default_timeout_secs(), 10);
        assert_eq!(default_min_interval_ms(), 250);
    }
}
