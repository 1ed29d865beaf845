//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// EFT file generation settings.
    #[serde(default)]
    pub eft: EftConfig,
}

/// EFT file generation settings.
#[derive(Debug, Clone, Deserialize)]
pub struct EftConfig {
    /// Default transaction currency (ISO 4217).
    #[serde(default = "default_currency")]
    pub default_currency: String,
    /// Prefix used for generated batch references and file references.
    #[serde(default = "default_reference_prefix")]
    pub reference_prefix: String,
}

fn default_currency() -> String {
    "MWK".to_string()
}

fn default_reference_prefix() -> String {
    "EFT".to_string()
}

impl Default for EftConfig {
    fn default() -> Self {
        Self {
            default_currency: default_currency(),
            reference_prefix: default_reference_prefix(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("EFTGATE").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
