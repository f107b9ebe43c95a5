//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Journal-entry engine configuration.
    #[serde(default)]
    pub engine: EngineConfig,
}

/// Journal-entry engine configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Whether cross-event invariant guards are enforced strictly.
    ///
    /// When false, treasury-family guard violations are downgraded to
    /// warnings in the run trace. Sale/purchase VAT guards always fail hard.
    #[serde(default = "default_strict_guards")]
    pub strict_guards: bool,
}

fn default_strict_guards() -> bool {
    true
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            strict_guards: default_strict_guards(),
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
        // Load .env if present; real environment variables win
        dotenvy::dotenv().ok();

        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("LIBRO").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
