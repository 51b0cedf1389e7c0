//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Which exchange file to load.
    #[serde(default)]
    pub book: BookConfig,
    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Input document configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookConfig {
    /// Path to an uncompressed GnuCash XML file.
    pub path: Option<String>,
}

/// Report configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    /// Account types summed by the total-assets report.
    #[serde(default = "default_asset_types")]
    pub asset_types: Vec<String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            asset_types: default_asset_types(),
        }
    }
}

fn default_asset_types() -> Vec<String> {
    vec!["BANK".to_string(), "ASSET".to_string(), "CASH".to_string()]
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive, used when `RUST_LOG` is unset.
    #[serde(default = "default_filter")]
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            json: false,
        }
    }
}

fn default_filter() -> String {
    "gncledger=info".to_string()
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
            .add_source(
                config::Environment::with_prefix("GNCLEDGER")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("report.asset_types")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
