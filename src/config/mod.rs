// Required external crates for configuration management and serialization
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use config::{Config, ConfigError, Environment, File};

/// Configuration for corpus discovery
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ScanConfig {
    /// File extensions treated as documents (lowercase, without the dot)
    pub extensions: Vec<String>,
    /// Paths (relative to the root) and file names excluded from the scan
    pub exclude: Vec<String>,
    /// Heading label that opens the table-of-contents section
    pub toc_heading: String,
    /// Boilerplate headings exempt from the orphan check
    pub excluded_headings: Vec<String>,
}

/// Configuration for the device-widget lint
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct WidgetConfig {
    /// Whether the lint runs at all
    pub enabled: bool,
    /// File names of notebooks expected to carry a device widget
    pub require_in: Vec<String>,
}

/// Configuration for application logging
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub level: String,
    /// Optional log file directory
    pub file: Option<PathBuf>,
}

/// Main settings struct that contains all configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Settings {
    /// Corpus discovery settings
    pub scan: ScanConfig,
    /// Device-widget lint settings
    pub widget: WidgetConfig,
    /// Logging settings
    pub logging: LoggingConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            scan: ScanConfig {
                extensions: vec!["md".to_string(), "ipynb".to_string()],
                exclude: Vec::new(),
                toc_heading: "Table of contents".to_string(),
                excluded_headings: vec!["Installation Instructions".to_string()],
            },
            widget: WidgetConfig {
                enabled: true,
                require_in: Vec::new(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file: None,
            },
        }
    }
}

/// Implementation for loading and parsing configuration
impl Settings {
    /// Creates a new Settings instance by loading config from multiple
    /// sources in the following order of precedence (highest to lowest):
    /// 1. Environment variables prefixed with NOTELINT_
    /// 2. Local config file (config/local.toml) if present
    /// 3. Default config file (config/default.toml) if present
    /// 4. Built-in defaults
    ///
    /// A lint run must work from a bare checkout, so both config files
    /// are optional.
    pub fn new() -> Result<Self, ConfigError> {
        let config_dir = std::env::current_dir()
            .map_err(|e| ConfigError::Message(
                format!("Failed to get current directory: {}", e)
            ))?
            .join("config");

        let default_config_path = config_dir.join("default.toml").to_string_lossy().to_string();
        let local_config_path = config_dir.join("local.toml").to_string_lossy().to_string();

        // Load and validate configuration
        let settings = Config::builder()
            .add_source(Config::try_from(&Settings::default())?)
            .add_source(File::with_name(&default_config_path).required(false))
            .add_source(File::with_name(&local_config_path).required(false))
            // Double-underscore key separator keeps snake_case keys
            // reachable: NOTELINT_SCAN__TOC_HEADING -> scan.toc_heading
            .add_source(
                Environment::with_prefix("NOTELINT")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize::<Settings>()?;

        // Validate settings after loading
        settings.validate()?;

        Ok(settings)
    }

    /// Validate configuration values
    fn validate(&self) -> Result<(), ConfigError> {
        // At least one document extension is needed for discovery
        if self.scan.extensions.is_empty() {
            return Err(ConfigError::Message(
                "scan.extensions must name at least one file extension".to_string()
            ));
        }

        // The TOC section cannot be located with an empty label
        if self.scan.toc_heading.trim().is_empty() {
            return Err(ConfigError::Message(
                "scan.toc_heading must not be empty".to_string()
            ));
        }

        // Validate logging level
        match self.logging.level.to_lowercase().as_str() {
            "error" | "warn" | "info" | "debug" | "trace" => Ok(()),
            _ => Err(ConfigError::Message(
                format!("Invalid logging level: {}. Must be one of: error, warn, info, debug, trace",
                    self.logging.level)
            )),
        }?;

        // Create log file directory if configured and doesn't exist
        if let Some(log_dir) = &self.logging.file {
            if !log_dir.exists() {
                std::fs::create_dir_all(log_dir).map_err(|e| {
                    ConfigError::Message(format!(
                        "Failed to create log directory at {}: {}",
                        log_dir.display(), e
                    ))
                })?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert!(settings.scan.extensions.contains(&"ipynb".to_string()));
        assert_eq!(settings.scan.toc_heading, "Table of contents");
    }

    #[test]
    fn test_empty_extensions_rejected() {
        let mut settings = Settings::default();
        settings.scan.extensions.clear();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_bad_log_level_rejected() {
        let mut settings = Settings::default();
        settings.logging.level = "loud".to_string();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_env_override_reaches_snake_case_keys() {
        std::env::set_var("NOTELINT_SCAN__TOC_HEADING", "Contents");
        let settings = Settings::new().unwrap();
        std::env::remove_var("NOTELINT_SCAN__TOC_HEADING");
        assert_eq!(settings.scan.toc_heading, "Contents");
    }
}
