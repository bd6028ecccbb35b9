//! TOML Configuration File Support
//!
//! Configuration for the catalog lives at
//! `$XDG_CONFIG_HOME/podcast-catalog/config.toml`.
//!
//! # Configuration Priority
//!
//! Values are applied in this order (highest first):
//! 1. CLI arguments ([`ConfigOverrides`])
//! 2. Environment variables
//! 3. TOML configuration file
//! 4. Default values
//!
//! # Example Configuration
//!
//! ```toml
//! [source]
//! api_url = "https://podcast-api.netlify.app"
//! catalog_file = "/srv/podcasts.json"
//! seasons_file = "/srv/seasons.json"
//! timeout_secs = 10
//!
//! [display]
//! date_style = "relative"
//! ```

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dates::{DateFormatter, DateStyle};
use crate::error::SourceError;
use crate::source::{FileSource, HttpSource, PodcastSource, WithSeasons, DEFAULT_API_URL};

/// Environment variable for the API endpoint
pub const ENV_API_URL: &str = "PODCAST_API_URL";
/// Environment variable for a local catalog file
pub const ENV_CATALOG_FILE: &str = "PODCAST_CATALOG_FILE";
/// Environment variable for a local season-detail file
pub const ENV_SEASONS_FILE: &str = "PODCAST_SEASONS_FILE";
/// Environment variable for the fetch timeout in seconds
pub const ENV_FETCH_TIMEOUT: &str = "PODCAST_FETCH_TIMEOUT";
/// Environment variable for the date style
pub const ENV_DATE_STYLE: &str = "PODCAST_DATE_STYLE";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file at {path}: {source}")]
    ReadError {
        /// The path that was attempted
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("Failed to parse TOML config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

// =============================================================================
// Configuration Source Tracking
// =============================================================================

/// Tracks where a configuration value came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Value from command-line argument
    Cli,
    /// Value from environment variable
    Env,
    /// Value from TOML configuration file
    File,
    /// Default value
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cli => write!(f, "CLI"),
            Self::Env => write!(f, "environment"),
            Self::File => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

// =============================================================================
// TOML Configuration Structures
// =============================================================================

/// Source section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceToml {
    /// Catalog API endpoint
    pub api_url: Option<String>,

    /// Local catalog JSON file; takes precedence over the API
    pub catalog_file: Option<PathBuf>,

    /// Local season-detail JSON file
    pub seasons_file: Option<PathBuf>,

    /// Fetch timeout in seconds
    pub timeout_secs: Option<u64>,
}

/// Display section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayToml {
    /// `"calendar"` or `"relative"`
    pub date_style: Option<String>,
}

/// Top-level TOML configuration structure
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogToml {
    /// Data source section
    pub source: SourceToml,

    /// Display section
    pub display: DisplayToml,
}

// =============================================================================
// Main Configuration Struct
// =============================================================================

/// Resolved catalog configuration
#[derive(Clone, Debug)]
pub struct CatalogConfig {
    /// Catalog API endpoint
    pub api_url: String,

    /// Local catalog file, used instead of the API when set
    pub catalog_file: Option<PathBuf>,

    /// Local season-detail file, attached to a file catalog
    pub seasons_file: Option<PathBuf>,

    /// Fetch timeout
    pub timeout: Duration,

    /// Date style shared by cards and modal
    pub date_style: DateStyle,

    /// Path to the config file that was loaded (if any)
    pub config_file_path: Option<PathBuf>,

    /// Source of configuration values
    source: ConfigSource,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            catalog_file: None,
            seasons_file: None,
            timeout: DEFAULT_TIMEOUT,
            date_style: DateStyle::default(),
            config_file_path: None,
            source: ConfigSource::Default,
        }
    }
}

impl CatalogConfig {
    /// Create a new configuration with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the primary source of this configuration
    #[must_use]
    pub fn source(&self) -> ConfigSource {
        self.source
    }

    /// The one formatter for this session
    #[must_use]
    pub fn formatter(&self) -> DateFormatter {
        DateFormatter::new(self.date_style)
    }

    /// Build the configured data source
    ///
    /// A catalog file wins over the API endpoint. A seasons file is attached
    /// to whichever of the two is used.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn build_source(&self) -> Result<Box<dyn PodcastSource>, SourceError> {
        let source: Box<dyn PodcastSource> = match self.catalog_file {
            Some(ref path) => Box::new(FileSource::new(path)),
            None => Box::new(HttpSource::new(&self.api_url, self.timeout)?),
        };

        Ok(match self.seasons_file {
            Some(ref seasons) => Box::new(WithSeasons::new(source, seasons)),
            None => source,
        })
    }
}

// =============================================================================
// Configuration Loading
// =============================================================================

/// Get the default configuration file path
///
/// Returns `$XDG_CONFIG_HOME/podcast-catalog/config.toml` or
/// `~/.config/podcast-catalog/config.toml` if `XDG_CONFIG_HOME` is not set.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("podcast-catalog").join("config.toml"))
}

/// Load configuration from the default path and the process environment
///
/// # Errors
///
/// Returns an error if the config file exists but cannot be parsed, or holds
/// an invalid value. A missing config file is not an error.
pub fn load_config() -> Result<CatalogConfig, ConfigError> {
    load_config_from_path(default_config_path())
}

/// Load configuration from a specific path and the process environment
///
/// # Errors
///
/// Returns an error if the specified config file cannot be read or parsed.
pub fn load_config_from_path(path: Option<PathBuf>) -> Result<CatalogConfig, ConfigError> {
    load_config_with_env(path, |key| std::env::var(key).ok())
}

/// Load configuration with an explicit environment lookup
///
/// # Errors
///
/// Returns an error if the config file cannot be read or parsed, or a value
/// fails validation.
pub fn load_config_with_env<F>(path: Option<PathBuf>, env: F) -> Result<CatalogConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = CatalogConfig::default();

    if let Some(ref config_path) = path {
        if config_path.exists() {
            let toml_content =
                std::fs::read_to_string(config_path).map_err(|e| ConfigError::ReadError {
                    path: config_path.clone(),
                    source: e,
                })?;

            let toml_config: CatalogToml = toml::from_str(&toml_content)?;
            apply_toml_config(&mut config, &toml_config)?;
            config.config_file_path = Some(config_path.clone());
            config.source = ConfigSource::File;

            tracing::info!(
                path = %config_path.display(),
                "Loaded configuration from file"
            );
        } else {
            tracing::debug!(
                path = %config_path.display(),
                "Config file not found, using defaults"
            );
        }
    }

    apply_env_config(&mut config, env);

    Ok(config)
}

fn apply_toml_config(config: &mut CatalogConfig, toml: &CatalogToml) -> Result<(), ConfigError> {
    if let Some(ref url) = toml.source.api_url {
        config.api_url = url.clone();
    }
    if toml.source.catalog_file.is_some() {
        config.catalog_file = toml.source.catalog_file.clone();
    }
    if toml.source.seasons_file.is_some() {
        config.seasons_file = toml.source.seasons_file.clone();
    }
    if let Some(secs) = toml.source.timeout_secs {
        if secs == 0 {
            return Err(ConfigError::ValidationError(
                "source.timeout_secs must be greater than zero".to_string(),
            ));
        }
        config.timeout = Duration::from_secs(secs);
    }

    if let Some(ref style) = toml.display.date_style {
        config.date_style = style.parse().map_err(|_| {
            ConfigError::ValidationError(format!(
                "display.date_style must be \"calendar\" or \"relative\", got {style:?}"
            ))
        })?;
    }

    Ok(())
}

/// Environment overrides; unparseable values are logged and skipped
fn apply_env_config<F>(config: &mut CatalogConfig, env: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = env(ENV_API_URL) {
        config.api_url = url;
        config.source = ConfigSource::Env;
    }
    if let Some(path) = env(ENV_CATALOG_FILE) {
        config.catalog_file = Some(PathBuf::from(path));
        config.source = ConfigSource::Env;
    }
    if let Some(path) = env(ENV_SEASONS_FILE) {
        config.seasons_file = Some(PathBuf::from(path));
        config.source = ConfigSource::Env;
    }
    if let Some(timeout) = env(ENV_FETCH_TIMEOUT) {
        match timeout.parse::<u64>() {
            Ok(secs) if secs > 0 => {
                config.timeout = Duration::from_secs(secs);
                config.source = ConfigSource::Env;
            }
            _ => tracing::warn!(var = ENV_FETCH_TIMEOUT, value = %timeout, "Ignoring invalid environment value"),
        }
    }
    if let Some(style) = env(ENV_DATE_STYLE) {
        match style.parse::<DateStyle>() {
            Ok(style) => {
                config.date_style = style;
                config.source = ConfigSource::Env;
            }
            Err(_) => tracing::warn!(var = ENV_DATE_STYLE, value = %style, "Ignoring invalid environment value"),
        }
    }
}

// =============================================================================
// CLI Override Support
// =============================================================================

/// Command-line overrides, applied after [`load_config`]
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    /// API endpoint override
    pub api_url: Option<String>,

    /// Catalog file override
    pub catalog_file: Option<PathBuf>,

    /// Seasons file override
    pub seasons_file: Option<PathBuf>,

    /// Date style override
    pub date_style: Option<DateStyle>,
}

impl ConfigOverrides {
    /// Create a new empty set of overrides
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set API endpoint override
    #[must_use]
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = Some(url.into());
        self
    }

    /// Set catalog file override
    #[must_use]
    pub fn with_catalog_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.catalog_file = Some(path.into());
        self
    }

    /// Set date style override
    #[must_use]
    pub fn with_date_style(mut self, style: DateStyle) -> Self {
        self.date_style = Some(style);
        self
    }

    /// Apply overrides to a configuration
    pub fn apply(&self, config: &mut CatalogConfig) {
        if self.api_url.is_some()
            || self.catalog_file.is_some()
            || self.seasons_file.is_some()
            || self.date_style.is_some()
        {
            config.source = ConfigSource::Cli;
        }

        if let Some(ref url) = self.api_url {
            config.api_url = url.clone();
        }
        if self.catalog_file.is_some() {
            config.catalog_file = self.catalog_file.clone();
        }
        if self.seasons_file.is_some() {
            config.seasons_file = self.seasons_file.clone();
        }
        if let Some(style) = self.date_style {
            config.date_style = style;
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn toml_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_config() {
        let config = CatalogConfig::default();

        assert_eq!(config.api_url, "https://podcast-api.netlify.app");
        assert!(config.catalog_file.is_none());
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.date_style, DateStyle::Calendar);
        assert_eq!(config.source(), ConfigSource::Default);
    }

    #[test]
    fn test_default_config_path() {
        if let Some(p) = default_config_path() {
            assert!(p.ends_with("podcast-catalog/config.toml"));
        }
    }

    #[test]
    fn test_parse_valid_toml() {
        let file = toml_file(
            r#"
[source]
api_url = "http://localhost:8080"
catalog_file = "/tmp/podcasts.json"
seasons_file = "/tmp/seasons.json"
timeout_secs = 3

[display]
date_style = "relative"
"#,
        );

        let config = load_config_with_env(Some(file.path().to_path_buf()), no_env).unwrap();

        assert_eq!(config.api_url, "http://localhost:8080");
        assert_eq!(config.catalog_file, Some(PathBuf::from("/tmp/podcasts.json")));
        assert_eq!(config.seasons_file, Some(PathBuf::from("/tmp/seasons.json")));
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.date_style, DateStyle::Relative);
        assert_eq!(config.source(), ConfigSource::File);
        assert_eq!(config.config_file_path, Some(file.path().to_path_buf()));
    }

    #[test]
    fn test_parse_partial_toml() {
        let file = toml_file("[display]\ndate_style = \"calendar\"\n");
        let config = load_config_with_env(Some(file.path().to_path_buf()), no_env).unwrap();

        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.source(), ConfigSource::File);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config =
            load_config_with_env(Some(PathBuf::from("/nonexistent/config.toml")), no_env).unwrap();
        assert_eq!(config.source(), ConfigSource::Default);
        assert!(config.config_file_path.is_none());
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let file = toml_file("[source\napi_url = ");
        let result = load_config_with_env(Some(file.path().to_path_buf()), no_env);
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_invalid_date_style_is_validation_error() {
        let file = toml_file("[display]\ndate_style = \"fancy\"\n");
        let result = load_config_with_env(Some(file.path().to_path_buf()), no_env);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_zero_timeout_is_validation_error() {
        let file = toml_file("[source]\ntimeout_secs = 0\n");
        let result = load_config_with_env(Some(file.path().to_path_buf()), no_env);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_env_overrides_file() {
        let file = toml_file("[source]\napi_url = \"http://from-file\"\n");
        let env: HashMap<&str, &str> = [
            (ENV_API_URL, "http://from-env"),
            (ENV_DATE_STYLE, "relative"),
            (ENV_FETCH_TIMEOUT, "not-a-number"),
        ]
        .into_iter()
        .collect();

        let config = load_config_with_env(Some(file.path().to_path_buf()), |key| {
            env.get(key).map(ToString::to_string)
        })
        .unwrap();

        assert_eq!(config.api_url, "http://from-env");
        assert_eq!(config.date_style, DateStyle::Relative);
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.source(), ConfigSource::Env);
    }

    #[test]
    fn test_cli_overrides_everything() {
        let mut config = load_config_with_env(None, |key| {
            (key == ENV_API_URL).then(|| "http://from-env".to_string())
        })
        .unwrap();

        ConfigOverrides::new()
            .with_api_url("http://from-cli")
            .with_date_style(DateStyle::Relative)
            .apply(&mut config);

        assert_eq!(config.api_url, "http://from-cli");
        assert_eq!(config.formatter().style(), DateStyle::Relative);
        assert_eq!(config.source(), ConfigSource::Cli);
    }

    #[test]
    fn test_empty_overrides_keep_source() {
        let mut config = CatalogConfig::default();
        ConfigOverrides::new().apply(&mut config);
        assert_eq!(config.source(), ConfigSource::Default);
    }

    #[test]
    fn test_build_source_prefers_catalog_file() {
        let mut config = CatalogConfig::default();
        assert_eq!(config.build_source().unwrap().name(), "http");

        config.catalog_file = Some(PathBuf::from("/tmp/podcasts.json"));
        assert_eq!(config.build_source().unwrap().name(), "file");
    }

    #[test]
    fn test_seasons_file_wraps_api_source() {
        let config = CatalogConfig {
            seasons_file: Some(PathBuf::from("/tmp/seasons.json")),
            ..CatalogConfig::default()
        };
        assert_eq!(config.build_source().unwrap().name(), "http");
    }

    #[test]
    fn test_config_source_display() {
        assert_eq!(ConfigSource::Cli.to_string(), "CLI");
        assert_eq!(ConfigSource::Env.to_string(), "environment");
        assert_eq!(ConfigSource::File.to_string(), "config file");
        assert_eq!(ConfigSource::Default.to_string(), "default");
    }
}
