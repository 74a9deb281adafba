use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

/// Value written into a freshly created config file. A key that still starts
/// with `YOUR_` is treated as unconfigured.
pub const PLACEHOLDER_API_KEY: &str = "YOUR_OPENWEATHER_API_KEY";

/// Errors raised while reading, writing, or consulting the config file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Could not serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Could not determine the user config directory")]
    NoConfigDir,
    #[error("OpenWeatherMap API key is missing or still the placeholder")]
    MissingCredential,
}

impl ConfigError {
    /// Message shown on the weather card when configuration blocks a lookup
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::MissingCredential => {
                "API key not configured. Please add your OpenWeatherMap API key."
            }
            ConfigError::NoConfigDir => "Could not locate the configuration directory.",
            ConfigError::Io(_) => "Could not read the configuration file.",
            ConfigError::Parse(_) => "The configuration file is not valid TOML.",
            ConfigError::Serialize(_) => "Could not write the configuration file.",
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Add an error
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Add a warning
    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        if self.errors.is_empty() {
            return String::new();
        }
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Weather lookup settings
    #[serde(default)]
    pub weather: WeatherConfig,

    /// Service endpoint overrides, mainly for proxies and tests
    #[serde(default)]
    pub endpoints: EndpointConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// OpenWeatherMap API key
    #[serde(default = "default_api_key")]
    pub api_key: String,

    /// City fetched automatically a few seconds after an error is shown
    #[serde(default = "default_fallback_city")]
    pub fallback_city: String,
}

fn default_api_key() -> String {
    PLACEHOLDER_API_KEY.to_string()
}

fn default_fallback_city() -> String {
    "Nagpur".to_string()
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: default_api_key(),
            fallback_city: default_fallback_city(),
        }
    }
}

impl WeatherConfig {
    /// Check if the API key is configured (not empty, not a placeholder)
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty() && !self.api_key.starts_with("YOUR_")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// Override for the weather API base URL
    pub weather_url: Option<String>,

    /// Override for the geolocation service URL
    pub geolocation_url: Option<String>,
}

impl Config {
    /// Load configuration from file, creating default if it doesn't exist
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            let config = Self::default();
            config.save()?;
            return Ok(config);
        }

        Self::read_from(&config_path)
    }

    /// Load configuration and validate it
    ///
    /// Returns the config along with any validation warnings.
    /// Returns an error if validation fails with critical errors.
    pub fn load_validated() -> Result<(Self, ValidationResult)> {
        let config = Self::load().context("Failed to load configuration")?;
        let validation = config.validate();

        if !validation.is_valid() {
            anyhow::bail!(
                "Configuration validation failed: {}",
                validation.error_summary()
            );
        }

        if !validation.warnings.is_empty() {
            for warning in &validation.warnings {
                tracing::warn!("Config warning: {}", warning);
            }
        }

        Ok((config, validation))
    }

    /// The configured API key, or `MissingCredential` while it is still the
    /// placeholder. The app keeps running without one; lookups just fail.
    pub fn api_key(&self) -> Result<&str, ConfigError> {
        if self.weather.is_configured() {
            Ok(&self.weather.api_key)
        } else {
            Err(ConfigError::MissingCredential)
        }
    }

    /// Validate the configuration
    ///
    /// Returns a ValidationResult containing any errors or warnings.
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        if self.weather.fallback_city.trim().is_empty() {
            result.add_error("weather.fallback_city", "Fallback city must not be empty");
        }

        if !self.weather.is_configured() {
            result.add_warning(
                "weather.api_key",
                "OpenWeatherMap API key not configured - weather lookups will fail",
            );
        }

        if let Some(url) = &self.endpoints.weather_url {
            self.validate_url(url, "endpoints.weather_url", &mut result);
        }

        if let Some(url) = &self.endpoints.geolocation_url {
            self.validate_url(url, "endpoints.geolocation_url", &mut result);
        }

        result
    }

    /// Validate a URL field
    fn validate_url(&self, url_str: &str, field_name: &str, result: &mut ValidationResult) {
        match Url::parse(url_str) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    result.add_error(
                        field_name,
                        format!("URL must use http or https scheme, got: {}", url.scheme()),
                    );
                }

                if url.host().is_none() {
                    result.add_error(field_name, "URL must have a host");
                }

                if let Some(port) = url.port() {
                    if port == 0 {
                        result.add_error(field_name, "Port cannot be 0");
                    }
                }
            }
            Err(e) => {
                result.add_error(field_name, format!("Invalid URL: {}", e));
            }
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<(), ConfigError> {
        let config_path = Self::config_path()?;
        self.save_to(&config_path)
    }

    fn read_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;

        Ok(())
    }

    /// Get the path to the configuration file
    fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;

        Ok(config_dir.join("skycast").join("config.toml"))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_default_config() {
        let config = Config::default();
        let result = config.validate();
        assert!(
            result.is_valid(),
            "Default config should be valid: {:?}",
            result.errors
        );
    }

    #[test]
    fn test_placeholder_key_is_warning_not_error() {
        let config = Config::default();
        let result = config.validate();
        assert!(result.is_valid());
        assert!(result.warnings.iter().any(|w| w.field == "weather.api_key"));
    }

    #[test]
    fn test_empty_fallback_city_is_error() {
        let mut config = Config::default();
        config.weather.fallback_city = "  ".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result
            .errors
            .iter()
            .any(|e| e.field == "weather.fallback_city"));
    }

    #[test]
    fn test_invalid_endpoint_url() {
        let mut config = Config::default();
        config.endpoints.weather_url = Some("not-a-url".to_string());
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result
            .errors
            .iter()
            .any(|e| e.field == "endpoints.weather_url"));
    }

    #[test]
    fn test_invalid_endpoint_url_scheme() {
        let mut config = Config::default();
        config.endpoints.geolocation_url = Some("ftp://localhost:8080".to_string());
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result
            .errors
            .iter()
            .any(|e| e.message.contains("http or https")));
    }

    #[test]
    fn test_api_key_missing_while_placeholder() {
        let config = Config::default();
        assert!(matches!(
            config.api_key(),
            Err(ConfigError::MissingCredential)
        ));

        let mut configured = Config::default();
        configured.weather.api_key = "d6a3eae2f74e0d1ba9e2cbffa4b9a5c7".to_string();
        assert_eq!(
            configured.api_key().unwrap(),
            "d6a3eae2f74e0d1ba9e2cbffa4b9a5c7"
        );
    }

    #[test]
    fn test_save_and_read_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.weather.api_key = "abc123".to_string();
        config.weather.fallback_city = "Pune".to_string();
        config.save_to(&path).unwrap();

        let loaded = Config::read_from(&path).unwrap();
        assert_eq!(loaded.weather.api_key, "abc123");
        assert_eq!(loaded.weather.fallback_city, "Pune");
        assert!(loaded.endpoints.weather_url.is_none());
    }

    #[test]
    fn test_read_rejects_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "weather = not toml").unwrap();

        assert!(matches!(
            Config::read_from(&path),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_partial_file_uses_field_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[weather]\napi_key = \"abc123\"\n").unwrap();

        let loaded = Config::read_from(&path).unwrap();
        assert_eq!(loaded.weather.api_key, "abc123");
        assert_eq!(loaded.weather.fallback_city, "Nagpur");
    }

    #[test]
    fn test_validation_result_error_summary() {
        let mut result = ValidationResult::default();
        result.add_error("field1", "error1");
        result.add_error("field2", "error2");
        let summary = result.error_summary();
        assert!(summary.contains("field1"));
        assert!(summary.contains("field2"));
    }
}
