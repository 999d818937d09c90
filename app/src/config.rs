//! Environment-driven configuration
//!
//! ```no_run
//! use dashboard::config::DashboardConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = DashboardConfig::from_env()?;
//! println!("directory: {}", config.directory_base_url);
//! # Ok(())
//! # }
//! ```
//!
//! | Variable | Default |
//! |----------|---------|
//! | `DASHBOARD_ENV` | `development` |
//! | `DIRECTORY_BASE_URL` | [`DEFAULT_DIRECTORY_BASE_URL`] |
//! | `WEATHER_BASE_URL` | [`DEFAULT_WEATHER_BASE_URL`] |
//! | `DASHBOARD_HTTP_TIMEOUT_SECS` | none |
//! | `OPENWEATHER_API_KEY` | required |
//! | `DASHBOARD_USERNAME` | required |
//! | `DASHBOARD_PASSWORD` | required |

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Public JSONPlaceholder instance
pub const DEFAULT_DIRECTORY_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

/// OpenWeatherMap current-weather API
pub const DEFAULT_WEATHER_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Configuration error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Environment variable not set
    EnvVarNotSet(String),
    /// Invalid environment value
    InvalidEnvironment(String),
    /// Configuration validation failed
    ValidationError(String),
    /// Failed to parse configuration
    ParseError(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EnvVarNotSet(var) => write!(f, "Environment variable not set: {var}"),
            Self::InvalidEnvironment(env) => write!(f, "Invalid environment: {env}"),
            Self::ValidationError(msg) => write!(f, "Configuration validation failed: {msg}"),
            Self::ParseError(msg) => write!(f, "Failed to parse configuration: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Deployment environment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production
    Production,
}

impl Environment {
    /// Get environment from string
    ///
    /// # Errors
    ///
    /// Returns error if environment string is invalid
    pub fn from_str(s: &str) -> Result<Self, ConfigError> {
        match s.to_lowercase().as_str() {
            "dev" | "development" => Ok(Self::Development),
            "prod" | "production" => Ok(Self::Production),
            _ => Err(ConfigError::InvalidEnvironment(s.to_string())),
        }
    }

    /// Check if this is production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }

    /// `EnvFilter` directives used when `RUST_LOG` is unset
    #[must_use]
    pub const fn default_log_filter(self) -> &'static str {
        match self {
            Self::Development => "dashboard=debug,dashboard_api=debug,dashboard_runtime=warn",
            Self::Production => "dashboard=info,dashboard_runtime=warn",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

/// A secret value that never appears in debug output
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    /// Wrap a value
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The wrapped value
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(\"***\")")
    }
}

/// Credentials and keys read from the environment
#[derive(Debug, Clone, Default)]
pub struct Secrets {
    /// `OPENWEATHER_API_KEY`
    pub weather_api_key: Secret,
    /// `DASHBOARD_USERNAME`
    pub username: Secret,
    /// `DASHBOARD_PASSWORD`
    pub password: Secret,
}

/// Dashboard configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Deployment environment
    pub environment: Environment,
    /// Directory service root
    pub directory_base_url: String,
    /// Weather service root
    pub weather_base_url: String,
    /// Per-request timeout in seconds; none when unset
    pub http_timeout_secs: Option<u64>,
    /// Secrets (from environment variables only)
    #[serde(skip)]
    pub secrets: Secrets,
}

impl DashboardConfig {
    /// Load configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns error if configuration cannot be loaded or is invalid
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    ///
    /// # Errors
    ///
    /// Returns error if a required key is missing, a value does not parse,
    /// or validation fails
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let environment = lookup("DASHBOARD_ENV")
            .map_or(Ok(Environment::default()), |value| Environment::from_str(&value))?;

        let http_timeout_secs = lookup("DASHBOARD_HTTP_TIMEOUT_SECS")
            .map(|value| {
                value.trim().parse::<u64>().map_err(|e| {
                    ConfigError::ParseError(format!("DASHBOARD_HTTP_TIMEOUT_SECS={value:?}: {e}"))
                })
            })
            .transpose()?;

        let mut config = Self {
            environment,
            directory_base_url: lookup("DIRECTORY_BASE_URL")
                .unwrap_or_else(|| DEFAULT_DIRECTORY_BASE_URL.to_string()),
            weather_base_url: lookup("WEATHER_BASE_URL")
                .unwrap_or_else(|| DEFAULT_WEATHER_BASE_URL.to_string()),
            http_timeout_secs,
            secrets: Secrets::default(),
        };

        config.load_secrets(&lookup)?;
        config.validate()?;

        Ok(config)
    }

    fn load_secrets(&mut self, lookup: &impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        let required = |key: &str| {
            lookup(key)
                .map(Secret::new)
                .ok_or_else(|| ConfigError::EnvVarNotSet(key.to_string()))
        };

        self.secrets = Secrets {
            weather_api_key: required("OPENWEATHER_API_KEY")?,
            username: required("DASHBOARD_USERNAME")?,
            password: required("DASHBOARD_PASSWORD")?,
        };
        Ok(())
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Returns error if configuration is invalid
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_url("directory_base_url", &self.directory_base_url)?;
        validate_url("weather_base_url", &self.weather_base_url)?;

        if self.http_timeout_secs == Some(0) {
            return Err(ConfigError::ValidationError(
                "http_timeout_secs must be > 0".to_string(),
            ));
        }

        let secrets = [
            ("OPENWEATHER_API_KEY", &self.secrets.weather_api_key),
            ("DASHBOARD_USERNAME", &self.secrets.username),
            ("DASHBOARD_PASSWORD", &self.secrets.password),
        ];
        for (key, secret) in secrets {
            if secret.expose().trim().is_empty() {
                return Err(ConfigError::ValidationError(format!("{key} cannot be empty")));
            }
        }
        Ok(())
    }

    /// Per-request timeout, if configured
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.http_timeout_secs.map(Duration::from_secs)
    }
}

fn validate_url(field: &str, url: &str) -> Result<(), ConfigError> {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"));

    match rest {
        Some(host) if !host.is_empty() && !host.starts_with('/') => Ok(()),
        _ => Err(ConfigError::ValidationError(format!(
            "{field} must be an http(s) URL, got {url:?}"
        ))),
    }
}
