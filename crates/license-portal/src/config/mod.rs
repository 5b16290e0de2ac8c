use std::env;
use std::fmt;
use std::time::Duration;

/// Distinguishes runtime behavior for different stages of the portal client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the portal client.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub api: ApiConfig,
    pub autosave: AutosaveConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let base_url = env::var("PORTAL_API_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:8080/api/v1".to_string());
        let timeout_secs = env::var("PORTAL_API_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidTimeout)?;
        let bearer_token = env::var("PORTAL_API_TOKEN").ok().filter(|t| !t.is_empty());

        let debounce_ms = env::var("PORTAL_AUTOSAVE_DEBOUNCE_MS")
            .unwrap_or_else(|_| AutosaveConfig::DEFAULT_DEBOUNCE_MS.to_string())
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidDebounce)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            api: ApiConfig {
                base_url,
                timeout_secs,
                bearer_token,
            },
            autosave: AutosaveConfig::new(debounce_ms),
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Settings for reaching the portal's REST backend.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub bearer_token: Option<String>,
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Write-coalescing policy for the wizard's auto-save.
///
/// The debounce window is clamped to 1-2 seconds of inactivity; values outside
/// that range are pulled back to the nearest bound.
#[derive(Debug, Clone)]
pub struct AutosaveConfig {
    pub debounce_ms: u64,
}

impl AutosaveConfig {
    pub const DEFAULT_DEBOUNCE_MS: u64 = 1500;
    pub const MIN_DEBOUNCE_MS: u64 = 1000;
    pub const MAX_DEBOUNCE_MS: u64 = 2000;

    pub fn new(debounce_ms: u64) -> Self {
        Self {
            debounce_ms: debounce_ms.clamp(Self::MIN_DEBOUNCE_MS, Self::MAX_DEBOUNCE_MS),
        }
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for AutosaveConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DEBOUNCE_MS)
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidTimeout,
    InvalidDebounce,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidTimeout => {
                write!(f, "PORTAL_API_TIMEOUT_SECS must be a valid u64")
            }
            ConfigError::InvalidDebounce => {
                write!(f, "PORTAL_AUTOSAVE_DEBOUNCE_MS must be a valid u64")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
