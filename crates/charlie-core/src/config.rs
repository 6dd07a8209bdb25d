use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PORT: u16 = 3978;
pub const DEFAULT_BIND: &str = "127.0.0.1";
pub const DEFAULT_WEATHER_BASE_URL: &str = "http://api.openweathermap.org";
pub const DEFAULT_WEATHER_UNITS: &str = "Imperial";

/// Top-level config (charlie.toml + CHARLIE_* env overrides).
///
/// Nested keys are separated by a double underscore in the environment,
/// e.g. `CHARLIE_WEATHER__API_KEY` sets `weather.api_key`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CharlieConfig {
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub weather: WeatherConfig,
    #[serde(default)]
    pub state: StateConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            bind: DEFAULT_BIND.to_string(),
        }
    }
}

/// OpenWeatherMap-style endpoint. The request path `/data/2.5/weather` is
/// appended to `base_url`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,
    /// Sent as the `APPID` query parameter. Lookups fail (inline) without it.
    pub api_key: Option<String>,
    #[serde(default = "default_weather_units")]
    pub units: String,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_weather_base_url(),
            api_key: None,
            units: default_weather_units(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StateBackend {
    #[default]
    Memory,
    Sqlite,
}

impl std::fmt::Display for StateBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StateBackend::Memory => write!(f, "memory"),
            StateBackend::Sqlite => write!(f, "sqlite"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateConfig {
    #[serde(default)]
    pub backend: StateBackend,
    /// SQLite file, only read when `backend = "sqlite"`.
    #[serde(default = "default_db_path")]
    pub path: String,
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            backend: StateBackend::default(),
            path: default_db_path(),
        }
    }
}

fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}
fn default_weather_base_url() -> String {
    DEFAULT_WEATHER_BASE_URL.to_string()
}
fn default_weather_units() -> String {
    DEFAULT_WEATHER_UNITS.to_string()
}
fn default_db_path() -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    format!("{}/.charlie/charlie.db", home)
}

impl CharlieConfig {
    /// Load config from a TOML file with CHARLIE_* env var overrides.
    ///
    /// Checks in order:
    ///   1. Explicit path argument
    ///   2. ~/.charlie/charlie.toml
    ///
    /// A missing file is not an error; every section has defaults.
    pub fn load(config_path: Option<&str>) -> crate::error::Result<Self> {
        let path = config_path
            .map(String::from)
            .unwrap_or_else(default_config_path);

        let config: CharlieConfig = Figment::new()
            .merge(Toml::file(&path))
            .merge(Env::prefixed("CHARLIE_").split("__"))
            .extract()
            .map_err(|e| crate::error::CharlieError::Config(e.to_string()))?;

        tracing::debug!(path = %path, "configuration loaded");
        Ok(config)
    }
}

fn default_config_path() -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    format!("{}/.charlie/charlie.toml", home)
}
