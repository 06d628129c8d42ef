use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub data: DataSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

/// Where the university dataset comes from
#[derive(Debug, Clone, Deserialize)]
pub struct DataSettings {
    pub api_url: Option<String>,
    #[serde(default = "default_csv_source")]
    pub csv_source: Option<String>,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            api_url: None,
            csv_source: default_csv_source(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

fn default_csv_source() -> Option<String> { Some("data/universities.csv".to_string()) }
fn default_request_timeout() -> u64 { 30 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CacheSettings {
    /// Zero keeps the dataset for the lifetime of the process
    #[serde(default)]
    pub ttl_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_top_n")]
    pub default_top_n: usize,
    #[serde(default = "default_max_top_n")]
    pub max_top_n: usize,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            default_top_n: default_top_n(),
            max_top_n: default_max_top_n(),
        }
    }
}

fn default_top_n() -> usize { crate::core::DEFAULT_TOP_N }
fn default_max_top_n() -> usize { 500 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with UNICOUNSEL)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., UNICOUNSEL__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("UNICOUNSEL")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings = apply_env_overrides(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("UNICOUNSEL")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Apply the short-form dataset variables used by deployments
///
/// `UNIVERSITY_API_URL` and `UNIVERSITY_CSV` win over file values.
fn apply_env_overrides(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    if let Ok(api_url) = env::var("UNIVERSITY_API_URL") {
        builder = builder.set_override("data.api_url", api_url)?;
    }
    if let Ok(csv_source) = env::var("UNIVERSITY_CSV") {
        builder = builder.set_override("data.csv_source", csv_source)?;
    }

    builder.build()
}
