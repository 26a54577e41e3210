use config::{Config, ConfigError, Environment, File};
use crate::models::requests::MAX_GENERATE_COUNT;
use serde::Deserialize;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub openai: OpenAiSettings,
    #[serde(default)]
    pub generation: GenerationSettings,
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
fn default_port() -> u16 { 8000 }

#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiSettings {
    pub api_key: Option<String>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    pub timeout_secs: Option<u64>,
}

impl OpenAiSettings {
    /// The API key, treating an empty value as unset
    pub fn configured_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}

impl Default for OpenAiSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            model: default_model(),
            timeout_secs: None,
        }
    }
}

fn default_base_url() -> String { "https://api.openai.com/v1".to_string() }
fn default_model() -> String { "gpt-4o-mini".to_string() }

/// Sampling parameters for each kind of completion
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct GenerationSettings {
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_match_temperature")]
    pub match_temperature: f32,
    #[serde(default = "default_developer_temperature")]
    pub developer_temperature: f32,
    #[serde(default = "default_ticket_temperature")]
    pub ticket_temperature: f32,
    #[serde(default = "default_max_count")]
    pub max_count: usize,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            max_tokens: default_max_tokens(),
            match_temperature: default_match_temperature(),
            developer_temperature: default_developer_temperature(),
            ticket_temperature: default_ticket_temperature(),
            max_count: default_max_count(),
        }
    }
}

fn default_max_tokens() -> u32 { 2000 }
fn default_match_temperature() -> f32 { 0.3 }
fn default_developer_temperature() -> f32 { 0.8 }
fn default_ticket_temperature() -> f32 { 0.7 }
fn default_max_count() -> usize { MAX_GENERATE_COUNT }

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
    /// 2. Configuration files (config/default.toml, config/local.toml)
    /// 3. Environment variables (prefixed with AI_POPS__)
    /// 4. OPENAI_API_KEY, API_HOST, API_PORT, LOG_LEVEL, LOG_FORMAT
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., AI_POPS__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("AI_POPS")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        apply_plain_env_vars(settings)?.try_deserialize()
    }
}

/// Overlay the unprefixed variables used by existing deployments and `.env` files
fn apply_plain_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    if let Ok(api_key) = env::var("OPENAI_API_KEY") {
        builder = builder.set_override("openai.api_key", api_key)?;
    }
    if let Ok(host) = env::var("API_HOST") {
        builder = builder.set_override("server.host", host)?;
    }
    if let Ok(port) = env::var("API_PORT") {
        let port: u16 = port
            .trim()
            .parse()
            .map_err(|e| ConfigError::Message(format!("Invalid API_PORT {:?}: {}", port, e)))?;
        builder = builder.set_override("server.port", i64::from(port))?;
    }
    if let Ok(level) = env::var("LOG_LEVEL") {
        builder = builder.set_override("logging.level", level)?;
    }
    if let Ok(format) = env::var("LOG_FORMAT") {
        builder = builder.set_override("logging.format", format)?;
    }

    builder.build()
}
