use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,

    /// Remote identity service configuration
    pub identity: IdentityConfig,

    /// Record catalog configuration
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Observability configuration
    pub observability: ObservabilityConfig,
}

impl Config {
    /// Load configuration from file and environment
    pub fn load() -> Result<Self, config::ConfigError> {
        let config_path =
            std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config/default.toml".to_string());

        config::Config::builder()
            // Start with default values
            .add_source(config::File::from_str(
                include_str!("../config/default.toml"),
                config::FileFormat::Toml,
            ))
            // Override with config file if it exists
            .add_source(config::File::with_name(&config_path).required(false))
            // Override with environment variables (prefix: KFIX)
            .add_source(
                config::Environment::with_prefix("KFIX")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP server host
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP server port
    #[serde(default = "default_http_port")]
    pub http_port: u16,

    /// Request timeout (seconds)
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityConfig {
    /// Base URL of the remote identity service
    #[serde(default = "default_identity_base_url")]
    pub base_url: String,

    /// Request timeout for identity calls (seconds)
    #[serde(default = "default_identity_timeout")]
    pub timeout_secs: u64,

    /// Mark auth cookies as Secure
    #[serde(default)]
    pub secure_cookies: bool,

    /// Access-token cookie lifetime (seconds)
    #[serde(default = "default_token_max_age")]
    pub token_max_age_secs: u64,

    /// Refresh-token cookie lifetime (seconds)
    #[serde(default = "default_refresh_max_age")]
    pub refresh_token_max_age_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Default page size for list endpoints
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,

    /// Hard cap on requested page size
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u32,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub json_logs: bool,

    /// Service name
    #[serde(default = "default_service_name")]
    pub service_name: String,
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_http_port() -> u16 {
    8080
}

fn default_request_timeout() -> u64 {
    30
}

fn default_identity_base_url() -> String {
    "https://51pq3s0pbc.execute-api.us-east-1.amazonaws.com".to_string()
}

fn default_identity_timeout() -> u64 {
    10
}

fn default_token_max_age() -> u64 {
    60 * 60 * 24 // 24 hours
}

fn default_refresh_max_age() -> u64 {
    60 * 60 * 24 * 3 // 3 days
}

fn default_page_size() -> u32 {
    6
}

fn default_max_page_size() -> u32 {
    100
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_service_name() -> String {
    "kfix".to_string()
}
