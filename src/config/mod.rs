use crate::constants::{
    DEFAULT_API_DOMAIN, DEFAULT_COLUMN_ID, DEFAULT_HTTP_TIMEOUT_SECONDS, DEFAULT_MAX_NAV_DEPTH,
};
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;

pub mod paths;
pub mod validation;

use paths::{get_config_path, get_log_dir_path};
use validation::validate_config;

/// Configuration structure for the application.
/// Handles loading, saving, and managing application settings.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Feed host, including the scheme.
    #[serde(default = "default_api_domain")]
    pub api_domain: String,
    /// Schedule column to request from the feed.
    #[serde(default = "default_column_id")]
    pub column_id: u32,
    /// Path to the log file. If not specified, logs will be written to a default location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file_path: Option<String>,
    /// HTTP timeout in seconds for API requests.
    #[serde(default = "default_http_timeout")]
    pub http_timeout_seconds: u64,
    /// How many overlays may be stacked, root menu included.
    #[serde(default = "default_max_nav_depth")]
    pub max_nav_depth: usize,
}

fn default_api_domain() -> String {
    DEFAULT_API_DOMAIN.to_string()
}

fn default_column_id() -> u32 {
    DEFAULT_COLUMN_ID
}

fn default_http_timeout() -> u64 {
    DEFAULT_HTTP_TIMEOUT_SECONDS
}

fn default_max_nav_depth() -> usize {
    DEFAULT_MAX_NAV_DEPTH
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_domain: default_api_domain(),
            column_id: default_column_id(),
            log_file_path: None,
            http_timeout_seconds: default_http_timeout(),
            max_nav_depth: default_max_nav_depth(),
        }
    }
}

impl Config {
    /// Loads configuration from the default config file location, falling back to
    /// defaults when no file exists. Environment variables override file values.
    ///
    /// # Environment Variables
    /// - `OLYMPIC_API_DOMAIN` - Override API domain
    /// - `OLYMPIC_LOG_FILE` - Override log file path
    /// - `OLYMPIC_HTTP_TIMEOUT` - Override HTTP timeout in seconds
    /// - `OLYMPIC_MAX_DEPTH` - Override maximum overlay depth
    pub async fn load() -> Result<Self, AppError> {
        let config_path = get_config_path();

        let mut config = if Path::new(&config_path).exists() {
            Self::load_from_path(&config_path).await?
        } else {
            Config::default()
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Applies `OLYMPIC_*` environment overrides. Unparseable numeric values are ignored.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(api_domain) = std::env::var("OLYMPIC_API_DOMAIN") {
            self.api_domain = api_domain;
        }

        if let Ok(log_file_path) = std::env::var("OLYMPIC_LOG_FILE") {
            self.log_file_path = Some(log_file_path);
        }

        if let Some(timeout) = std::env::var("OLYMPIC_HTTP_TIMEOUT")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            self.http_timeout_seconds = timeout;
        }

        if let Some(depth) = std::env::var("OLYMPIC_MAX_DEPTH")
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
        {
            self.max_nav_depth = depth;
        }
    }

    /// Validates the configuration settings
    pub fn validate(&self) -> Result<(), AppError> {
        validate_config(
            &self.api_domain,
            &self.log_file_path,
            self.http_timeout_seconds,
            self.max_nav_depth,
        )
    }

    /// Saves current configuration to the default config file location.
    pub async fn save(&self) -> Result<(), AppError> {
        let config_path = get_config_path();
        self.save_to_path(&config_path).await
    }

    pub fn get_config_path() -> String {
        paths::get_config_path()
    }

    pub fn get_log_dir_path() -> String {
        paths::get_log_dir_path()
    }

    /// Displays current configuration settings to stdout.
    pub async fn display() -> Result<(), AppError> {
        let config_path = get_config_path();
        let log_dir = get_log_dir_path();
        let config = Config::load().await?;

        println!("\nCurrent Configuration");
        println!("────────────────────────────────────");
        println!("Config Location:");
        if Path::new(&config_path).exists() {
            println!("{config_path}");
        } else {
            println!("{config_path}");
            println!("(Not created, using defaults)");
        }
        println!("────────────────────────────────────");
        println!("API Domain:");
        println!("{}", config.api_domain);
        println!("────────────────────────────────────");
        println!("Schedule Column:");
        println!("{}", config.column_id);
        println!("────────────────────────────────────");
        println!("HTTP Timeout:");
        println!("{} seconds", config.http_timeout_seconds);
        println!("────────────────────────────────────");
        println!("Max Overlay Depth:");
        println!("{}", config.max_nav_depth);
        println!("────────────────────────────────────");
        println!("Log File Location:");
        if let Some(custom_path) = &config.log_file_path {
            println!("{custom_path}");
        } else {
            println!("{log_dir}/olympic_teletext.log");
            println!("(Default location)");
        }

        Ok(())
    }

    /// Saves configuration to a custom file path.
    ///
    /// Creates the parent directory if needed and makes sure the API domain carries
    /// an https:// prefix.
    ///
    /// # Errors
    /// * `AppError::Config` - If the provided path has no parent directory
    /// * `AppError::Io` - If there's an I/O error creating directories or writing the file
    /// * `AppError::TomlSerialize` - If there's an error serializing the configuration
    pub async fn save_to_path(&self, path: &str) -> Result<(), AppError> {
        let config_dir = Path::new(path).parent().ok_or_else(|| {
            AppError::config_error(format!("Path '{path}' has no parent directory"))
        })?;

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).await?;
        }
        let api_domain = if !self.api_domain.starts_with("https://") {
            format!("https://{}", self.api_domain.trim_start_matches("http://"))
        } else {
            self.api_domain.clone()
        };
        let content = toml::to_string_pretty(&Config {
            api_domain,
            ..self.clone()
        })?;
        let mut file = fs::File::create(path).await?;
        file.write_all(content.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    /// Loads configuration from a custom file path.
    pub async fn load_from_path(path: &str) -> Result<Self, AppError> {
        let content = fs::read_to_string(path).await?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
