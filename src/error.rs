use thiserror::Error;

/// Errors surfaced by the dashboard.
///
/// Feed failures carry the URL that failed so the message shown in a score frame or the
/// status line points at the offending request.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Request to results feed failed: {0}")]
    ApiFetch(#[from] reqwest::Error),

    #[error("Could not decode feed data: {0}")]
    ApiParse(#[from] serde_json::Error),

    #[error("Feed resource not found (404): {url}")]
    ApiNotFound { url: String },

    #[error("Feed server error ({status}): {message} (URL: {url})")]
    ApiServerError {
        status: u16,
        message: String,
        url: String,
    },

    #[error("Feed rejected request ({status}): {message} (URL: {url})")]
    ApiClientError {
        status: u16,
        message: String,
        url: String,
    },

    #[error("Feed rate limit exceeded (429): {message} (URL: {url})")]
    ApiRateLimit { message: String, url: String },

    #[error("Feed temporarily unavailable ({status}): {message} (URL: {url})")]
    ApiServiceUnavailable {
        status: u16,
        message: String,
        url: String,
    },

    #[error("Timed out waiting for: {url}")]
    NetworkTimeout { url: String },

    #[error("Could not connect to {url}: {message}")]
    NetworkConnection { url: String, message: String },

    #[error("Feed sent invalid JSON: {message} (URL: {url})")]
    ApiMalformedJson { message: String, url: String },

    #[error("Feed data has an unexpected shape: {message} (URL: {url})")]
    ApiUnexpectedStructure { message: String, url: String },

    #[error("Feed returned no data: {message} (URL: {url})")]
    ApiNoData { message: String, url: String },

    #[error("Fetch task failed: {0}")]
    FetchTask(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not write config: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Could not read config: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid date: {0}")]
    DateTimeParse(String),

    #[error("Log setup error: {0}")]
    LogSetup(String),
}

impl AppError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn datetime_parse_error(msg: impl Into<String>) -> Self {
        Self::DateTimeParse(msg.into())
    }

    pub fn log_setup_error(msg: impl Into<String>) -> Self {
        Self::LogSetup(msg.into())
    }

    pub fn api_not_found(url: impl Into<String>) -> Self {
        Self::ApiNotFound { url: url.into() }
    }

    /// 5xx other than 502/503.
    pub fn api_server_error(status: u16, message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::ApiServerError {
            status,
            message: message.into(),
            url: url.into(),
        }
    }

    /// 4xx other than 404 and 429.
    pub fn api_client_error(status: u16, message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::ApiClientError {
            status,
            message: message.into(),
            url: url.into(),
        }
    }

    pub fn api_rate_limit(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::ApiRateLimit {
            message: message.into(),
            url: url.into(),
        }
    }

    /// 502 and 503.
    pub fn api_service_unavailable(
        status: u16,
        message: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self::ApiServiceUnavailable {
            status,
            message: message.into(),
            url: url.into(),
        }
    }

    pub fn network_timeout(url: impl Into<String>) -> Self {
        Self::NetworkTimeout { url: url.into() }
    }

    pub fn network_connection(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NetworkConnection {
            url: url.into(),
            message: message.into(),
        }
    }

    pub fn api_malformed_json(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::ApiMalformedJson {
            message: message.into(),
            url: url.into(),
        }
    }

    pub fn api_unexpected_structure(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::ApiUnexpectedStructure {
            message: message.into(),
            url: url.into(),
        }
    }

    pub fn api_no_data(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::ApiNoData {
            message: message.into(),
            url: url.into(),
        }
    }

    pub fn fetch_task_failed(message: impl Into<String>) -> Self {
        Self::FetchTask(message.into())
    }

    /// True for failures of the remote feed, as opposed to local config, date or I/O
    /// problems.
    pub fn is_fetch_error(&self) -> bool {
        !matches!(
            self,
            AppError::Io(_)
                | AppError::TomlSerialize(_)
                | AppError::TomlDeserialize(_)
                | AppError::Config(_)
                | AppError::DateTimeParse(_)
                | AppError::LogSetup(_)
        )
    }
}
