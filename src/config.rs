use std::env;

/// Default root of the GitHub REST API.
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address
    pub host: String,
    /// Server port
    pub port: u16,
    /// Optional bearer credential for the GitHub API; raises the rate limit
    pub github_token: Option<String>,
    /// Root URL of the GitHub REST API (overridable for tests)
    pub github_api_url: String,
    /// Converter binary invoked to produce the PDF
    pub pandoc_bin: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let port = env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("PORT"))?;

        let github_token = env::var("GITHUB_TOKEN").ok().filter(|t| !t.is_empty());

        let github_api_url = env::var("GITHUB_API_URL")
            .unwrap_or_else(|_| DEFAULT_GITHUB_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let pandoc_bin = env::var("PANDOC_BIN").unwrap_or_else(|_| "pandoc".to_string());

        Ok(Self {
            host,
            port,
            github_token,
            github_api_url,
            pandoc_bin,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(&'static str),
}
