//! Application configuration settings
//!
//! Defines all configuration structures and loading logic

use anyhow::{Context, Result};
use serde::{Serialize, Serializer};
use std::fmt;
use std::path::{Path, PathBuf};

/// Default upstream API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default upstream timeout in seconds
pub const DEFAULT_UPSTREAM_TIMEOUT: u64 = 60;

/// Dotenv files loaded at startup, in priority order
pub const DOTENV_FILES: [&str; 2] = [".env.local", ".env"];

/// Main application configuration
#[derive(Debug, Clone, Serialize)]
pub struct Settings {
    /// Server configuration
    pub server: ServerConfig,
    /// OpenAI API configuration
    pub openai: OpenAIConfig,
    /// Request configuration
    pub request: RequestConfig,
    /// Security configuration
    pub security: SecurityConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Debug mode
    pub debug: bool,
}

/// Server configuration
#[derive(Debug, Clone, Serialize)]
pub struct ServerConfig {
    /// Listen host
    pub host: String,
    /// Listen port
    pub port: u16,
}

/// OpenAI API configuration
#[derive(Debug, Clone, Serialize)]
pub struct OpenAIConfig {
    /// API key, absent when not configured
    pub api_key: Option<ApiKey>,
    /// API base URL
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout: u64,
}

/// Request configuration
#[derive(Debug, Clone, Serialize)]
pub struct RequestConfig {
    /// Maximum request size in bytes
    pub max_request_size: usize,
}

/// Security configuration
#[derive(Debug, Clone, Serialize)]
pub struct SecurityConfig {
    /// Allowed origins for CORS
    pub allowed_origins: Vec<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize)]
pub struct LoggingConfig {
    /// Log level / filter directive
    pub level: String,
    /// Log format (text/json)
    pub format: String,
}

/// Upstream API key
///
/// Never printed: `Debug`, `Display` and `Serialize` all redact the value.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wrap a key, treating empty or blank values as absent
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            None
        } else {
            Some(Self(value))
        }
    }

    /// Raw secret, only for building the upstream `Authorization` header
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

impl Serialize for ApiKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str("***")
    }
}

impl Settings {
    /// Create a new configuration instance from the process environment
    ///
    /// `.env.local` and `.env` in the working directory are loaded first.
    /// Variables already present in the environment are never overridden.
    pub fn new() -> Result<Self> {
        load_dotenv_files(Path::new("."))?;
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get_or_default = |key: &str, default: &str| -> String {
            lookup(key).unwrap_or_else(|| default.to_string())
        };

        let debug = parse_flag(&get_or_default("DEBUG", "0"));

        // Debug mode only raises the default level, an explicit RUST_LOG wins
        let default_level = if debug { "debug" } else { "info" };

        let settings = Self {
            server: ServerConfig {
                host: get_or_default("HOST", "0.0.0.0"),
                port: get_or_default("PORT", "5000")
                    .parse()
                    .context("Invalid port number")?,
            },
            openai: OpenAIConfig {
                api_key: lookup("OPENAI_API_KEY").and_then(ApiKey::new),
                base_url: get_or_default("OPENAI_BASE_URL", DEFAULT_BASE_URL)
                    .trim_end_matches('/')
                    .to_string(),
                timeout: get_or_default("UPSTREAM_TIMEOUT", &DEFAULT_UPSTREAM_TIMEOUT.to_string())
                    .parse()
                    .context("Invalid timeout value")?,
            },
            request: RequestConfig {
                max_request_size: get_or_default("MAX_REQUEST_SIZE", "1048576")
                    .parse()
                    .context("Invalid maximum request size")?,
            },
            security: SecurityConfig {
                allowed_origins: get_or_default("ALLOWED_ORIGINS", "*")
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
            },
            logging: LoggingConfig {
                level: get_or_default("RUST_LOG", default_level),
                format: get_or_default("LOG_FORMAT", "text"),
            },
            debug,
        };

        settings.validate()?;

        Ok(settings)
    }

    /// Validate configuration validity
    fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            anyhow::bail!("Port number cannot be 0");
        }

        if !self.openai.base_url.starts_with("http") {
            anyhow::bail!("Invalid OpenAI base URL format, should start with 'http'");
        }

        if self.openai.timeout == 0 {
            anyhow::bail!("Timeout values cannot be 0");
        }

        if self.request.max_request_size == 0 {
            anyhow::bail!("Maximum request size cannot be 0");
        }

        if self.security.allowed_origins.is_empty() {
            anyhow::bail!("At least one allowed origin must be configured");
        }

        let valid_formats = ["text", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            anyhow::bail!("Invalid log format: {}", self.logging.format);
        }

        Ok(())
    }

    /// Whether an upstream API key is configured
    pub fn has_api_key(&self) -> bool {
        self.openai.api_key.is_some()
    }

    /// Whether CORS accepts any origin
    pub fn allows_any_origin(&self) -> bool {
        self.security.allowed_origins.iter().any(|origin| origin == "*")
    }

    /// Full upstream chat completion endpoint
    pub fn chat_completions_url(&self) -> String {
        format!("{}/chat/completions", self.openai.base_url)
    }

    /// Listen address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// Load dotenv files from `dir`, earlier files taking priority
///
/// Returns the files that were found and loaded.
pub fn load_dotenv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut loaded = Vec::new();

    for name in DOTENV_FILES {
        let path = dir.join(name);
        if path.exists() {
            dotenv::from_path(&path)
                .with_context(|| format!("Failed to load environment file: {:?}", path))?;
            loaded.push(path);
        }
    }

    Ok(loaded)
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
