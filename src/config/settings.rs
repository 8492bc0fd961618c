//! Application configuration settings
//!
//! Defines all configuration structures and loading logic

use crate::models::{ApiKeyBundle, ModelId};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Server configuration
    pub server: ServerConfig,
    /// Deployment environment
    pub environment: Environment,
    /// Upstream provider configuration
    pub providers: ProvidersConfig,
    /// API keys from the process environment
    #[serde(skip)]
    pub api_keys: ApiKeyBundle,
    /// Key store configuration
    pub key_store: KeyStoreConfig,
    /// Request configuration
    pub request: RequestConfig,
    /// Security configuration
    pub security: SecurityConfig,
    /// Backwards compatibility switches
    pub compat: CompatConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen host
    pub host: String,
    /// Listen port
    pub port: u16,
}

/// Deployment environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

/// Upstream endpoint of one provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// API base URL
    pub base_url: String,
    /// Model name sent upstream
    pub model: String,
}

/// Upstream provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvidersConfig {
    pub openai: EndpointConfig,
    pub gemini: EndpointConfig,
    pub claude: EndpointConfig,
    pub perplexity: EndpointConfig,
    /// Value of the anthropic-version header
    pub anthropic_version: String,
    /// max_tokens sent with Claude requests
    pub claude_max_tokens: u32,
    /// Upstream request timeout in seconds (client default when unset)
    pub timeout: Option<u64>,
}

/// Key store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyStoreConfig {
    /// Path of the dotenv-style key file
    pub path: PathBuf,
}

/// Request configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestConfig {
    /// Maximum request size in bytes
    pub max_request_size: usize,
}

/// Security configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Allowed origins for CORS
    pub allowed_origins: Vec<String>,
    /// Whether CORS is enabled
    pub cors_enabled: bool,
}

/// Backwards compatibility switches
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompatConfig {
    /// Report vendor failures as a 200 response carrying "Error calling <Vendor>: ..."
    pub legacy_vendor_errors: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    pub level: String,
    /// Log format (text/json)
    pub format: String,
}

impl Settings {
    /// Create a new configuration instance from the process environment
    pub fn new() -> Result<Self> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let mut api_keys = ApiKeyBundle::default();
        for model in ModelId::ALL {
            if let Some(key) = lookup(model.key_var()).filter(|k| !k.trim().is_empty()) {
                api_keys.set(model, key.trim());
            }
        }

        let timeout = match lookup("UPSTREAM_TIMEOUT") {
            Some(value) => Some(value.parse().context("Invalid upstream timeout")?),
            None => None,
        };

        let settings = Self {
            server: ServerConfig {
                host: get("SERVER_HOST", "0.0.0.0"),
                port: get("SERVER_PORT", "8000")
                    .parse()
                    .context("Invalid port number")?,
            },
            environment: Environment::parse(&get("ENVIRONMENT", "development")),
            providers: ProvidersConfig {
                openai: EndpointConfig {
                    base_url: get("OPENAI_BASE_URL", "https://api.openai.com/v1"),
                    model: get("OPENAI_MODEL", "gpt-4"),
                },
                gemini: EndpointConfig {
                    base_url: get("GEMINI_BASE_URL", "https://generativelanguage.googleapis.com/v1beta"),
                    model: get("GEMINI_MODEL", "gemini-pro"),
                },
                claude: EndpointConfig {
                    base_url: get("CLAUDE_BASE_URL", "https://api.anthropic.com/v1"),
                    model: get("CLAUDE_MODEL", "claude-3-opus-20240229"),
                },
                perplexity: EndpointConfig {
                    base_url: get("PERPLEXITY_BASE_URL", "https://api.perplexity.ai"),
                    model: get("PERPLEXITY_MODEL", "pplx-7b-online"),
                },
                anthropic_version: get("ANTHROPIC_VERSION", "2023-06-01"),
                claude_max_tokens: get("CLAUDE_MAX_TOKENS", "1024")
                    .parse()
                    .context("Invalid Claude max tokens")?,
                timeout,
            },
            api_keys,
            key_store: KeyStoreConfig {
                path: PathBuf::from(get("KEY_STORE_PATH", ".env")),
            },
            request: RequestConfig {
                max_request_size: get("MAX_REQUEST_SIZE", "10485760")
                    .parse()
                    .context("Invalid maximum request size")?,
            },
            security: SecurityConfig {
                allowed_origins: get("ALLOWED_ORIGINS", "http://localhost:5173")
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
                cors_enabled: get("CORS_ENABLED", "true")
                    .parse()
                    .context("Invalid CORS enabled flag")?,
            },
            compat: CompatConfig {
                legacy_vendor_errors: get("LEGACY_VENDOR_ERRORS", "false")
                    .parse()
                    .context("Invalid legacy vendor errors flag")?,
            },
            logging: LoggingConfig {
                level: get("RUST_LOG", "info"),
                format: get("LOG_FORMAT", "text"),
            },
        };

        settings.validate()?;

        Ok(settings)
    }

    /// Validate configuration validity
    fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            anyhow::bail!("Port number cannot be 0");
        }

        for model in ModelId::ALL {
            let endpoint = self.providers.endpoint(model);
            if !endpoint.base_url.starts_with("http") {
                anyhow::bail!(
                    "Invalid {} base URL format, should start with 'http'",
                    model.display_name()
                );
            }
            if endpoint.model.trim().is_empty() {
                anyhow::bail!("{} model name cannot be empty", model.display_name());
            }
        }

        if self.providers.timeout == Some(0) {
            anyhow::bail!("Timeout values cannot be 0");
        }

        if self.providers.claude_max_tokens == 0 {
            anyhow::bail!("Claude max tokens cannot be 0");
        }

        if self.request.max_request_size == 0 {
            anyhow::bail!("Maximum request size cannot be 0");
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            anyhow::bail!("Invalid log level: {}", self.logging.level);
        }

        let valid_formats = ["text", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            anyhow::bail!("Invalid log format: {}", self.logging.format);
        }

        Ok(())
    }

    /// Check if key writes to disk must be refused
    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }
}

impl Environment {
    fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("production") {
            Environment::Production
        } else {
            Environment::Development
        }
    }
}

impl ProvidersConfig {
    /// Endpoint configured for a model
    pub fn endpoint(&self, model: ModelId) -> &EndpointConfig {
        match model {
            ModelId::OpenAI => &self.openai,
            ModelId::Gemini => &self.gemini,
            ModelId::Claude => &self.claude,
            ModelId::Perplexity => &self.perplexity,
        }
    }

    pub fn timeout_duration(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_secs)
    }
}
