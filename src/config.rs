//! Configuration loading and constants.
//!
//! Settings come from process environment variables and are read exactly once
//! at startup into [`AppConfig`], which is then shared immutably with every
//! handler. Response constants (greeting, version, endpoint list) and the
//! fixed Slack sender identity are defined here as well.

use const_format::formatcp;

// =============================================================================
// Environment Variables
// =============================================================================

/// Listening port
pub const ENV_PORT: &str = "PORT";

/// Environment name, checked before [`ENV_NODE_ENV`]
pub const ENV_APP_ENV: &str = "APP_ENV";

/// Environment name used by existing Knative manifests
pub const ENV_NODE_ENV: &str = "NODE_ENV";

/// Slack incoming-webhook URL (slack-relay only)
pub const ENV_SLACK_WEBHOOK_URL: &str = "SLACK_WEBHOOK_URL";

/// Overrides [`DEFAULT_SLACK_CHANNEL`]
pub const ENV_SLACK_CHANNEL: &str = "SLACK_CHANNEL";

/// Log format selector ("text" or "json")
pub const ENV_LOG_FORMAT: &str = "LOG_FORMAT";

// =============================================================================
// HTTP Server Defaults
// =============================================================================

/// Bind address; the service listens on all interfaces
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default listening port when PORT is unset
pub const DEFAULT_PORT: u16 = 8080;

/// Default environment name
pub const DEFAULT_ENVIRONMENT: &str = "production";

/// Maximum accepted request body size (100 KiB)
pub const MAX_BODY_BYTES: usize = 100 * 1024;

/// Probes and echoes must never be served from an intermediary cache
pub const CACHE_CONTROL_NO_STORE: &str = "no-store";

// =============================================================================
// Response Constants
// =============================================================================

/// Version reported by `GET /`
pub const SERVICE_VERSION: &str = "1.0.0";

pub const GREETING_MESSAGE: &str = "Hello World from Knative!";

pub const POST_RECEIVED_MESSAGE: &str = "POST request received successfully";

/// Endpoints advertised by the catch-all 404 handler
pub const AVAILABLE_ENDPOINTS: [&str; 3] = ["/", "/health", "/ready"];

// =============================================================================
// Slack Notification Defaults
// =============================================================================

/// Channel used when neither the request nor SLACK_CHANNEL names one
pub const DEFAULT_SLACK_CHANNEL: &str = "#general";

/// Sender display name shown in Slack
pub const SLACK_USERNAME: &str = "Knative Bot";

/// Sender icon shown in Slack
pub const SLACK_ICON_EMOJI: &str = ":robot_face:";

/// User-Agent sent with outbound webhook calls
pub const WEBHOOK_USER_AGENT: &str =
    formatcp!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

// =============================================================================
// Logging
// =============================================================================

/// Default log filter when neither --log-level nor RUST_LOG is set
pub const DEFAULT_LOG_FILTER: &str = "knative_hello=info,tower_http=info";

/// Default log format (text or json)
pub const DEFAULT_LOG_FORMAT: &str = "text";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// HTTP server configuration
    pub http: HttpServerConfig,
    /// Deployment environment name reported by `GET /`
    pub environment: String,
    /// Outbound Slack webhook settings
    pub slack: SlackConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone)]
pub struct HttpServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

/// Slack incoming-webhook configuration
#[derive(Debug, Clone)]
pub struct SlackConfig {
    /// Webhook URL. `None` when unset or empty; notifications then fail
    /// without touching the network.
    pub webhook_url: Option<String>,
    pub default_channel: String,
}

impl Default for SlackConfig {
    fn default() -> Self {
        Self {
            webhook_url: None,
            default_channel: DEFAULT_SLACK_CHANNEL.to_string(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log format: "text" (human-readable, default) or "json" (structured)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: DEFAULT_LOG_FORMAT.to_string(),
        }
    }
}

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            http: HttpServerConfig::default(),
            environment: DEFAULT_ENVIRONMENT.to_string(),
            slack: SlackConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Empty values are treated the same as unset ones.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let port = match var(ENV_PORT) {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        let environment = var(ENV_APP_ENV)
            .or_else(|| var(ENV_NODE_ENV))
            .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string());

        let slack = SlackConfig {
            webhook_url: var(ENV_SLACK_WEBHOOK_URL).map(|url| url.trim().to_string()),
            default_channel: var(ENV_SLACK_CHANNEL)
                .unwrap_or_else(|| DEFAULT_SLACK_CHANNEL.to_string()),
        };

        let logging = LoggingConfig {
            format: var(ENV_LOG_FORMAT).unwrap_or_else(|| DEFAULT_LOG_FORMAT.to_string()),
        };

        Ok(Self {
            http: HttpServerConfig {
                host: DEFAULT_HOST.to_string(),
                port,
            },
            environment,
            slack,
            logging,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid PORT value '{0}': expected a port number between 0 and 65535")]
    InvalidPort(String),
}
