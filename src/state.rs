//! Shared application state for request handlers.

use std::sync::Arc;
use std::time::Instant;

use crate::config::AppConfig;
use crate::notifier::SlackNotifier;

/// Shared application state, cloneable across handlers via Arc-wrapped fields.
///
/// Everything in here is immutable after startup: the configuration read from
/// the environment, the instant the service started (for `/health` uptime),
/// and, for the Slack relay, the webhook notifier.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub started_at: Instant,
    pub notifier: Option<SlackNotifier>,
}

impl AppState {
    /// Creates state for the plain hello service.
    pub fn new(config: AppConfig) -> Self {
        Self {
            config: Arc::new(config),
            started_at: Instant::now(),
            notifier: None,
        }
    }

    /// Attaches a notifier; POST `/` then relays bodies to Slack.
    pub fn with_notifier(mut self, notifier: SlackNotifier) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Seconds since the service started.
    pub fn uptime_seconds(&self) -> f64 {
        self.started_at.elapsed().as_secs_f64()
    }
}
