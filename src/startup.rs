//! Process startup shared by both service binaries.
//!
//! Parses the command line, loads configuration from the environment,
//! initializes tracing, builds the router, and serves until a termination
//! signal arrives.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{AppConfig, LoggingConfig, DEFAULT_LOG_FILTER};
use crate::http::start_server;
use crate::notifier::SlackNotifier;
use crate::routes::create_router;
use crate::state::AppState;

/// Command-line arguments. Everything else comes from the environment.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    /// Log level filter (e.g., "knative_hello=debug,tower_http=info")
    #[arg(short, long)]
    pub log_level: Option<String>,
}

/// Which service variant to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    /// Greeting, echo, and probes
    Hello,
    /// As `Hello`, plus relaying POST bodies to a Slack webhook
    SlackRelay,
}

/// Initialize tracing with priority: CLI > env > default.
pub fn init_tracing(log_level: Option<String>, logging: &LoggingConfig) {
    let log_filter = log_level
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

    let registry =
        tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::new(&log_filter));

    if logging.is_json() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Build the application state for a service variant.
pub fn build_state(service: Service, config: AppConfig) -> Result<AppState, Box<dyn std::error::Error>> {
    let notifier = match service {
        Service::Hello => None,
        Service::SlackRelay => Some(SlackNotifier::new(&config.slack)?),
    };

    let state = AppState::new(config);
    Ok(match notifier {
        Some(notifier) => state.with_notifier(notifier),
        None => state,
    })
}

/// Run a service variant to completion.
pub async fn run(service: Service, args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;

    init_tracing(args.log_level, &config.logging);
    tracing::info!(service = ?service, "Loaded configuration");

    if service == Service::SlackRelay {
        tracing::info!(
            webhook_configured = config.slack.webhook_url.is_some(),
            default_channel = %config.slack.default_channel,
            "Slack relay enabled"
        );
    }

    let state = build_state(service, config)?;
    let config = state.config.clone();
    let app = create_router(state);

    start_server(app, &config).await?;

    Ok(())
}
