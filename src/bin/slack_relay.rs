//! slack-relay: the hello service, relaying POST bodies to a Slack webhook.
//!
//! The webhook URL is read from SLACK_WEBHOOK_URL. When it is missing the
//! service still runs; each POST then reports a failed notification.

use clap::Parser;

use knative_hello::startup::{run, Args, Service};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    run(Service::SlackRelay, Args::parse()).await
}
