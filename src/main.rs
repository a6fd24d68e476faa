//! hello-knative: greeting, JSON echo, and health probes.

use clap::Parser;

use knative_hello::startup::{run, Args, Service};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    run(Service::Hello, Args::parse()).await
}
