// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use clap::Parser;
use exerase_api::{api::start_server, cli::Cli, version};
use std::env;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before clap reads the environment
    dotenv::dotenv().ok();

    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = Cli::parse().into_config()?;

    info!("Starting {}", version::get_version_string());
    info!(
        "Storage at {:?}, retention {}h, upload limit {} MB",
        config.storage.root,
        config.storage.retention.as_secs() / 3600,
        config.max_upload_bytes / (1024 * 1024)
    );

    start_server(config).await
}
