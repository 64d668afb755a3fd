// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! # Pet/Store Aggregator Server
//!
//! Binds the HTTP surface from the core crate, wires the reqwest
//! upstream adapters, and installs tracing plus the Prometheus
//! recorder. Upstream base URLs come from flags or the environment;
//! the retry/timeout policy itself is fixed in the core.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use metrics_exporter_prometheus::PrometheusBuilder;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;
use tracing_subscriber::EnvFilter;

use petstore_aggregator_core::application::AggregationService;
use petstore_aggregator_core::infrastructure::http::{HttpPetClient, HttpStoreClient};
use petstore_aggregator_core::infrastructure::metrics::FallbackCounter;
use petstore_aggregator_core::presentation::api::{app, AppState};

/// Pet/store aggregator - composes one response from two upstreams
#[derive(Parser)]
#[command(name = "petstore-aggregator")]
#[command(version, about, long_about = None)]
struct Cli {
    /// HTTP bind host
    #[arg(long, env = "AGGREGATOR_HOST", default_value = "127.0.0.1")]
    host: String,

    /// HTTP bind port
    #[arg(long, env = "AGGREGATOR_PORT", default_value = "8080")]
    port: u16,

    /// Base URL of the upstream pet service
    #[arg(long, env = "PET_SERVICE_URL", default_value = "http://localhost:8081")]
    pet_service_url: String,

    /// Base URL of the upstream store service
    #[arg(long, env = "STORE_SERVICE_URL", default_value = "http://localhost:8082")]
    store_service_url: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "AGGREGATOR_LOG_LEVEL", default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .init();

    // Install before any counter is constructed so every handle
    // registers with this recorder.
    let prometheus = PrometheusBuilder::new()
        .install_recorder()
        .context("Failed to install Prometheus recorder")?;

    // One connection pool shared by both upstream adapters.
    let http = reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(3))
        .build()
        .context("Failed to create HTTP client")?;

    let pets = Arc::new(HttpPetClient::new(http.clone(), cli.pet_service_url.clone()));
    let stores = Arc::new(HttpStoreClient::new(http, cli.store_service_url.clone()));
    let fallbacks = Arc::new(FallbackCounter::new());
    let aggregation = Arc::new(AggregationService::new(pets, stores, fallbacks.clone()));

    let router = app(AppState {
        aggregation,
        fallbacks,
        prometheus: Some(prometheus),
    });

    let addr = format!("{}:{}", cli.host, cli.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!(
        "Aggregator listening on {} (pet upstream: {}, store upstream: {})",
        addr, cli.pet_service_url, cli.store_service_url
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("Aggregator shut down");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }
}
