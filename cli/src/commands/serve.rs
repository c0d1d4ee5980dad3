// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! `serve` - run this agent's hierarchy HTTP surface.

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;

use hierarchy_core::application::gather::GatherService;
use hierarchy_core::domain::node_config::NodeConfigManifest;
use hierarchy_core::infrastructure::directory::PeerDirectory;
use hierarchy_core::infrastructure::http_fetcher::HttpHierarchyFetcher;
use hierarchy_core::infrastructure::relations::ConfigRelationshipSource;
use hierarchy_core::presentation::api::router;

pub const DEFAULT_CONFIG_PATH: &str = "./hierarchy-config.yaml";

pub async fn handle(config_path: Option<PathBuf>) -> Result<()> {
    let path = config_path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let manifest =
        NodeConfigManifest::load(&path).context("Failed to load node configuration")?;
    manifest
        .validate()
        .context("Configuration validation failed")?;

    info!("Configuration loaded: node_id={}", manifest.spec.node.id);

    if manifest.spec.observability.prometheus {
        let addr: std::net::SocketAddr = manifest
            .spec
            .observability
            .prometheus_listen
            .parse()
            .context("Invalid Prometheus listen address")?;
        metrics_exporter_prometheus::PrometheusBuilder::new()
            .with_http_listener(addr)
            .install()
            .context("Failed to install Prometheus exporter")?;
        info!("Prometheus exporter listening on {}", addr);
    }

    let source = Arc::new(ConfigRelationshipSource::from_manifest(&manifest));
    let directory = PeerDirectory::from_config(&manifest.spec.peers)
        .context("Invalid peer directory configuration")?;
    let fetcher = Arc::new(HttpHierarchyFetcher::from_policy(
        directory,
        &manifest.spec.fetch,
    ));
    let gather = Arc::new(GatherService::new(source, fetcher));

    let app = router(gather);
    let addr = format!(
        "{}:{}",
        manifest.spec.listen.host, manifest.spec.listen.port
    );
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!(
        "Hierarchy surface for agent '{}' listening on {}",
        manifest.spec.node.id, addr
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Hierarchy surface stopped");
    Ok(())
}

async fn shutdown_signal() {
    let _ = signal::ctrl_c().await;
    info!("Shutdown signal received");
}
