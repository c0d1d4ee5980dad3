// HTTP Hierarchy Fetcher
//
// Crosses the network to pull a peer agent's sub-hierarchy, carrying
// the visited set so the remote side never re-explores anything its
// ancestors already saw. All failures are soft: after the retry
// budget is exhausted the subtree is reported absent, never an error.

use crate::domain::fetch::{FetchRequest, HierarchyFetcher, RetrySchedule};
use crate::domain::node_config::FetchPolicy;
use crate::domain::org::{HierarchyBundle, NodeId};
use crate::infrastructure::directory::{DirectoryError, PeerDirectory};
use crate::infrastructure::wire::{WireBundle, WireError};
use async_trait::async_trait;
use metrics::counter;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

pub const HIERARCHY_PATH: &str = "hierarchy";

#[derive(Debug, thiserror::Error)]
enum AttemptError {
    #[error(transparent)]
    Address(#[from] DirectoryError),

    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error(transparent)]
    Wire(#[from] WireError),
}

pub struct HttpHierarchyFetcher {
    client: reqwest::Client,
    directory: PeerDirectory,
    schedule: RetrySchedule,
}

impl HttpHierarchyFetcher {
    pub fn new(directory: PeerDirectory, schedule: RetrySchedule) -> Self {
        Self {
            client: reqwest::Client::new(),
            directory,
            schedule,
        }
    }

    /// Builds a fetcher from the manifest's fetch policy: backoff
    /// schedule plus per-request transport timeout.
    pub fn from_policy(directory: PeerDirectory, policy: &FetchPolicy) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(policy.request_timeout_seconds))
            .build()
            .unwrap_or_default();
        Self {
            client,
            directory,
            schedule: RetrySchedule::from_secs(&policy.backoff_seconds),
        }
    }

    async fn attempt(&self, peer: &NodeId, request: &FetchRequest) -> Result<HierarchyBundle, AttemptError> {
        let base = self.directory.base_url(peer)?;
        let endpoint = format!("{}/{}", base.as_str().trim_end_matches('/'), HIERARCHY_PATH);
        let params = [
            ("recurse", "true".to_string()),
            (
                "allRelationships",
                request.all_relationships.to_string(),
            ),
            ("visitedOrgs", request.visited.encode()),
        ];
        let url = Url::parse_with_params(&endpoint, &params).map_err(|source| {
            DirectoryError::InvalidUrl {
                agent: peer.to_string(),
                url: endpoint,
                source,
            }
        })?;

        debug!(%peer, %url, "fetching sub-hierarchy");

        let response = self.client.get(url).send().await?.error_for_status()?;
        let wire: WireBundle = response.json().await?;
        Ok(wire.into_bundle()?)
    }
}

#[async_trait]
impl HierarchyFetcher for HttpHierarchyFetcher {
    async fn fetch(&self, peer: &NodeId, request: FetchRequest) -> Option<HierarchyBundle> {
        for attempt in 0..self.schedule.attempts() {
            match self.attempt(peer, &request).await {
                Ok(bundle) => {
                    debug!(%peer, orgs = bundle.len(), attempt = attempt + 1, "got sub-hierarchy");
                    return Some(bundle);
                }
                Err(e) => {
                    counter!("hierarchy_fetch_failures_total").increment(1);
                    match self.schedule.wait_after(attempt) {
                        Some(wait) => {
                            warn!(
                                %peer,
                                attempt = attempt + 1,
                                retry_in_ms = wait.as_millis() as u64,
                                error = %e,
                                "sub-hierarchy fetch failed, retrying"
                            );
                            tokio::time::sleep(wait).await;
                        }
                        None => {
                            warn!(
                                %peer,
                                attempts = self.schedule.attempts(),
                                error = %e,
                                "sub-hierarchy fetch failed, retry budget exhausted"
                            );
                        }
                    }
                }
            }
        }
        counter!("hierarchy_fetch_exhausted_total").increment(1);
        None
    }
}
