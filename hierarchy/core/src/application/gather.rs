// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! # Hierarchy Gathering Service
//!
//! Top-level traversal algorithm: resolve the local agent, assemble
//! its node, pick the relation edges that are safe to recurse into,
//! fetch each unvisited candidate's sub-hierarchy through the remote
//! fetcher, and merge the partial results into one bundle.
//!
//! Candidates are processed one at a time and each fetch blocks the
//! request for its full retry budget, so a slow peer stalls every
//! ancestor waiting on it. That chain-of-blocking-calls shape is
//! deliberate; the only hard failure a caller can ever see is the
//! local agent failing to identify itself.

use crate::application::assembler;
use crate::domain::fetch::{FetchRequest, HierarchyFetcher};
use crate::domain::org::{HierarchyBundle, NodeId};
use crate::domain::relations::{RelationScope, RelationshipSource, TimeWindow};
use crate::domain::role;
use crate::domain::visited::VisitedSet;
use metrics::counter;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, warn};

/// Parameters of one top-level gather call.
#[derive(Debug, Clone, Default)]
pub struct GatherRequest {
    pub recurse: bool,
    pub all_relationships: bool,
    pub visited: VisitedSet,
}

impl GatherRequest {
    /// A fresh root request with an empty visited set.
    pub fn root(recurse: bool, all_relationships: bool) -> Self {
        Self {
            recurse,
            all_relationships,
            visited: VisitedSet::new(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GatherError {
    /// The only fatal failure mode. Everything else degrades to a
    /// missing subtree in the returned bundle.
    #[error("local agent cannot identify itself: {0}")]
    SelfResolution(String),
}

/// Recursion orchestrator for one agent node.
pub struct GatherService {
    source: Arc<dyn RelationshipSource>,
    fetcher: Arc<dyn HierarchyFetcher>,
}

impl GatherService {
    pub fn new(source: Arc<dyn RelationshipSource>, fetcher: Arc<dyn HierarchyFetcher>) -> Self {
        Self { source, fetcher }
    }

    /// Gathers the hierarchy rooted at the local agent.
    ///
    /// Termination: the visited set only grows and the universe of
    /// agent names is finite, so no node is ever expanded twice and
    /// the recursion depth is bounded by the number of distinct nodes.
    pub async fn gather(&self, request: GatherRequest) -> Result<HierarchyBundle, GatherError> {
        let identity = self
            .source
            .resolve_self()
            .await
            .map_err(|e| GatherError::SelfResolution(e.to_string()))?;

        let mut visited = request.visited;
        visited.insert(identity.id.clone());

        let scope = if request.all_relationships {
            RelationScope::All
        } else {
            RelationScope::Subordinates
        };
        let edges = match self
            .source
            .query_relations(TimeWindow::unbounded(), scope)
            .await
        {
            Ok(edges) => edges,
            Err(e) => {
                // Query trouble is not fatal; the node is reported
                // without relations.
                warn!(agent = %identity.id, error = %e, "relationship query failed");
                Vec::new()
            }
        };

        let mut bundle = HierarchyBundle::new(identity.id.clone());
        bundle.push_unique(assembler::assemble(&identity, &edges, request.all_relationships));

        if !request.recurse || edges.is_empty() {
            return Ok(bundle);
        }

        // Candidates are collected first and marked visited *before*
        // any fetch, so two siblings can never both recurse into the
        // same peer.
        let mut candidates: BTreeSet<NodeId> = BTreeSet::new();
        for edge in &edges {
            if edge.peer == identity.id {
                continue;
            }
            if !role::is_traversable(&edge.role) {
                continue;
            }
            if visited.contains(&edge.peer) {
                continue;
            }
            candidates.insert(edge.peer.clone());
        }
        visited.extend(candidates.iter().cloned());

        for peer in candidates {
            debug!(agent = %identity.id, %peer, "recursing into subordinate");
            let fetch = FetchRequest {
                all_relationships: request.all_relationships,
                visited: visited.clone(),
            };
            match self.fetcher.fetch(&peer, fetch).await {
                Some(sub) => {
                    let adopted = bundle.merge(sub);
                    debug!(agent = %identity.id, %peer, adopted, "merged sub-hierarchy");
                }
                None => {
                    // Soft failure: the subtree is simply missing from
                    // the aggregate.
                    counter!("hierarchy_subtrees_dropped_total").increment(1);
                    warn!(agent = %identity.id, %peer, "sub-hierarchy unreachable, dropping subtree");
                }
            }
        }

        Ok(bundle)
    }
}
