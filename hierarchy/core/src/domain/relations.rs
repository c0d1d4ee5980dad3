// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Port to the local relationship store.
//!
//! The traversal engine depends on exactly two operations being
//! available locally: resolving the agent's own identity and querying
//! its direct relation edges within a time window. Implementations
//! live in `infrastructure/`.

use crate::domain::org::RelationEdge;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// The local agent's resolved identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalIdentity {
    pub id: crate::domain::org::NodeId,
    pub display_name: String,
}

/// Half-open activity window a relationship query is evaluated
/// against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// The default query window: all relationships ever known.
    pub fn unbounded() -> Self {
        Self {
            start: DateTime::<Utc>::MIN_UTC,
            end: DateTime::<Utc>::MAX_UTC,
        }
    }

    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    pub fn overlaps(&self, other: &TimeWindow) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl Default for TimeWindow {
    fn default() -> Self {
        Self::unbounded()
    }
}

/// Which role classes a relation query is restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationScope {
    /// Only the `Subordinate` / `AdministrativeSubordinate` classes.
    Subordinates,
    /// Every edge the local store knows about.
    All,
}

#[derive(Debug, thiserror::Error)]
pub enum RelationError {
    /// The local agent cannot identify itself. This is a configuration
    /// error, not a transient fault, and is never retried.
    #[error("local agent cannot identify itself: {0}")]
    SelfResolution(String),

    #[error("relationship query failed: {0}")]
    Query(String),
}

/// Narrow typed contract to the collaborator relationship store.
#[async_trait]
pub trait RelationshipSource: Send + Sync {
    async fn resolve_self(&self) -> Result<LocalIdentity, RelationError>;

    async fn query_relations(
        &self,
        window: TimeWindow,
        scope: RelationScope,
    ) -> Result<Vec<RelationEdge>, RelationError>;
}
