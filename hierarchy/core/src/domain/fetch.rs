// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Port for fetching a peer's sub-hierarchy, and the retry policy the
//! HTTP implementation applies around it.
//!
//! Remote fetches are soft by contract: every failure mode ends in
//! `None`, and the caller drops that subtree from the aggregate rather
//! than aborting the whole request.

use crate::domain::org::{HierarchyBundle, NodeId};
use crate::domain::visited::VisitedSet;
use async_trait::async_trait;
use std::time::Duration;

/// Parameters carried on a remote hop. The remote side always recurses;
/// the visited set reflects everything already explored by ancestors.
#[derive(Debug, Clone)]
pub struct FetchRequest {
    pub all_relationships: bool,
    pub visited: VisitedSet,
}

/// Single cross-network request for a peer's sub-hierarchy.
#[async_trait]
pub trait HierarchyFetcher: Send + Sync {
    /// `None` means the peer could not be reached within the retry
    /// budget; it never surfaces as an error.
    async fn fetch(&self, peer: &NodeId, request: FetchRequest) -> Option<HierarchyBundle>;
}

/// Descending backoff schedule for remote fetches.
///
/// The schedule length fixes the total attempt count; `wait_after(i)`
/// is slept between attempt `i` and `i + 1`, so the first retry waits
/// longest and the final entry is never slept on a total failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrySchedule {
    waits: Vec<Duration>,
}

impl RetrySchedule {
    pub fn new(waits: Vec<Duration>) -> Self {
        debug_assert!(!waits.is_empty());
        Self { waits }
    }

    pub fn from_secs(secs: &[u64]) -> Self {
        Self::new(secs.iter().map(|s| Duration::from_secs(*s)).collect())
    }

    pub fn from_millis(millis: &[u64]) -> Self {
        Self::new(millis.iter().map(|m| Duration::from_millis(*m)).collect())
    }

    /// Total attempts allowed, including the first.
    pub fn attempts(&self) -> usize {
        self.waits.len().max(1)
    }

    /// Wait between attempt `attempt` (zero-based) and the next, or
    /// `None` after the final attempt.
    pub fn wait_after(&self, attempt: usize) -> Option<Duration> {
        if attempt + 1 >= self.attempts() {
            None
        } else {
            self.waits.get(attempt).copied()
        }
    }
}

impl Default for RetrySchedule {
    /// Five attempts with 32s, 16s, 8s and 4s between them.
    fn default() -> Self {
        Self::from_secs(&[32, 16, 8, 4, 2])
    }
}
