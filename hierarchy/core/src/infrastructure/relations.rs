// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Config-backed relationship store.
//!
//! Serves the local agent's identity and its declared relation edges
//! straight from the node manifest, filtered by role scope and
//! activity-window overlap.

use crate::domain::node_config::NodeConfigManifest;
use crate::domain::org::RelationEdge;
use crate::domain::relations::{
    LocalIdentity, RelationError, RelationScope, RelationshipSource, TimeWindow,
};
use crate::domain::role;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
struct DeclaredRelation {
    edge: RelationEdge,
    window: TimeWindow,
}

pub struct ConfigRelationshipSource {
    identity: LocalIdentity,
    relations: Vec<DeclaredRelation>,
}

impl ConfigRelationshipSource {
    pub fn new(identity: LocalIdentity, edges: Vec<RelationEdge>) -> Self {
        Self {
            identity,
            relations: edges
                .into_iter()
                .map(|edge| DeclaredRelation {
                    edge,
                    window: TimeWindow::unbounded(),
                })
                .collect(),
        }
    }

    pub fn from_manifest(manifest: &NodeConfigManifest) -> Self {
        let identity = LocalIdentity {
            id: manifest.spec.node.id.as_str().into(),
            display_name: manifest
                .spec
                .node
                .display_name
                .clone()
                .unwrap_or_else(|| manifest.spec.node.id.clone()),
        };
        let relations = manifest
            .spec
            .relations
            .iter()
            .map(|decl| DeclaredRelation {
                edge: RelationEdge::new(decl.org.as_str(), decl.role.as_str()),
                window: TimeWindow::new(
                    decl.start.unwrap_or(DateTime::<Utc>::MIN_UTC),
                    decl.end.unwrap_or(DateTime::<Utc>::MAX_UTC),
                ),
            })
            .collect();
        Self {
            identity,
            relations,
        }
    }
}

#[async_trait]
impl RelationshipSource for ConfigRelationshipSource {
    async fn resolve_self(&self) -> Result<LocalIdentity, RelationError> {
        if self.identity.id.is_empty() {
            return Err(RelationError::SelfResolution(
                "node manifest carries no agent id".into(),
            ));
        }
        Ok(self.identity.clone())
    }

    async fn query_relations(
        &self,
        window: TimeWindow,
        scope: RelationScope,
    ) -> Result<Vec<RelationEdge>, RelationError> {
        Ok(self
            .relations
            .iter()
            .filter(|decl| decl.window.overlaps(&window))
            .filter(|decl| match scope {
                RelationScope::All => true,
                RelationScope::Subordinates => role::is_subordinate_class(&decl.edge.role),
            })
            .map(|decl| decl.edge.clone())
            .collect())
    }
}
