// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Organization hierarchy model.
//!
//! The structures here are assembled fresh for every top-level
//! hierarchy request and never persisted: an [`OrganizationNode`] per
//! agent, aggregated into one [`HierarchyBundle`] whose node list is
//! kept free of duplicate ids while partial results from remote
//! agents are merged in.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque, globally unique agent name within a society
/// (e.g. `TRANSCOM`, `GlobalAir`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A directed relationship edge as known by the local agent.
///
/// Directionality is encoded in the role name only: a role ending in
/// `Superior` points upward, a `ConverseOf*` role is the logical
/// inverse of another role, and `Self` is the degenerate self-edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationEdge {
    pub peer: NodeId,
    pub role: String,
}

impl RelationEdge {
    pub fn new(peer: impl Into<NodeId>, role: impl Into<String>) -> Self {
        Self {
            peer: peer.into(),
            role: role.into(),
        }
    }
}

/// Coarse two-valued role code used when full relationship names are
/// not requested. The numeric values are part of the wire contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleCode {
    AdminSubordinate,
    Subordinate,
}

impl RoleCode {
    pub const fn as_u8(self) -> u8 {
        match self {
            RoleCode::AdminSubordinate => 0,
            RoleCode::Subordinate => 1,
        }
    }

    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(RoleCode::AdminSubordinate),
            1 => Some(RoleCode::Subordinate),
            _ => None,
        }
    }
}

impl Serialize for RoleCode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u8(self.as_u8())
    }
}

impl<'de> Deserialize<'de> for RoleCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = u8::deserialize(deserializer)?;
        RoleCode::from_u8(value)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown role code {}", value)))
    }
}

/// How a related agent is labeled on an assembled node: either the
/// reduced numeric code or the literal role name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelationLabel {
    Code(RoleCode),
    Role(String),
}

impl fmt::Display for RelationLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelationLabel::Code(code) => write!(f, "{}", code.as_u8()),
            RelationLabel::Role(role) => f.write_str(role),
        }
    }
}

/// One entry in an organization's relation list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrgRelation {
    pub org: NodeId,
    pub label: RelationLabel,
}

/// A single agent's view of itself: identity, display name, and the
/// relations discovered for it. Append-only during assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrganizationNode {
    pub id: NodeId,
    pub display_name: String,
    pub relations: Vec<OrgRelation>,
}

impl OrganizationNode {
    pub fn new(id: impl Into<NodeId>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            relations: Vec::new(),
        }
    }

    pub fn add_coded_relation(&mut self, org: NodeId, code: RoleCode) {
        self.relations.push(OrgRelation {
            org,
            label: RelationLabel::Code(code),
        });
    }

    pub fn add_named_relation(&mut self, org: NodeId, role: impl Into<String>) {
        self.relations.push(OrgRelation {
            org,
            label: RelationLabel::Role(role.into()),
        });
    }
}

/// Aggregated, deduplicated result of one traversal request.
///
/// Node order is discovery order: the local node first, then nodes
/// adopted from remote sub-bundles. No `NodeId` ever appears twice;
/// duplicate entries are rejected at merge time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HierarchyBundle {
    root: NodeId,
    nodes: Vec<OrganizationNode>,
}

impl HierarchyBundle {
    pub fn new(root: NodeId) -> Self {
        Self {
            root,
            nodes: Vec::new(),
        }
    }

    /// Rebuild a bundle from decoded parts, dropping any node whose id
    /// was already seen. Decoded input is not trusted to uphold the
    /// no-duplicates invariant.
    pub fn from_parts(root: NodeId, nodes: Vec<OrganizationNode>) -> Self {
        let mut bundle = Self::new(root);
        for node in nodes {
            bundle.push_unique(node);
        }
        bundle
    }

    pub fn root(&self) -> &NodeId {
        &self.root
    }

    pub fn nodes(&self) -> &[OrganizationNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.nodes.iter().any(|n| &n.id == id)
    }

    /// Appends a node unless its id is already present. Returns true
    /// when the node was adopted.
    pub fn push_unique(&mut self, node: OrganizationNode) -> bool {
        if self.contains(&node.id) {
            return false;
        }
        self.nodes.push(node);
        true
    }

    /// Adopts every node of `other` that is not already present.
    /// Returns the number of adopted nodes. Merging a bundle into
    /// itself is a no-op.
    pub fn merge(&mut self, other: HierarchyBundle) -> usize {
        let mut adopted = 0;
        for node in other.nodes {
            if self.push_unique(node) {
                adopted += 1;
            }
        }
        adopted
    }

    /// Orders nodes by id for stable report output.
    pub fn sort_nodes(&mut self) {
        self.nodes.sort_by(|a, b| a.id.cmp(&b.id));
    }
}
