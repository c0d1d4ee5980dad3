// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! The cycle-prevention ledger threaded through a traversal.
//!
//! A [`VisitedSet`] is created fresh per top-level request and passed
//! by value on every remote hop, encoded as a comma-delimited id list.
//! Within one request it only ever grows; once an id is added it is
//! never removed and never re-queued for recursion. That monotonicity,
//! plus the finite universe of agent names, is the sole termination
//! guarantee on a relationship graph that may contain cycles.

use crate::domain::org::NodeId;
use std::collections::BTreeSet;

const DELIMITER: char = ',';

/// Ordered set of already-explored agent ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisitedSet(BTreeSet<NodeId>);

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when the id was newly inserted.
    pub fn insert(&mut self, id: NodeId) -> bool {
        self.0.insert(id)
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.0.contains(id)
    }

    pub fn extend<I: IntoIterator<Item = NodeId>>(&mut self, ids: I) {
        self.0.extend(ids);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NodeId> {
        self.0.iter()
    }

    /// Serializes the set as a comma-delimited id list, in id order.
    pub fn encode(&self) -> String {
        let mut out = String::new();
        for (i, id) in self.0.iter().enumerate() {
            if i > 0 {
                out.push(DELIMITER);
            }
            out.push_str(id.as_str());
        }
        out
    }

    /// Lenient decode: empty or unparsable input yields the empty set.
    /// A missing visited-set parameter is the normal case for the
    /// initial, non-recursive call, so decoding never fails a request.
    pub fn decode(input: &str) -> Self {
        input
            .split(DELIMITER)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(NodeId::from)
            .collect()
    }
}

impl FromIterator<NodeId> for VisitedSet {
    fn from_iter<I: IntoIterator<Item = NodeId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_is_deterministic_and_ordered() {
        let mut set = VisitedSet::new();
        set.insert("GlobalSea".into());
        set.insert("TRANSCOM".into());
        set.insert("GlobalAir".into());
        assert_eq!(set.encode(), "GlobalAir,GlobalSea,TRANSCOM");
    }

    #[test]
    fn decode_roundtrips_encode() {
        let set: VisitedSet = ["A", "B", "C"].into_iter().map(NodeId::from).collect();
        assert_eq!(VisitedSet::decode(&set.encode()), set);
    }

    #[test]
    fn decode_is_lenient() {
        assert!(VisitedSet::decode("").is_empty());
        assert!(VisitedSet::decode("   ").is_empty());
        assert!(VisitedSet::decode(",,,").is_empty());

        let set = VisitedSet::decode(" A ,, B,");
        assert_eq!(set.len(), 2);
        assert!(set.contains(&"A".into()));
        assert!(set.contains(&"B".into()));
    }

    #[test]
    fn insert_reports_novelty() {
        let mut set = VisitedSet::new();
        assert!(set.insert("A".into()));
        assert!(!set.insert("A".into()));
        assert!(set.contains(&"A".into()));
    }
}
