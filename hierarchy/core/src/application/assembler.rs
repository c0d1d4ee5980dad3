// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Builds the local agent's [`OrganizationNode`] from its direct
//! relation edges.

use crate::domain::org::{OrganizationNode, RelationEdge};
use crate::domain::relations::LocalIdentity;
use crate::domain::role;

/// Maps each edge to either the coarse role code (when
/// `all_relationships` is false) or the literal role name. Edges whose
/// role denotes the self-relation are dropped in both modes.
pub fn assemble(
    identity: &LocalIdentity,
    edges: &[RelationEdge],
    all_relationships: bool,
) -> OrganizationNode {
    let mut node = OrganizationNode::new(identity.id.clone(), identity.display_name.clone());
    for edge in edges {
        if role::is_self_role(&edge.role) {
            continue;
        }
        if all_relationships {
            node.add_named_relation(edge.peer.clone(), edge.role.clone());
        } else {
            node.add_coded_relation(edge.peer.clone(), role::reduce(&edge.role));
        }
    }
    node
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::org::{RelationLabel, RoleCode};

    fn identity() -> LocalIdentity {
        LocalIdentity {
            id: "TRANSCOM".into(),
            display_name: "TRANSCOM".to_string(),
        }
    }

    #[test]
    fn reduced_mode_emits_role_codes() {
        let edges = vec![
            RelationEdge::new("GlobalAir", "Subordinate"),
            RelationEdge::new("GlobalSea", "AdministrativeSubordinate"),
            RelationEdge::new("PlanePacker", "SpecialSubordinate"),
        ];
        let node = assemble(&identity(), &edges, false);

        assert_eq!(node.id.as_str(), "TRANSCOM");
        assert_eq!(node.relations.len(), 3);
        assert_eq!(
            node.relations[0].label,
            RelationLabel::Code(RoleCode::Subordinate)
        );
        assert_eq!(
            node.relations[1].label,
            RelationLabel::Code(RoleCode::AdminSubordinate)
        );
        // Unrecognized subordinate-class roles land in the plain bucket.
        assert_eq!(
            node.relations[2].label,
            RelationLabel::Code(RoleCode::Subordinate)
        );
    }

    #[test]
    fn full_mode_keeps_literal_role_names() {
        let edges = vec![
            RelationEdge::new("GlobalAir", "Subordinate"),
            RelationEdge::new("JointCommand", "RegionSuperior"),
        ];
        let node = assemble(&identity(), &edges, true);

        assert_eq!(node.relations.len(), 2);
        assert_eq!(
            node.relations[1].label,
            RelationLabel::Role("RegionSuperior".to_string())
        );
    }

    #[test]
    fn self_edges_are_dropped_in_both_modes() {
        let edges = vec![
            RelationEdge::new("TRANSCOM", "Self"),
            RelationEdge::new("TRANSCOM", "OrganizationSelf"),
            RelationEdge::new("GlobalAir", "Subordinate"),
        ];

        let reduced = assemble(&identity(), &edges, false);
        assert_eq!(reduced.relations.len(), 1);
        assert_eq!(reduced.relations[0].org.as_str(), "GlobalAir");

        let full = assemble(&identity(), &edges, true);
        assert_eq!(full.relations.len(), 1);
    }

    #[test]
    fn no_edges_yields_a_bare_node() {
        let node = assemble(&identity(), &[], false);
        assert!(node.relations.is_empty());
    }
}
