// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Versioned JSON wire schema for hierarchy bundles.
//!
//! The schema number is checked on decode; a bundle from an agent
//! speaking a different version is treated like any other corrupt
//! response (a soft fetch failure). Relation entries carry either a
//! numeric `code` or a literal `role`; when both appear the code wins.

use crate::domain::org::{
    HierarchyBundle, NodeId, OrgRelation, OrganizationNode, RelationLabel, RoleCode,
};
use serde::{Deserialize, Serialize};

pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, thiserror::Error)]
pub enum WireError {
    #[error("unsupported hierarchy schema version {0}")]
    UnsupportedSchema(u32),

    #[error("relation entry for '{0}' carries neither code nor role")]
    MissingLabel(String),

    #[error("unknown role code {code} on relation entry for '{org}'")]
    UnknownCode { org: String, code: u8 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireBundle {
    pub schema: u32,
    #[serde(rename = "rootId")]
    pub root_id: String,
    pub orgs: Vec<WireOrg>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireOrg {
    #[serde(rename = "orgId")]
    pub org_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub relations: Vec<WireRelation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireRelation {
    pub org: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl WireBundle {
    pub fn from_bundle(bundle: &HierarchyBundle) -> Self {
        Self {
            schema: SCHEMA_VERSION,
            root_id: bundle.root().to_string(),
            orgs: bundle.nodes().iter().map(WireOrg::from_node).collect(),
        }
    }

    pub fn into_bundle(self) -> Result<HierarchyBundle, WireError> {
        if self.schema != SCHEMA_VERSION {
            return Err(WireError::UnsupportedSchema(self.schema));
        }
        let mut nodes = Vec::with_capacity(self.orgs.len());
        for org in self.orgs {
            nodes.push(org.into_node()?);
        }
        // from_parts re-applies the no-duplicates invariant; decoded
        // input is untrusted.
        Ok(HierarchyBundle::from_parts(NodeId::new(self.root_id), nodes))
    }
}

impl WireOrg {
    fn from_node(node: &OrganizationNode) -> Self {
        Self {
            org_id: node.id.to_string(),
            name: node.display_name.clone(),
            relations: node
                .relations
                .iter()
                .map(|rel| match &rel.label {
                    RelationLabel::Code(code) => WireRelation {
                        org: rel.org.to_string(),
                        code: Some(code.as_u8()),
                        role: None,
                    },
                    RelationLabel::Role(role) => WireRelation {
                        org: rel.org.to_string(),
                        code: None,
                        role: Some(role.clone()),
                    },
                })
                .collect(),
        }
    }

    fn into_node(self) -> Result<OrganizationNode, WireError> {
        let mut node = OrganizationNode::new(self.org_id, self.name);
        for rel in self.relations {
            let label = match (rel.code, rel.role) {
                (Some(code), _) => RelationLabel::Code(RoleCode::from_u8(code).ok_or(
                    WireError::UnknownCode {
                        org: rel.org.clone(),
                        code,
                    },
                )?),
                (None, Some(role)) => RelationLabel::Role(role),
                (None, None) => return Err(WireError::MissingLabel(rel.org)),
            };
            node.relations.push(OrgRelation {
                org: NodeId::new(rel.org),
                label,
            });
        }
        Ok(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundle() -> HierarchyBundle {
        let mut root = OrganizationNode::new("TRANSCOM", "TRANSCOM");
        root.add_coded_relation("GlobalAir".into(), RoleCode::Subordinate);
        root.add_named_relation("JointCommand".into(), "RegionSuperior");
        let mut sub = OrganizationNode::new("GlobalAir", "GlobalAir");
        sub.add_coded_relation("PlanePacker".into(), RoleCode::AdminSubordinate);

        let mut bundle = HierarchyBundle::new("TRANSCOM".into());
        bundle.push_unique(root);
        bundle.push_unique(sub);
        bundle
    }

    #[test]
    fn bundle_roundtrips_through_the_wire() {
        let original = bundle();
        let wire = WireBundle::from_bundle(&original);
        let json = serde_json::to_string(&wire).unwrap();
        let decoded: WireBundle = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.into_bundle().unwrap(), original);
    }

    #[test]
    fn codes_serialize_as_integers() {
        let wire = WireBundle::from_bundle(&bundle());
        let json = serde_json::to_value(&wire).unwrap();
        assert_eq!(json["schema"], 1);
        assert_eq!(json["orgs"][0]["relations"][0]["code"], 1);
        assert_eq!(json["orgs"][0]["relations"][1]["role"], "RegionSuperior");
    }

    #[test]
    fn unsupported_schema_version_is_rejected() {
        let mut wire = WireBundle::from_bundle(&bundle());
        wire.schema = 2;
        assert!(matches!(
            wire.into_bundle(),
            Err(WireError::UnsupportedSchema(2))
        ));
    }

    #[test]
    fn code_takes_precedence_over_role() {
        let wire: WireBundle = serde_json::from_value(serde_json::json!({
            "schema": 1,
            "rootId": "A",
            "orgs": [{
                "orgId": "A",
                "name": "A",
                "relations": [{"org": "B", "code": 0, "role": "Subordinate"}]
            }]
        }))
        .unwrap();
        let bundle = wire.into_bundle().unwrap();
        assert_eq!(
            bundle.nodes()[0].relations[0].label,
            RelationLabel::Code(RoleCode::AdminSubordinate)
        );
    }

    #[test]
    fn unlabeled_relations_are_rejected() {
        let wire: WireBundle = serde_json::from_value(serde_json::json!({
            "schema": 1,
            "rootId": "A",
            "orgs": [{
                "orgId": "A",
                "name": "A",
                "relations": [{"org": "B"}]
            }]
        }))
        .unwrap();
        assert!(matches!(wire.into_bundle(), Err(WireError::MissingLabel(_))));
    }

    #[test]
    fn duplicate_orgs_are_dropped_on_decode() {
        let wire: WireBundle = serde_json::from_value(serde_json::json!({
            "schema": 1,
            "rootId": "A",
            "orgs": [
                {"orgId": "A", "name": "A"},
                {"orgId": "A", "name": "A again"}
            ]
        }))
        .unwrap();
        assert_eq!(wire.into_bundle().unwrap().len(), 1);
    }
}
