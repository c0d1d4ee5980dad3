// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Hierarchy Node Configuration Types
//
// Defines the configuration manifest for a hierarchy agent node,
// including:
// - Kubernetes-style manifest format (apiVersion/kind/metadata/spec)
// - Node identity (society name, display name)
// - HTTP listen address
// - Peer directory (URL template + per-agent overrides)
// - Remote fetch policy (descending backoff, request timeout)
// - Declared relation edges with optional activity windows
// - Observability settings

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

pub const API_VERSION: &str = "100monkeys.ai/v1";
pub const KIND: &str = "HierarchyNodeConfig";

/// Placeholder substituted with the peer's agent name when building
/// remote URLs from the directory template.
pub const AGENT_PLACEHOLDER: &str = "{agent}";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Top-level Kubernetes-style node configuration manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeConfigManifest {
    /// API version (must be "100monkeys.ai/v1")
    #[serde(rename = "apiVersion")]
    pub api_version: String,

    /// Resource kind (must be "HierarchyNodeConfig")
    pub kind: String,

    /// Node metadata (name, labels, version)
    pub metadata: ManifestMetadata,

    /// Node configuration specification
    pub spec: NodeConfigSpec,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestMetadata {
    /// Human-readable manifest name
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub labels: HashMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeConfigSpec {
    /// Identity of the local agent
    pub node: NodeIdentity,

    /// HTTP listen address for the hierarchy surface
    #[serde(default)]
    pub listen: ListenConfig,

    /// How to address remote agents
    #[serde(default)]
    pub peers: PeerConfig,

    /// Remote fetch retry policy
    #[serde(default)]
    pub fetch: FetchPolicy,

    /// Relation edges the local agent knows about
    #[serde(default)]
    pub relations: Vec<RelationDecl>,

    /// Observability settings
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeIdentity {
    /// Unique agent name within the society (also the wire id)
    pub id: String,

    /// Optional pretty name for reports; defaults to the id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListenConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeerConfig {
    /// Base-URL template; `{agent}` is replaced with the peer name
    #[serde(default = "default_url_template")]
    pub url_template: String,

    /// Per-agent base-URL overrides, tried before the template
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub overrides: HashMap<String, String>,
}

impl Default for PeerConfig {
    fn default() -> Self {
        Self {
            url_template: default_url_template(),
            overrides: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchPolicy {
    /// Waits between remote fetch attempts, in seconds. The list
    /// length fixes the attempt count; the first retry waits longest.
    #[serde(default = "default_backoff_seconds")]
    pub backoff_seconds: Vec<u64>,

    /// Per-request transport timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl Default for FetchPolicy {
    fn default() -> Self {
        Self {
            backoff_seconds: default_backoff_seconds(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationDecl {
    /// Related agent name
    pub org: String,

    /// Role name of the related agent relative to this one
    pub role: String,

    /// Optional activity window start; unbounded when omitted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<DateTime<Utc>>,

    /// Optional activity window end; unbounded when omitted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservabilityConfig {
    /// Expose a Prometheus scrape endpoint from the serve command
    #[serde(default)]
    pub prometheus: bool,

    /// Scrape listener address
    #[serde(default = "default_prometheus_listen")]
    pub prometheus_listen: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            prometheus: false,
            prometheus_listen: default_prometheus_listen(),
        }
    }
}

// Defaults
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    8800
}
fn default_url_template() -> String {
    format!("http://{}:8800", AGENT_PLACEHOLDER)
}
fn default_backoff_seconds() -> Vec<u64> {
    vec![32, 16, 8, 4, 2]
}
fn default_request_timeout() -> u64 {
    30
}
fn default_prometheus_listen() -> String {
    "127.0.0.1:9464".to_string()
}

impl NodeConfigManifest {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let manifest: NodeConfigManifest = serde_yaml::from_str(&raw)?;
        Ok(manifest)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_version != API_VERSION {
            return Err(ConfigError::Invalid(format!(
                "apiVersion must be '{}', got '{}'",
                API_VERSION, self.api_version
            )));
        }
        if self.kind != KIND {
            return Err(ConfigError::Invalid(format!(
                "kind must be '{}', got '{}'",
                KIND, self.kind
            )));
        }
        if self.spec.node.id.trim().is_empty() {
            return Err(ConfigError::Invalid("spec.node.id cannot be empty".into()));
        }
        if self.spec.fetch.backoff_seconds.is_empty() {
            return Err(ConfigError::Invalid(
                "spec.fetch.backoffSeconds cannot be empty (its length is the attempt count)"
                    .into(),
            ));
        }
        if !self.spec.peers.url_template.contains(AGENT_PLACEHOLDER) {
            return Err(ConfigError::Invalid(format!(
                "spec.peers.urlTemplate must contain the '{}' placeholder",
                AGENT_PLACEHOLDER
            )));
        }
        for rel in &self.spec.relations {
            if rel.org.trim().is_empty() || rel.role.trim().is_empty() {
                return Err(ConfigError::Invalid(
                    "spec.relations entries need both org and role".into(),
                ));
            }
            if let (Some(start), Some(end)) = (rel.start, rel.end) {
                if start >= end {
                    return Err(ConfigError::Invalid(format!(
                        "relation to '{}' has an empty activity window",
                        rel.org
                    )));
                }
            }
        }
        Ok(())
    }

    /// Starter manifest for `config generate`.
    pub fn sample() -> String {
        format!(
            r#"apiVersion: {api_version}
kind: {kind}
metadata:
  name: transcom-hierarchy-node
spec:
  node:
    id: TRANSCOM
    displayName: TRANSCOM
  listen:
    host: 0.0.0.0
    port: 8800
  peers:
    # {{agent}} is replaced with the peer's society name
    urlTemplate: "http://{{agent}}.society.local:8800"
    overrides:
      GlobalAir: "http://10.0.0.12:8800"
  fetch:
    # waits between attempts; list length = attempt count
    backoffSeconds: [32, 16, 8, 4, 2]
    requestTimeoutSeconds: 30
  relations:
    - org: GlobalAir
      role: Subordinate
    - org: GlobalSea
      role: AdministrativeSubordinate
    - org: JointCommand
      role: AdministrativeSuperior
  observability:
    prometheus: false
"#,
            api_version = API_VERSION,
            kind = KIND,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_parses_and_validates() {
        let manifest: NodeConfigManifest =
            serde_yaml::from_str(&NodeConfigManifest::sample()).unwrap();
        manifest.validate().unwrap();
        assert_eq!(manifest.spec.node.id, "TRANSCOM");
        assert_eq!(manifest.spec.fetch.backoff_seconds, vec![32, 16, 8, 4, 2]);
        assert_eq!(
            manifest.spec.peers.overrides.get("GlobalAir").unwrap(),
            "http://10.0.0.12:8800"
        );
        assert_eq!(manifest.spec.relations.len(), 3);
    }

    #[test]
    fn minimal_manifest_gets_defaults() {
        let yaml = r#"
apiVersion: 100monkeys.ai/v1
kind: HierarchyNodeConfig
metadata:
  name: minimal
spec:
  node:
    id: A
"#;
        let manifest: NodeConfigManifest = serde_yaml::from_str(yaml).unwrap();
        manifest.validate().unwrap();
        assert_eq!(manifest.spec.listen.port, 8800);
        assert_eq!(manifest.spec.fetch.backoff_seconds.len(), 5);
        assert!(manifest.spec.relations.is_empty());
        assert!(!manifest.spec.observability.prometheus);
    }

    #[test]
    fn empty_node_id_is_rejected() {
        let mut manifest: NodeConfigManifest =
            serde_yaml::from_str(&NodeConfigManifest::sample()).unwrap();
        manifest.spec.node.id = "  ".into();
        assert!(manifest.validate().is_err());
    }

    #[test]
    fn empty_backoff_schedule_is_rejected() {
        let mut manifest: NodeConfigManifest =
            serde_yaml::from_str(&NodeConfigManifest::sample()).unwrap();
        manifest.spec.fetch.backoff_seconds.clear();
        assert!(manifest.validate().is_err());
    }

    #[test]
    fn template_without_placeholder_is_rejected() {
        let mut manifest: NodeConfigManifest =
            serde_yaml::from_str(&NodeConfigManifest::sample()).unwrap();
        manifest.spec.peers.url_template = "http://static-host:8800".into();
        assert!(manifest.validate().is_err());
    }

    #[test]
    fn wrong_kind_is_rejected() {
        let mut manifest: NodeConfigManifest =
            serde_yaml::from_str(&NodeConfigManifest::sample()).unwrap();
        manifest.kind = "AgentManifest".into();
        assert!(manifest.validate().is_err());
    }
}
