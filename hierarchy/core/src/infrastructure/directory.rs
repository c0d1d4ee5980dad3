// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Peer directory: resolves an agent name to the base URL its
//! hierarchy surface is served on.
//!
//! Addressing is configuration, not derived from the inbound request:
//! a `{agent}` URL template covers the common naming scheme and
//! per-agent overrides handle the stragglers.

use crate::domain::node_config::{PeerConfig, AGENT_PLACEHOLDER};
use crate::domain::org::NodeId;
use std::collections::HashMap;
use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("peer URL template must contain the '{{agent}}' placeholder, got '{template}'")]
    InvalidTemplate { template: String },

    #[error("invalid base URL '{url}' for agent '{agent}': {source}")]
    InvalidUrl {
        agent: String,
        url: String,
        #[source]
        source: url::ParseError,
    },
}

#[derive(Debug, Clone)]
pub struct PeerDirectory {
    template: String,
    overrides: HashMap<String, Url>,
}

impl PeerDirectory {
    pub fn new(
        template: impl Into<String>,
        overrides: HashMap<String, String>,
    ) -> Result<Self, DirectoryError> {
        let template = template.into();
        if !template.contains(AGENT_PLACEHOLDER) {
            return Err(DirectoryError::InvalidTemplate { template });
        }
        let mut parsed = HashMap::with_capacity(overrides.len());
        for (agent, url) in overrides {
            let base = Url::parse(&url).map_err(|source| DirectoryError::InvalidUrl {
                agent: agent.clone(),
                url,
                source,
            })?;
            parsed.insert(agent, base);
        }
        Ok(Self {
            template,
            overrides: parsed,
        })
    }

    pub fn from_config(config: &PeerConfig) -> Result<Self, DirectoryError> {
        Self::new(config.url_template.clone(), config.overrides.clone())
    }

    /// Base URL for a peer; overrides win over the template.
    pub fn base_url(&self, peer: &NodeId) -> Result<Url, DirectoryError> {
        if let Some(base) = self.overrides.get(peer.as_str()) {
            return Ok(base.clone());
        }
        let rendered = self.template.replace(AGENT_PLACEHOLDER, peer.as_str());
        Url::parse(&rendered).map_err(|source| DirectoryError::InvalidUrl {
            agent: peer.to_string(),
            url: rendered,
            source,
        })
    }
}
