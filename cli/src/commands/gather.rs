// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! `gather` - query a running agent's hierarchy surface and print the
//! assembled bundle.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use url::Url;

use hierarchy_core::domain::org::HierarchyBundle;
use hierarchy_core::infrastructure::wire::WireBundle;

#[derive(Args)]
pub struct GatherArgs {
    /// Base URL of the agent to gather from (e.g. http://localhost:8800)
    #[arg(value_name = "AGENT_URL")]
    pub agent_url: String,

    /// Only snapshot the agent itself, without recursing
    #[arg(long)]
    pub no_recurse: bool,

    /// Keep full role names instead of reduced role codes
    #[arg(long)]
    pub all_relationships: bool,

    /// Print the raw wire bundle as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn handle(args: GatherArgs) -> Result<()> {
    let base = Url::parse(&args.agent_url).context("Invalid agent URL")?;
    let endpoint = base.join("hierarchy").context("Invalid agent URL")?;

    let client = reqwest::Client::new();
    let request = client.get(endpoint).query(&[
        ("recurse", if args.no_recurse { "false" } else { "true" }),
        (
            "allRelationships",
            if args.all_relationships { "true" } else { "false" },
        ),
    ]);

    let wire: WireBundle = request
        .send()
        .await
        .context("Request to agent failed")?
        .error_for_status()
        .context("Agent returned an error")?
        .json()
        .await
        .context("Agent returned an unreadable bundle")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&wire)?);
        return Ok(());
    }

    let mut bundle = wire
        .into_bundle()
        .context("Agent returned an incompatible bundle")?;
    bundle.sort_nodes();
    print!("{}", render_bundle(&bundle));
    Ok(())
}

/// Plain-text report: one block per organization, relations indented.
pub fn render_bundle(bundle: &HierarchyBundle) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} {} ({} orgs)\n",
        "Hierarchy at".bold(),
        bundle.root().as_str().bold(),
        bundle.len()
    ));
    for node in bundle.nodes() {
        out.push_str(&format!("\n{}\n", node.display_name.cyan()));
        if node.relations.is_empty() {
            out.push_str("  (no relations)\n");
        }
        for relation in &node.relations {
            out.push_str(&format!("  {:<24} {}\n", relation.org.as_str(), relation.label));
        }
    }
    out
}
