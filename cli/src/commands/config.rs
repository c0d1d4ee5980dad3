// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Configuration management commands
//!
//! Commands: validate, generate

use anyhow::{bail, Context, Result};
use clap::Subcommand;
use colored::Colorize;
use std::path::PathBuf;

use hierarchy_core::domain::node_config::NodeConfigManifest;

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Validate a node configuration manifest
    Validate {
        /// Path to the manifest (default: --config / discovery)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },

    /// Generate a sample node configuration manifest
    Generate {
        /// Output path
        #[arg(short, long, default_value = "./hierarchy-config.yaml")]
        output: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

pub async fn handle(command: ConfigCommand, config_override: Option<PathBuf>) -> Result<()> {
    match command {
        ConfigCommand::Validate { file } => validate(file.or(config_override)),
        ConfigCommand::Generate { output, force } => generate(output, force),
    }
}

fn validate(path: Option<PathBuf>) -> Result<()> {
    let path = path.context("No config file given; pass a FILE or --config")?;
    let manifest = NodeConfigManifest::load(&path).context("Failed to load configuration")?;
    manifest.validate()?;
    println!(
        "{} {} (agent '{}', {} relations)",
        "Valid:".green().bold(),
        path.display(),
        manifest.spec.node.id,
        manifest.spec.relations.len()
    );
    Ok(())
}

fn generate(output: PathBuf, force: bool) -> Result<()> {
    if output.exists() && !force {
        bail!(
            "{} already exists; use --force to overwrite",
            output.display()
        );
    }
    std::fs::write(&output, NodeConfigManifest::sample())
        .with_context(|| format!("Failed to write {}", output.display()))?;
    println!("{} {}", "Generated".green().bold(), output.display());
    Ok(())
}
