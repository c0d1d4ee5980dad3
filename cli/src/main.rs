// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! # AEGIS Hierarchy CLI
//!
//! The `aegis-hierarchy` binary runs one society agent and queries
//! running agents.
//!
//! ## Commands
//!
//! - `aegis-hierarchy serve` - Run the agent's hierarchy HTTP surface
//! - `aegis-hierarchy gather <agent-url>` - Gather a hierarchy from a
//!   running agent and print it
//! - `aegis-hierarchy config validate|generate` - Manifest tooling

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

use commands::{ConfigCommand, GatherArgs};

/// AEGIS society hierarchy agent
#[derive(Parser)]
#[command(name = "aegis-hierarchy")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to the node configuration manifest
    #[arg(
        short,
        long,
        global = true,
        env = "AEGIS_HIERARCHY_CONFIG",
        value_name = "FILE"
    )]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "AEGIS_HIERARCHY_LOG_LEVEL", default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the agent's hierarchy HTTP surface
    Serve,

    /// Gather a hierarchy from a running agent
    Gather(GatherArgs),

    /// Configuration management
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Serve => commands::serve::handle(cli.config).await,
        Commands::Gather(args) => commands::gather::handle(args).await,
        Commands::Config { command } => commands::config::handle(command, cli.config).await,
    }
}
