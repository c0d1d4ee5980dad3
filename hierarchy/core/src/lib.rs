// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! AEGIS society hierarchy core.
//!
//! Gathers a complete organizational hierarchy that is physically
//! distributed: each agent knows only its own identity and direct
//! relationships. A request at any agent recursively contacts remote
//! agents over HTTP, merges their partial views, and terminates safely
//! on cyclic, partially reachable relationship graphs. Remote failures
//! degrade to missing subtrees rather than failing the request.
//!
//! # Architecture
//!
//! - **`domain`** — hierarchy model, role conventions, traversal ports
//! - **`application`** — node assembly and the recursion orchestrator
//! - **`infrastructure`** — reqwest fetcher, config-backed store,
//!   peer directory, wire schema
//! - **`presentation`** — the axum surface agents serve to each other

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
