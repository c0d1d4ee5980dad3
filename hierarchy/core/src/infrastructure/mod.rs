// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Infrastructure Layer
//!
//! Adapters behind the domain ports: the reqwest-based remote fetcher,
//! the config-backed relationship store, peer addressing, and the
//! versioned wire schema.

pub mod directory;
pub mod http_fetcher;
pub mod relations;
pub mod wire;
