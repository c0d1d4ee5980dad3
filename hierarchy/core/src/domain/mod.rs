// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Domain Layer
//!
//! Pure hierarchy model, role conventions, the traversal ports, and
//! the node configuration manifest.

pub mod fetch;
pub mod node_config;
pub mod org;
pub mod relations;
pub mod role;
pub mod visited;
