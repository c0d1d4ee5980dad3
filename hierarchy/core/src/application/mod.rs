// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Application Layer
//!
//! The hierarchy gathering services: node assembly and the recursion
//! orchestrator.

pub mod assembler;
pub mod gather;
