// ply: Regex-driven Docker image tag utility
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers --> writer (stdout in main)
//!   config (options), docker (docker-regex), git, version
//! ```

pub mod config;
pub mod docker;
pub mod git;
pub mod version;
