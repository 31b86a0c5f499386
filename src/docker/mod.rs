// ply: Regex-driven Docker image tag utility
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Regex-driven Docker image operations.
//!
//! ```text
//! reference  name:tag parsing, tag validation, name normalization
//! inventory  daemon listing filtered by regex
//! rewrite    pure planner: TagOps + skips
//! engine     ImageEngine: DockerCli | EngineApi
//! ops        apply plans, push, label
//! ```

pub mod engine;
pub mod inventory;
pub mod ops;
pub mod reference;
pub mod rewrite;
