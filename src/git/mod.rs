// ply: Regex-driven Docker image tag utility
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git operations module.
//!
//! ```text
//!          ops.rs
//!   clone_and_checkout
//!            |
//!      ,-----------,
//!      |  backend  |
//!      '--+-----+--'
//!         |     |
//!         v     v
//!   GitQuery  GitMutation
//!  (gix,read) (CLI, write)
//!         |     |
//!         v     v
//!  GixBackend  ShellBackend
//!   .branch    .clone
//!   .head      .checkout
//! ```

pub mod backend;
pub mod ops;
