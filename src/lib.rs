// ply: Regex-driven Docker image tag utility
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |        version/options/docker/git
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              |   TOML, env, CLI layers   |
//!              '------+-------------+------'
//!                     |             |
//!                     v             v
//!                  docker          git
//!     reference/inventory/rewrite  clone + checkout
//!        engine (CLI | API), ops   gix / git CLI
//!
//!   +-----------------------------------------+
//!   |  core        async process execution    |
//!   +-----------------------------------------+
//!   |  foundation  error, logging             |
//!   +-----------------------------------------+
//! ```

pub mod cli;
pub mod cmd;
pub mod config;
pub mod core;
pub mod docker;
pub mod error;
pub mod git;
pub mod logging;
