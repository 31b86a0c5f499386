// ply: Regex-driven Docker image tag utility
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Core runtime support.
//!
//! ```text
//! core
//!  |
//!  v
//! process  ProcessBuilder --> tokio::process
//!          used by the docker CLI backend and git
//! ```

pub mod process;
