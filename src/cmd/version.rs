// ply: Regex-driven Docker image tag utility
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `version` command.

use std::io::Write;

use crate::error::Result;

const UNKNOWN: &str = "???";

/// Git revision baked in at build time through `PLY_BUILD_GIT`.
#[must_use]
pub fn build_git_revision() -> &'static str {
    option_env!("PLY_BUILD_GIT").unwrap_or(UNKNOWN)
}

/// UTC build timestamp baked in at build time through `PLY_BUILD_DATE`.
#[must_use]
pub fn build_timestamp() -> &'static str {
    option_env!("PLY_BUILD_DATE").unwrap_or(UNKNOWN)
}

/// Prints version and build information.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn run_version_command<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "Version: {}", env!("CARGO_PKG_VERSION"))?;
    writeln!(out, "Git Revision: {}", build_git_revision())?;
    writeln!(out, "UTC Timestamp: {}", build_timestamp())?;
    Ok(())
}
