// ply: Regex-driven Docker image tag utility
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Config-related commands for ply.

use std::io::Write;

use crate::config::Config;
use crate::error::Result;

/// Display current configuration options, then the files they came from.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn run_options_command<W: Write>(
    config: &Config,
    loaded_files: &[String],
    out: &mut W,
) -> Result<()> {
    for line in config.format_options() {
        writeln!(out, "{line}")?;
    }

    writeln!(out)?;
    if loaded_files.is_empty() {
        writeln!(out, "No configuration files loaded")?;
    } else {
        writeln!(out, "Configuration files:")?;
        for line in loaded_files {
            writeln!(out, "  {line}")?;
        }
    }
    Ok(())
}
