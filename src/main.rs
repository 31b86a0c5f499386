// ply: Regex-driven Docker image tag utility
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Config --> Logging --> Ctrl-C token --> Command Dispatch
//!   Version | Options | DockerRegex | Git
//! ```

use std::process::ExitCode;

use tokio_util::sync::CancellationToken;
use tracing::warn;

use ply::cli::global::GlobalOptions;
use ply::cli::{self, Command};
use ply::cmd::config::run_options_command;
use ply::cmd::docker::run_docker_regex_command;
use ply::cmd::git::run_git_command;
use ply::cmd::version::run_version_command;
use ply::config::Config;
use ply::config::loader::ConfigLoader;
use ply::logging::init_logging;
use ply::logging::LogConfig;

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    if let Some(Command::Version) = cli.command {
        return finish(run_version_command(&mut std::io::stdout()));
    }

    let loader = match build_config_loader(&cli.global) {
        Ok(loader) => loader,
        Err(e) => {
            eprintln!("Failed to load config: {e:#}");
            return ExitCode::FAILURE;
        }
    };
    let loaded_files = loader.format_loaded_files();
    let config = match loader.build() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let _log_guard = match init_logging(&build_log_config(&config)) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    let token = CancellationToken::new();
    spawn_interrupt_handler(token.clone());

    let mut stdout = std::io::stdout();
    let result = match &cli.command {
        Some(Command::Version) => run_version_command(&mut stdout),
        Some(Command::Options) => run_options_command(&config, &loaded_files, &mut stdout),
        Some(Command::DockerRegex(args)) => {
            run_docker_regex_command(args, &config, token, &mut stdout).await
        }
        Some(Command::Git(args)) => run_git_command(args, &config, token, &mut stdout).await,
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            Err(anyhow::anyhow!("No command specified"))
        }
    };

    finish(result)
}

fn finish(result: ply::error::Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Cancels `token` on the first Ctrl-C.
fn spawn_interrupt_handler(token: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, cancelling");
            token.cancel();
        }
    });
}

fn build_log_config(config: &Config) -> LogConfig {
    LogConfig::builder()
        .with_console_level(config.global.output_log_level)
        .with_file_level(config.global.file_log_level)
        .maybe_with_log_file(
            config
                .global
                .log_file
                .as_ref()
                .map(|p| p.display().to_string()),
        )
        .build()
}

fn build_config_loader(global: &GlobalOptions) -> ply::error::Result<ConfigLoader> {
    let mut loader = Config::builder().add_toml_file_optional("ply.toml");
    for path in &global.configs {
        loader = loader.add_toml_file(path);
    }
    loader = loader.with_env_prefix("PLY");
    for (key, value) in global.to_config_overrides() {
        loader = loader.set(key, value)?;
    }
    Ok(loader)
}
