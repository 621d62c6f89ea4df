// envmap: Platform-aware environment variable maps
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Global CLI options available for all commands.
//!
//! # Option Precedence
//!
//! ```text
//! --config FILE      ← Additional config files (can repeat)
//! --log-level N      ← Console verbosity (0-5)
//! --log-file FILE    ← Also log to FILE
//! --no-default-config ← Skip ./envmap.toml
//!
//! Precedence: CLI flags > ENVMAP_* > --config > envmap.toml > defaults
//! ```

use clap::Args;
use std::path::PathBuf;

use crate::config::loader::ConfigLoader;
use crate::error::Result;

/// Name of the configuration file picked up from the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "envmap.toml";

/// Prefix of configuration environment variables.
pub const CONFIG_ENV_PREFIX: &str = "ENVMAP";

/// Global options available for all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalOptions {
    /// Path to additional TOML configuration file(s).
    /// Can be specified multiple times.
    #[arg(short = 'c', long = "config", value_name = "FILE", action = clap::ArgAction::Append)]
    pub configs: Vec<PathBuf>,

    /// Console log level (0=silent, 1=errors, 2=warnings, 3=info, 4=debug, 5=trace).
    #[arg(
        short = 'l',
        long = "log-level",
        value_name = "LEVEL",
        value_parser = clap::value_parser!(u8).range(0..=5)
    )]
    pub log_level: Option<u8>,

    /// Path to log file.
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Disables loading `envmap.toml` from the working directory.
    #[arg(long = "no-default-config")]
    pub no_default_config: bool,
}

impl GlobalOptions {
    /// Builds the configuration loader for these options.
    ///
    /// # Errors
    ///
    /// Returns an error if a command-line override cannot be applied.
    pub fn config_loader(&self) -> Result<ConfigLoader> {
        let mut loader = ConfigLoader::new();
        if !self.no_default_config {
            loader = loader.add_toml_file_optional(DEFAULT_CONFIG_FILE);
        }
        for path in &self.configs {
            loader = loader.add_toml_file(path);
        }
        loader = loader.with_env_prefix(CONFIG_ENV_PREFIX);

        if let Some(level) = self.log_level {
            loader = loader.set("global.log_level", i64::from(level))?;
        }
        if let Some(ref path) = self.log_file {
            loader = loader.set("global.log_file", path.display().to_string())?;
        }
        Ok(loader)
    }
}
