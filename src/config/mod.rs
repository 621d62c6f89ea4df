// envmap: Platform-aware environment variable maps
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for envmap.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. envmap.toml (cwd, optional)
//! 3. --config FILE (repeatable)
//! 4. ENVMAP_* env vars
//! 5. CLI flags
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! ENVMAP_GLOBAL__LOG_LEVEL=4        → global.log_level = 4
//! ENVMAP_ENV__PRESERVE_NULL=true    → env.preserve_null = true
//! ENVMAP_ENV__CASE_INSENSITIVE=true → env.case_insensitive = true
//! ```
//!
//! # Example
//!
//! ```toml
//! [global]
//! log_level = 3
//!
//! [env]
//! preserve_null = true
//! case_insensitive = true
//! ```

pub mod loader;
pub mod types;


use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{ConfigError, EnvmapError, Result};

use loader::ConfigLoader;
use types::{EnvConfig, GlobalConfig};

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// Merge policy.
    pub env: EnvConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use envmap::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("envmap.toml")
    ///     .with_env_prefix("ENVMAP")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an [`EnvmapError::Config`] wrapping
    /// [`ConfigError::ParseError`] if the file cannot be read,
    /// contains invalid TOML, or does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        Self::builder().add_toml_file(path).build().map_err(|e| {
            EnvmapError::from(ConfigError::ParseError {
                path: path.display().to_string(),
                message: format!("{e:#}"),
            })
            .into()
        })
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Format configuration options for display, one `key = value` per line,
    /// with keys aligned and sorted.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        options.insert(
            "global.log_level",
            self.global.log_level.as_u8().to_string(),
        );
        options.insert(
            "global.log_file",
            self.global
                .log_file
                .as_ref()
                .map_or_else(|| "(none)".to_string(), |p| p.display().to_string()),
        );
        options.insert("env.preserve_null", self.env.preserve_null.to_string());
        options.insert(
            "env.case_insensitive",
            match self.env.case_insensitive {
                Some(value) => value.to_string(),
                None => format!("{} (platform)", self.env.resolved_case_insensitive()),
            },
        );

        let max_key_len = options.keys().map(|k| k.len()).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }
}
