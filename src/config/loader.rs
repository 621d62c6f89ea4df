// envmap: Platform-aware environment variable maps
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration loading from multiple sources.
//!
//! # Loader Pipeline
//!
//! ```text
//! ConfigLoader::new()
//!   .add_toml_file_optional("envmap.toml")
//!   .add_toml_file(--config)
//!   .with_env_prefix("ENVMAP")
//!   .set("env.preserve_null", true)
//!        |
//!        v
//!    build() --> Config
//! ```

use anyhow::Context;
use config::{File, FileFormat};
use std::path::{Path, PathBuf};

use super::Config;
use crate::error::{ConfigError, Result};

/// Builder for loading configuration from multiple sources.
pub struct ConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
    env_prefix: Option<String>,
    env_vars: Option<config::Map<String, String>>,
    files: Vec<(&'static str, PathBuf)>,
}

impl ConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            builder: config::Config::builder(),
            env_prefix: None,
            env_vars: None,
            files: Vec::new(),
        }
    }

    /// Adds a required TOML configuration file.
    ///
    /// The file is read by `build()`, which fails if it is missing or invalid.
    #[must_use]
    pub fn add_toml_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        let p = path.as_ref();
        self.builder = self
            .builder
            .add_source(File::from(p).format(FileFormat::Toml).required(true));
        self.files.push(("file", p.to_path_buf()));
        self
    }

    #[must_use]
    pub fn add_toml_file_optional<P: AsRef<Path>>(mut self, path: P) -> Self {
        let p = path.as_ref();
        self.builder = self
            .builder
            .add_source(File::from(p).format(FileFormat::Toml).required(false));
        if p.exists() {
            self.files.push(("optional", p.to_path_buf()));
        }
        self
    }

    #[must_use]
    pub fn add_toml_str(mut self, content: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(content, FileFormat::Toml));
        self.files.push(("string", PathBuf::from("<string>")));
        self
    }

    /// Reads `PREFIX_SECTION__KEY` variables from the process environment.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self
    }

    /// Reads prefixed variables from `vars` instead of the process environment.
    #[must_use]
    pub fn with_env_vars<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.env_vars = Some(
            vars.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    /// Sets a configuration override such as `env.preserve_null`.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is not a valid configuration path.
    pub fn set<T: Into<config::Value>>(mut self, key: &str, value: T) -> Result<Self> {
        self.builder = self
            .builder
            .set_override(key, value)
            .map_err(|e| ConfigError::InvalidValue {
                section: key.split('.').next().unwrap_or_default().to_string(),
                key: key.to_string(),
                message: e.to_string(),
            })?;
        Ok(self)
    }

    /// Builds the configuration from all added sources.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Required configuration files are missing.
    /// - Configuration files have invalid TOML syntax.
    /// - The merged configuration does not match the `Config` structure
    ///   (unknown keys, out-of-range log level, wrong value types).
    pub fn build(self) -> Result<Config> {
        let builder = match &self.env_prefix {
            Some(prefix) => {
                let vars = match &self.env_vars {
                    Some(vars) => section_vars(prefix, vars.clone()),
                    None => section_vars(prefix, std::env::vars()),
                };
                self.builder.add_source(
                    config::Environment::with_prefix(prefix)
                        .prefix_separator("_")
                        .separator("__")
                        .try_parsing(true)
                        .source(Some(vars)),
                )
            }
            None => self.builder,
        };
        let cfg = builder.build().context("failed to load configuration")?;
        let config: Config = cfg
            .try_deserialize()
            .context("invalid configuration")?;
        tracing::debug!(files = self.files.len(), "configuration loaded");
        Ok(config)
    }

    #[must_use]
    pub fn loaded_files(&self) -> &[(&'static str, PathBuf)] {
        &self.files
    }

    #[must_use]
    pub fn format_loaded_files(&self) -> Vec<String> {
        self.files
            .iter()
            .enumerate()
            .map(|(i, (source, path))| format!("{}. [{}] {}", i + 1, source, path.display()))
            .collect()
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Keeps `PREFIX_SECTION__KEY` variables; other `PREFIX_*` names are not settings.
pub(crate) fn section_vars<I>(prefix: &str, vars: I) -> config::Map<String, String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let head = format!("{}_", prefix.to_uppercase());
    vars.into_iter()
        .filter(|(key, _)| {
            key.to_uppercase()
                .strip_prefix(&head)
                .is_some_and(|rest| rest.contains("__"))
        })
        .collect()
}
