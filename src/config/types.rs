// envmap: Platform-aware environment variable maps
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration types for envmap.
//!
//! # Config Structure
//!
//! ```text
//! Config: GlobalConfig ([global]), EnvConfig ([env])
//! EnvConfig.case_insensitive: None => platform convention
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::env::{EnvOptions, PLATFORM_CASE_INSENSITIVE};
use crate::logging::LogLevel;

/// `[global]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Console log level (0-5).
    pub log_level: LogLevel,
    /// Optional log file, written at debug level.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

/// `[env]` section: policy of merged maps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EnvConfig {
    /// Keep explicit nulls from layers as stored entries.
    pub preserve_null: bool,
    /// Fold keys case-insensitively; unset means the platform convention.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_insensitive: Option<bool>,
}

impl EnvConfig {
    /// Case folding after applying the platform default.
    #[must_use]
    pub fn resolved_case_insensitive(&self) -> bool {
        self.case_insensitive.unwrap_or(PLATFORM_CASE_INSENSITIVE)
    }

    /// Map policy described by this section.
    #[must_use]
    pub fn options(&self) -> EnvOptions {
        EnvOptions {
            preserve_null: self.preserve_null,
            case_insensitive: self.resolved_case_insensitive(),
        }
    }
}
