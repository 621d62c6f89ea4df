// envmap: Platform-aware environment variable maps
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!      EnvmapError (~24 bytes)
//!             |
//!   +---------+---------+
//!   |         |         |
//!   v         v         v
//! Layer     Config    Other
//!  Box       Box     Box<str>
//!
//! Sub-errors (unboxed internally):
//!   Layer   ReadError, ParseError, NotAnObject, InvalidAssignment
//!   Config  InvalidValue, ParseError
//! ```
//!
//! The map itself never fails; these errors only arise when reading layer
//! files, settings, or command-line input.

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`EnvmapError`].
pub type EnvmapResult<T> = std::result::Result<T, EnvmapError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum EnvmapError {
    /// Environment layer could not be read or parsed.
    #[error("layer error: {0}")]
    Layer(#[from] Box<LayerError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Generic error with message.
    #[error("{0}")]
    Other(Box<str>),
}

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for EnvmapError {
                fn from(err: $error) -> Self {
                    EnvmapError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    LayerError => Layer,
    ConfigError => Config,
}

// --- Layer Errors ---

/// Errors reading an environment layer (a JSON object of variables or a
/// `KEY=VALUE` assignment).
#[derive(Debug, Error)]
pub enum LayerError {
    /// Failed to read the layer file.
    #[error("failed to read layer '{path}': {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Layer content is not valid JSON.
    #[error("failed to parse layer '{path}': {message}")]
    ParseError { path: String, message: String },

    /// Layer content is valid JSON but not an object.
    #[error("layer '{path}' must be a JSON object, found {found}")]
    NotAnObject { path: String, found: &'static str },

    /// Command-line assignment without a `=` or with an empty name.
    #[error("invalid assignment '{input}': expected KEY=VALUE")]
    InvalidAssignment { input: String },
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: String, message: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
}
