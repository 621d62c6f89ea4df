// envmap: Platform-aware environment variable maps
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Arguments for commands that read environment layers.

use clap::{Args, ValueEnum};
use std::path::PathBuf;

/// Layer files and policy flags shared by `merge`, `get` and `keys`.
#[derive(Debug, Clone, Default, Args)]
pub struct LayerArgs {
    /// JSON layer files, merged left to right.
    #[arg(value_name = "FILE")]
    pub layers: Vec<PathBuf>,

    /// Keeps explicit nulls as entries instead of dropping them.
    #[arg(short = 'n', long)]
    pub preserve_null: bool,

    /// Compares names case-insensitively (Windows convention).
    #[arg(short = 'i', long, conflicts_with = "case_sensitive")]
    pub case_insensitive: bool,

    /// Compares names exactly.
    #[arg(short = 'I', long)]
    pub case_sensitive: bool,

    /// Sets a variable after all layers, as KEY=VALUE. Can be repeated.
    #[arg(short = 's', long = "set", value_name = "KEY=VALUE", action = clap::ArgAction::Append)]
    pub assignments: Vec<String>,

    /// Removes a variable after all layers and assignments. Can be repeated.
    #[arg(short = 'u', long = "unset", value_name = "KEY", action = clap::ArgAction::Append)]
    pub unset: Vec<String>,
}

impl LayerArgs {
    /// Case folding requested on the command line, if any.
    #[must_use]
    pub const fn case_override(&self) -> Option<bool> {
        if self.case_insensitive {
            Some(true)
        } else if self.case_sensitive {
            Some(false)
        } else {
            None
        }
    }
}

/// Output format of the `merge` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON object.
    #[default]
    Json,
    /// One KEY=VALUE line per variable; nulls as a bare KEY.
    Lines,
    /// Compact debug rendering.
    Debug,
}

/// Arguments for the `merge` command.
#[derive(Debug, Clone, Args)]
pub struct MergeArgs {
    #[command(flatten)]
    pub layers: LayerArgs,

    /// Output format.
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

/// Arguments for the `get` command.
#[derive(Debug, Clone, Args)]
pub struct GetArgs {
    /// Variable name, looked up with the map's case rule.
    pub key: String,

    #[command(flatten)]
    pub layers: LayerArgs,
}

/// Arguments for the `keys` command.
#[derive(Debug, Clone, Args)]
pub struct KeysArgs {
    #[command(flatten)]
    pub layers: LayerArgs,
}
