// envmap: Platform-aware environment variable maps
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for envmap using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! envmap [global options] <command>
//! merge [FILE...] [--set K=V] [--unset K] [--format json|lines|debug]
//! get KEY [FILE...]
//! keys [FILE...]
//! options
//! version
//! ```

pub mod global;
pub mod layers;


use crate::cli::global::GlobalOptions;
use crate::cli::layers::{GetArgs, KeysArgs, MergeArgs};
use clap::{Parser, Subcommand};

/// Platform-aware environment variable maps.
#[derive(Debug, Parser)]
#[command(
    name = "envmap",
    author,
    version,
    about = "Merge environment variable layers",
    long_about = "envmap Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Merges JSON objects of environment variables left to right.\n\
                  A null value removes a variable unless --preserve-null is given.\n\
                  With --case-insensitive (the default on Windows) PATH, Path and\n\
                  path are one variable that keeps the spelling it first had.",
    after_help = "CONFIG FILES:\n\n\
                  envmap reads `envmap.toml` from the current directory if it\n\
                  exists, then every --config file in order, then ENVMAP_*\n\
                  environment variables (e.g. ENVMAP_ENV__PRESERVE_NULL=true).\n\
                  Use --no-default-config to skip `envmap.toml`."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    Version,

    /// Lists the resolved configuration options.
    Options,

    /// Merges layers and prints the result.
    Merge(MergeArgs),

    /// Prints one variable of the merged layers.
    Get(GetArgs),

    /// Prints the variable names of the merged layers, in order.
    Keys(KeysArgs),
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}
