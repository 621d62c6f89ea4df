// envmap: Platform-aware environment variable maps
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Merge, get and keys command implementations.
//!
//! ```text
//! config.env + CLI flags --> EnvOptions
//! FILE... --> EnvList (each) --+
//! --set K=V, --unset K --------+--> merge_with() --> print
//! ```

use tracing::{debug, info};

use crate::cli::layers::{GetArgs, KeysArgs, LayerArgs, MergeArgs, OutputFormat};
use crate::config::Config;
use crate::env::{EnvList, EnvValue, EnvironmentMap, merge_with};
use crate::error::{EnvmapError, Result};

/// Loads the layers named by `args` and merges them under the configured policy.
///
/// Command-line assignments are applied after every file, then removals.
///
/// # Errors
///
/// Returns an error if a layer file cannot be read or parsed, or an
/// assignment is not of the form `KEY=VALUE`.
pub fn build_environment(args: &LayerArgs, config: &Config) -> Result<EnvironmentMap> {
    let mut options = config.env.options();
    if args.preserve_null {
        options.preserve_null = true;
    }
    if let Some(case_insensitive) = args.case_override() {
        options.case_insensitive = case_insensitive;
    }

    let mut layers = Vec::with_capacity(args.layers.len() + 1);
    for path in &args.layers {
        layers.push(EnvList::from_file(path).map_err(EnvmapError::from)?);
    }
    layers.push(command_line_layer(args)?);

    debug!(
        files = args.layers.len(),
        preserve_null = options.preserve_null,
        case_insensitive = options.case_insensitive,
        "merging layers"
    );
    let env = merge_with(options, layers.iter().map(Some));
    info!(vars = env.len(), "merged environment");
    Ok(env)
}

fn command_line_layer(args: &LayerArgs) -> Result<EnvList> {
    let mut layer = EnvList::new();
    for assignment in &args.assignments {
        let (key, value) = EnvList::parse_assignment(assignment).map_err(EnvmapError::from)?;
        layer.push(key, value);
    }
    layer.extend(args.unset.iter().map(|key| (key.as_str(), EnvValue::Unset)));
    Ok(layer)
}

/// Renders a map in the requested output format.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render(env: &EnvironmentMap, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(env)?,
        OutputFormat::Lines => env.to_string(),
        OutputFormat::Debug => format!("{env:?}"),
    })
}

/// Main handler for the merge command.
///
/// # Errors
///
/// Returns an error if the layers cannot be loaded.
pub fn run_merge_command(args: &MergeArgs, config: &Config) -> Result<()> {
    let env = build_environment(&args.layers, config)?;
    let output = render(&env, args.format)?;
    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}

/// Main handler for the get command.
///
/// A stored null prints an empty line.
///
/// # Errors
///
/// Returns an error if the layers cannot be loaded or the variable is absent.
pub fn run_get_command(args: &GetArgs, config: &Config) -> Result<()> {
    let env = build_environment(&args.layers, config)?;
    match env.get(&args.key) {
        Some(value) => {
            println!("{}", value.unwrap_or_default());
            Ok(())
        }
        None => {
            let message = format!("variable '{}' is not set", args.key);
            Err(EnvmapError::Other(message.into_boxed_str()).into())
        }
    }
}

/// Main handler for the keys command.
///
/// # Errors
///
/// Returns an error if the layers cannot be loaded.
pub fn run_keys_command(args: &KeysArgs, config: &Config) -> Result<()> {
    let env = build_environment(&args.layers, config)?;
    for key in env.keys() {
        println!("{key}");
    }
    Ok(())
}
