// envmap: Platform-aware environment variable maps
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Environment variable maps.
//!
//! # Architecture
//!
//! ```text
//! EnvironmentMap (ordered canonical key -> Option<String>)
//! Sources: EnvList (JSON layers, KEY=VALUE), EnvironmentMap, pair slices
//! Ops: get/set/has/delete/keys/entries, create, merge*
//! ```
//!
//! - **Case-insensitive on Windows**: first spelling of a key is kept
//! - **Null policy**: explicit nulls are removal unless `preserve_null`
//! - **No host access**: callers capture the process environment themselves

pub mod container;
pub mod merge;
pub mod registry;
pub mod source;
pub mod types;

#[cfg(test)]
mod tests;

pub use container::EnvironmentMap;
pub use merge::{merge, merge_impl, merge_preserve_null, merge_with};
pub use registry::CanonicalKeyRegistry;
pub use source::{EnvList, EnvSource};
pub use types::{EnvOptions, EnvValue, Iter, PLATFORM_CASE_INSENSITIVE};
