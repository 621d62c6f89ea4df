// envmap: Platform-aware environment variable maps
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Merging several sources into a fresh map.
//!
//! ```text
//! merge_impl(preserve_null, case_insensitive, [Some(a), None, Some(b)])
//!   new map --set(a..)--> --skip--> --set(b..)--> result
//! ```
//!
//! Later sources override earlier ones key by key, using the same rules as
//! [`EnvironmentMap::set`]: a later null removes the entry unless nulls are
//! preserved, a later [`EnvValue::Unset`](super::types::EnvValue::Unset)
//! always removes it.

use super::container::EnvironmentMap;
use super::source::EnvSource;
use super::types::{EnvOptions, PLATFORM_CASE_INSENSITIVE};

/// Merges `sources` left to right into a new map with the given policy.
///
/// `None` sources are skipped.
#[must_use]
pub fn merge_impl<S, I>(preserve_null: bool, case_insensitive: bool, sources: I) -> EnvironmentMap
where
    S: EnvSource,
    I: IntoIterator<Item = Option<S>>,
{
    let mut env = EnvironmentMap::with_options(EnvOptions {
        preserve_null,
        case_insensitive,
    });
    let mut applied = 0_usize;
    for source in sources.into_iter().flatten() {
        env.extend_from(&source);
        applied += 1;
    }
    tracing::trace!(
        sources = applied,
        vars = env.len(),
        preserve_null,
        case_insensitive,
        "merged environment"
    );
    env
}

/// Merges with nulls treated as removal and the platform's case convention.
#[must_use]
pub fn merge<S, I>(sources: I) -> EnvironmentMap
where
    S: EnvSource,
    I: IntoIterator<Item = Option<S>>,
{
    merge_impl(false, PLATFORM_CASE_INSENSITIVE, sources)
}

/// Merges keeping explicit nulls, with the platform's case convention.
#[must_use]
pub fn merge_preserve_null<S, I>(sources: I) -> EnvironmentMap
where
    S: EnvSource,
    I: IntoIterator<Item = Option<S>>,
{
    merge_impl(true, PLATFORM_CASE_INSENSITIVE, sources)
}

/// Merges with an explicit policy.
#[must_use]
pub fn merge_with<S, I>(options: EnvOptions, sources: I) -> EnvironmentMap
where
    S: EnvSource,
    I: IntoIterator<Item = Option<S>>,
{
    merge_impl(options.preserve_null, options.case_insensitive, sources)
}
