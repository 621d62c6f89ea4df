// envmap: Platform-aware environment variable maps
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Canonical key registry for case-insensitive maps.
//!
//! ```text
//! "Path" --upper--> "PATH" --lookup--> "Path"  (first casing wins)
//! "path" --upper--> "PATH" --lookup--> "Path"
//! ```
//!
//! Bindings are never pruned: a deleted key keeps its canonical casing when
//! it is written again under a different spelling.

use std::collections::HashMap;

/// Maps uppercased keys to the first spelling written for them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CanonicalKeyRegistry {
    folded_to_canonical: HashMap<String, String>,
}

impl CanonicalKeyRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves `key` to its canonical spelling.
    ///
    /// An unseen fold is bound to `key` itself when `register_if_absent` is
    /// set; otherwise `key` is returned unchanged and the registry is left
    /// untouched.
    pub fn resolve(&mut self, key: &str, register_if_absent: bool) -> String {
        if !register_if_absent {
            return self.lookup(key).to_owned();
        }
        self.folded_to_canonical
            .entry(fold(key))
            .or_insert_with(|| key.to_owned())
            .clone()
    }

    /// Read-only form of [`resolve`](Self::resolve) without registration.
    #[must_use]
    pub fn lookup<'a>(&'a self, key: &'a str) -> &'a str {
        self.folded_to_canonical
            .get(&fold(key))
            .map_or(key, String::as_str)
    }

    /// Number of folds bound so far, including those of deleted keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.folded_to_canonical.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.folded_to_canonical.is_empty()
    }
}

fn fold(key: &str) -> String {
    key.to_uppercase()
}
