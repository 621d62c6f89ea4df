// envmap: Platform-aware environment variable maps
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Environment map struct and key resolution.
//!
//! # Architecture
//!
//! ```text
//! EnvironmentMap
//! options: EnvOptions (preserve_null, case_insensitive)
//! registry: CanonicalKeyRegistry (consulted only when case-insensitive)
//! data: EnvData (canonical key -> Option<String>, insertion order)
//!
//! set(key, v):  register(key) -> Value   => insert
//!                               Null     => insert None | remove
//!                               Unset    => remove
//! get/has/delete: lookup(key) (never registers)
//! ```

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

use super::registry::CanonicalKeyRegistry;
use super::source::EnvSource;
use super::types::{EnvData, EnvOptions, EnvValue, Iter, PLATFORM_CASE_INSENSITIVE};

/// A set of environment variables with platform-aware key comparison.
///
/// On case-insensitive maps, `Path`, `PATH` and `path` address the same
/// entry, which keeps the spelling it was first written with. Explicit nulls
/// are kept as entries only when the map was created with `preserve_null`.
///
/// Equality compares the stored entries and their order, not the policy
/// flags or the key registry.
#[derive(Clone, Default)]
pub struct EnvironmentMap {
    options: EnvOptions,
    registry: CanonicalKeyRegistry,
    data: EnvData,
}

impl EnvironmentMap {
    /// Creates an empty map with the platform's default policy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty map with the given policy.
    #[must_use]
    pub fn with_options(options: EnvOptions) -> Self {
        Self {
            options,
            registry: CanonicalKeyRegistry::new(),
            data: EnvData::default(),
        }
    }

    /// Creates a map, seeding it from `source` when one is given.
    ///
    /// Every source entry is written with [`set`](Self::set) in enumeration
    /// order, so a later entry overrides an earlier one with the same
    /// canonical key.
    #[must_use]
    pub fn create<S: EnvSource>(
        source: Option<S>,
        preserve_null: bool,
        case_insensitive: bool,
    ) -> Self {
        let mut env = Self::with_options(EnvOptions {
            preserve_null,
            case_insensitive,
        });
        if let Some(source) = source {
            env.extend_from(&source);
        }
        env
    }

    /// Creates a null-preserving map with the platform's case convention.
    #[must_use]
    pub fn create_preserve_null<S: EnvSource>(source: Option<S>) -> Self {
        Self::create(source, true, PLATFORM_CASE_INSENSITIVE)
    }

    /// Writes every entry of `source` into this map, in order.
    pub fn extend_from<S: EnvSource + ?Sized>(&mut self, source: &S) -> &mut Self {
        source.for_each_var(&mut |key, value| {
            self.set(key, value);
        });
        self
    }

    /// Returns the policy this map was created with.
    #[must_use]
    pub const fn options(&self) -> EnvOptions {
        self.options
    }

    #[must_use]
    pub const fn preserve_null(&self) -> bool {
        self.options.preserve_null
    }

    #[must_use]
    pub const fn case_insensitive(&self) -> bool {
        self.options.case_insensitive
    }

    /// Gets an entry.
    ///
    /// Returns `None` if the variable is absent and `Some(None)` if it is
    /// stored as an explicit null.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Option<&str>> {
        self.data.get(self.lookup(key))
    }

    /// Gets a variable's string value, treating stored nulls as absent.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).flatten()
    }

    /// Sets an environment variable.
    ///
    /// # Arguments
    /// * `key` - The variable name, resolved to its canonical spelling
    /// * `value` - [`EnvValue::Unset`] removes the entry, [`EnvValue::Null`]
    ///   removes it unless nulls are preserved, anything else is stored as a
    ///   string
    pub fn set(&mut self, key: &str, value: impl Into<EnvValue>) -> &mut Self {
        let key = self.register(key);
        match value.into() {
            EnvValue::Value(value) => self.data.insert(key, Some(value)),
            EnvValue::Null if self.options.preserve_null => self.data.insert(key, None),
            EnvValue::Null | EnvValue::Unset => {
                self.data.remove(&key);
            }
        }
        self
    }

    /// Returns true if an entry exists, including a stored null.
    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        self.data.contains(self.lookup(key))
    }

    /// Removes an entry, returning whether one was present.
    ///
    /// The key's canonical spelling stays registered.
    pub fn delete(&mut self, key: &str) -> bool {
        let key = if self.options.case_insensitive {
            self.registry.lookup(key)
        } else {
            key
        };
        self.data.remove(key)
    }

    /// Returns the canonical keys in insertion order.
    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &str> + ExactSizeIterator {
        self.data.iter().map(|(k, _)| k)
    }

    /// Returns the entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> Iter<'_> {
        self.data.iter()
    }

    /// Returns an iterator over the entries, same as [`entries`](Self::entries).
    #[must_use]
    pub fn iter(&self) -> Iter<'_> {
        self.data.iter()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if no variables are set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.data.len() == 0
    }

    fn lookup<'a>(&'a self, key: &'a str) -> &'a str {
        if self.options.case_insensitive {
            self.registry.lookup(key)
        } else {
            key
        }
    }

    fn register(&mut self, key: &str) -> String {
        if self.options.case_insensitive {
            self.registry.resolve(key, true)
        } else {
            key.to_owned()
        }
    }
}

impl PartialEq for EnvironmentMap {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl Eq for EnvironmentMap {}

impl<'a> IntoIterator for &'a EnvironmentMap {
    type Item = (&'a str, Option<&'a str>);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Collects pairs into a map with the platform's default policy.
impl<K: AsRef<str>, V: Into<EnvValue>> FromIterator<(K, V)> for EnvironmentMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut env = Self::new();
        env.extend(iter);
        env
    }
}

impl<K: AsRef<str>, V: Into<EnvValue>> Extend<(K, V)> for EnvironmentMap {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.set(key.as_ref(), value);
        }
    }
}

/// Renders a stored value, with explicit nulls as `null`.
struct StoredValue<'a>(Option<&'a str>);

impl fmt::Debug for StoredValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => write!(f, "{value:?}"),
            None => f.write_str("null"),
        }
    }
}

/// Debug output shows the stored entries only: `{"A": "x", "B": null}`.
impl fmt::Debug for EnvironmentMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|(k, v)| (k, StoredValue(v))))
            .finish()
    }
}

/// One `KEY=VALUE` line per entry; a stored null is written as a bare `KEY`.
impl fmt::Display for EnvironmentMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            match value {
                Some(value) => write!(f, "{key}={value}")?,
                None => f.write_str(key)?,
            }
        }
        Ok(())
    }
}

impl Serialize for EnvironmentMap {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self {
            map.serialize_entry(key, &value)?;
        }
        map.end()
    }
}
