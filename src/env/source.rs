// envmap: Platform-aware environment variable maps
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Sources that can seed or be merged into an environment map.
//!
//! ```text
//! EnvSource (trait)
//!   EnvList            ordered (key, EnvValue) pairs, JSON layer files
//!   EnvironmentMap     another map, stored nulls become EnvValue::Null
//!   [(K, V)] / Vec / [(K, V); N] / BTreeMap
//! ```

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use super::container::EnvironmentMap;
use super::types::EnvValue;
use crate::error::LayerError;

/// Anything that can hand out environment entries in a stable order.
pub trait EnvSource {
    /// Calls `visit` once per entry, in enumeration order.
    fn for_each_var(&self, visit: &mut dyn FnMut(&str, EnvValue));
}

impl<T: EnvSource + ?Sized> EnvSource for &T {
    fn for_each_var(&self, visit: &mut dyn FnMut(&str, EnvValue)) {
        (**self).for_each_var(visit);
    }
}

impl EnvSource for EnvironmentMap {
    fn for_each_var(&self, visit: &mut dyn FnMut(&str, EnvValue)) {
        for (key, value) in self {
            visit(key, value.into());
        }
    }
}

impl<K, V> EnvSource for [(K, V)]
where
    K: AsRef<str>,
    V: Clone + Into<EnvValue>,
{
    fn for_each_var(&self, visit: &mut dyn FnMut(&str, EnvValue)) {
        for (key, value) in self {
            visit(key.as_ref(), value.clone().into());
        }
    }
}

impl<K, V, const N: usize> EnvSource for [(K, V); N]
where
    K: AsRef<str>,
    V: Clone + Into<EnvValue>,
{
    fn for_each_var(&self, visit: &mut dyn FnMut(&str, EnvValue)) {
        self.as_slice().for_each_var(visit);
    }
}

impl<K, V> EnvSource for Vec<(K, V)>
where
    K: AsRef<str>,
    V: Clone + Into<EnvValue>,
{
    fn for_each_var(&self, visit: &mut dyn FnMut(&str, EnvValue)) {
        self.as_slice().for_each_var(visit);
    }
}

impl<K, V> EnvSource for BTreeMap<K, V>
where
    K: AsRef<str>,
    V: Clone + Into<EnvValue>,
{
    fn for_each_var(&self, visit: &mut dyn FnMut(&str, EnvValue)) {
        for (key, value) in self {
            visit(key.as_ref(), value.clone().into());
        }
    }
}

/// An ordered key→value association list.
///
/// Unlike a map, duplicate keys are kept in the order they were added, so
/// seeding a case-insensitive map from `[("DD", ..), ("dd", ..)]` lets the
/// later pair win under the earlier spelling.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvList {
    vars: Vec<(String, EnvValue)>,
}

impl EnvList {
    #[must_use]
    pub const fn new() -> Self {
        Self { vars: Vec::new() }
    }

    /// Appends a pair.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<EnvValue>) -> &mut Self {
        self.vars.push((key.into(), value.into()));
        self
    }

    /// Returns an iterator over the pairs, in the order they were added.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &EnvValue)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.vars.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Parses a JSON object, keeping its members in document order.
    ///
    /// `null` members become [`EnvValue::Null`]; numbers, booleans, arrays
    /// and objects are stringified. `origin` names the layer in errors.
    ///
    /// # Errors
    ///
    /// Returns [`LayerError::NotAnObject`] if the document is valid JSON but
    /// not an object, or [`LayerError::ParseError`] if it is not valid JSON.
    pub fn from_json_str(content: &str, origin: &str) -> Result<Self, LayerError> {
        match serde_json::from_str::<Self>(content) {
            Ok(list) => Ok(list),
            Err(err) => match serde_json::from_str::<serde_json::Value>(content) {
                Ok(other) => Err(LayerError::NotAnObject {
                    path: origin.to_string(),
                    found: json_kind(&other),
                }),
                Err(_) => Err(LayerError::ParseError {
                    path: origin.to_string(),
                    message: err.to_string(),
                }),
            },
        }
    }

    /// Reads a JSON layer file.
    ///
    /// # Errors
    ///
    /// Returns [`LayerError::ReadError`] if the file cannot be read, otherwise
    /// the errors of [`from_json_str`](Self::from_json_str).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LayerError> {
        let path = path.as_ref();
        let shown = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|source| LayerError::ReadError {
            path: shown.clone(),
            source,
        })?;
        let list = Self::from_json_str(&content, &shown)?;
        tracing::debug!(path = %shown, vars = list.len(), "loaded environment layer");
        Ok(list)
    }

    /// Parses a `KEY=VALUE` assignment. The value may be empty or contain `=`.
    ///
    /// # Errors
    ///
    /// Returns [`LayerError::InvalidAssignment`] if there is no `=` or the
    /// name is empty.
    pub fn parse_assignment(input: &str) -> Result<(String, EnvValue), LayerError> {
        match input.split_once('=') {
            Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.into())),
            _ => Err(LayerError::InvalidAssignment {
                input: input.to_string(),
            }),
        }
    }
}

const fn json_kind(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl EnvSource for EnvList {
    fn for_each_var(&self, visit: &mut dyn FnMut(&str, EnvValue)) {
        for (key, value) in &self.vars {
            visit(key, value.clone());
        }
    }
}

impl<K: Into<String>, V: Into<EnvValue>> FromIterator<(K, V)> for EnvList {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<K: Into<String>, V: Into<EnvValue>> Extend<(K, V)> for EnvList {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.vars
            .extend(iter.into_iter().map(|(k, v)| (k.into(), v.into())));
    }
}

impl IntoIterator for EnvList {
    type Item = (String, EnvValue);
    type IntoIter = std::vec::IntoIter<(String, EnvValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.vars.into_iter()
    }
}

impl<'de> Deserialize<'de> for EnvList {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EnvListVisitor;

        impl<'de> Visitor<'de> for EnvListVisitor {
            type Value = EnvList;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object of environment variables")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut list = EnvList::new();
                while let Some((key, value)) = map.next_entry::<String, serde_json::Value>()? {
                    list.push(key, value);
                }
                Ok(list)
            }
        }

        deserializer.deserialize_map(EnvListVisitor)
    }
}
