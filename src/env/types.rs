// envmap: Platform-aware environment variable maps
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Types for environment variable management.
//!
//! # Architecture
//!
//! ```text
//! EnvValue: Unset | Null | Value(String)   (what a writer supplies)
//! EnvOptions: preserve_null + case_insensitive (fixed per map)
//! EnvData: Vec<(key, Option<String>)> + key -> slot index (insertion order)
//! ```

use bon::Builder;
use std::collections::HashMap;

/// Whether the host platform treats environment variable names case-insensitively.
pub const PLATFORM_CASE_INSENSITIVE: bool = cfg!(windows);

/// A value supplied to [`EnvironmentMap::set`](super::container::EnvironmentMap::set).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EnvValue {
    /// No value provided; the variable is removed.
    #[default]
    Unset,
    /// Explicit null; stored only when the map preserves nulls.
    Null,
    /// A string value.
    Value(String),
}

impl EnvValue {
    /// Returns the string value, if any.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Value(v) => Some(v),
            Self::Unset | Self::Null => None,
        }
    }
}

impl From<&str> for EnvValue {
    fn from(value: &str) -> Self {
        Self::Value(value.to_owned())
    }
}

impl From<String> for EnvValue {
    fn from(value: String) -> Self {
        Self::Value(value)
    }
}

impl From<&String> for EnvValue {
    fn from(value: &String) -> Self {
        Self::Value(value.clone())
    }
}

impl<T: Into<Self>> From<Option<T>> for EnvValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Macro to generate stringifying `From` implementations for scalar types.
macro_rules! impl_from_display {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl From<$ty> for EnvValue {
                fn from(value: $ty) -> Self {
                    Self::Value(value.to_string())
                }
            }
        )+
    };
}

impl_from_display! {
    bool, char,
    i8, i16, i32, i64, i128, isize,
    u8, u16, u32, u64, u128, usize,
    f32, f64,
}

impl From<serde_json::Value> for EnvValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => Self::Null,
            Value::String(s) => Self::Value(s),
            Value::Bool(b) => Self::Value(b.to_string()),
            Value::Number(n) => match n.as_f64() {
                Some(f) if n.is_f64() => f.into(),
                _ => Self::Value(n.to_string()),
            },
            compound @ (Value::Array(_) | Value::Object(_)) => Self::Value(compound.to_string()),
        }
    }
}

/// Policy flags of an environment map, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Builder)]
pub struct EnvOptions {
    /// Keep explicit nulls as stored entries instead of treating them as removal.
    #[builder(default = false)]
    pub preserve_null: bool,
    /// Fold keys to uppercase for identity (Windows convention).
    #[builder(default = PLATFORM_CASE_INSENSITIVE)]
    pub case_insensitive: bool,
}

impl Default for EnvOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Insertion-ordered storage keyed by canonical name.
///
/// `None` values are explicit nulls. Removing an entry and inserting it again
/// moves it to the end.
#[derive(Debug, Clone, Default)]
pub(super) struct EnvData {
    vars: Vec<(String, Option<String>)>,
    slots: HashMap<String, usize>,
}

impl EnvData {
    pub(super) fn get(&self, key: &str) -> Option<Option<&str>> {
        self.slots
            .get(key)
            .map(|&slot| self.vars[slot].1.as_deref())
    }

    pub(super) fn contains(&self, key: &str) -> bool {
        self.slots.contains_key(key)
    }

    pub(super) fn insert(&mut self, key: String, value: Option<String>) {
        if let Some(&slot) = self.slots.get(&key) {
            self.vars[slot].1 = value;
        } else {
            self.slots.insert(key.clone(), self.vars.len());
            self.vars.push((key, value));
        }
    }

    pub(super) fn remove(&mut self, key: &str) -> bool {
        let Some(slot) = self.slots.remove(key) else {
            return false;
        };
        self.vars.remove(slot);
        for (k, _) in &self.vars[slot..] {
            if let Some(index) = self.slots.get_mut(k) {
                *index -= 1;
            }
        }
        true
    }

    pub(super) fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.vars.iter(),
        }
    }

    pub(super) const fn len(&self) -> usize {
        self.vars.len()
    }
}

/// Iterator over `(key, value)` pairs of an environment map, in insertion order.
///
/// A `None` value is an explicitly stored null.
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    inner: std::slice::Iter<'a, (String, Option<String>)>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, Option<&'a str>);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner
            .next_back()
            .map(|(k, v)| (k.as_str(), v.as_deref()))
    }
}

impl ExactSizeIterator for Iter<'_> {}
