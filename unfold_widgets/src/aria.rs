// Copyright 2025 the Unfold Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Accessibility attribute emission.

use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

/// Ordered attribute list for one element.
///
/// Names are attribute names as a DOM host would write them (`role`,
/// `aria-expanded`, `data-state`…). Setting a name twice replaces the value
/// in place.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AriaAttrs {
    attrs: Vec<(&'static str, String)>,
}

impl AriaAttrs {
    /// An empty attribute list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `name` to `value`.
    pub fn set(&mut self, name: &'static str, value: impl Into<String>) -> &mut Self {
        let value = value.into();
        match self.attrs.iter_mut().find(|(n, _)| *n == name) {
            Some((_, v)) => *v = value,
            None => self.attrs.push((name, value)),
        }
        self
    }

    /// Builder form of [`AriaAttrs::set`].
    #[must_use]
    pub fn with(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Set a boolean state attribute (`"true"` / `"false"`).
    #[must_use]
    pub fn flag(self, name: &'static str, on: bool) -> Self {
        self.with(name, if on { "true" } else { "false" })
    }

    /// Set `name` only when `cond` holds.
    #[must_use]
    pub fn when(self, cond: bool, name: &'static str, value: impl Into<String>) -> Self {
        if cond { self.with(name, value) } else { self }
    }

    /// Value of `name`, if set.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns `true` if `name` is set.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Attributes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.attrs.iter().map(|(n, v)| (*n, v.as_str()))
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    /// Returns `true` if no attribute is set.
    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }
}

/// Element id used for `id` / `aria-controls` / `aria-labelledby` references.
pub fn element_id(prefix: &str, part: &str, id: &impl fmt::Display) -> String {
    format!("{prefix}-{part}-{id}")
}

/// `data-state` value for open/closed parts.
pub(crate) fn open_state(open: bool) -> &'static str {
    if open { "open" } else { "closed" }
}

pub(crate) fn tabindex(stop: bool) -> String {
    if stop { "0" } else { "-1" }.to_string()
}
