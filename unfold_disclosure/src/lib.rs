// Copyright 2025 the Unfold Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Unfold Disclosure: which items of a disclosure widget are open.
//!
//! Accordion-like widgets keep a set of open item identifiers and mutate it
//! through exactly one entry point, a toggle. This crate provides:
//!
//! - [`toggled`]: the pure transition, `(open, id, config) -> open'`.
//! - [`DisclosureSet`]: the transition wired to a [`ValueBinding`] so the open
//!   set can be either host-controlled or internally owned.
//!
//! ## Transition rules
//!
//! - [`DisclosureMode::Multiple`]: toggling a present id removes it, toggling
//!   an absent id appends it. Toggling twice is the identity.
//! - [`DisclosureMode::Single`]: toggling a closed id makes it the only open
//!   one. Toggling the open id closes it only if the config is `collapsible`;
//!   otherwise the set is unchanged, but the change callback still fires.
//!
//! Disabled items are not known here. Callers must drop toggles for disabled
//! items before they reach [`DisclosureSet::toggle`].
//!
//! ## Minimal example
//!
//! ```rust
//! use unfold_disclosure::{DisclosureConfig, DisclosureSet, OpenIds};
//!
//! let mut set = DisclosureSet::uncontrolled(DisclosureConfig::single(true), OpenIds::new());
//! set.toggle(&"i1");
//! assert_eq!(set.open_ids(), ["i1"]);
//! set.toggle(&"i2");
//! assert_eq!(set.open_ids(), ["i2"]);
//! set.toggle(&"i2");
//! assert!(set.open_ids().is_empty());
//! ```
//!
//! ## Controlled sets
//!
//! When constructed with a controlled value the set never changes on its own:
//! [`DisclosureSet::toggle`] reports the next value through the change callback
//! and the host passes it back with [`DisclosureSet::sync`]. Synced values
//! replace the open set wholesale and are not validated against the mode.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use core::fmt;

use smallvec::SmallVec;
use unfold_value::{SyncOutcome, ValueBinding};

pub use smallvec;

/// Open item identifiers, in the order they were opened.
pub type OpenIds<K> = SmallVec<[K; 4]>;

/// Expansion mode of a disclosure widget.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum DisclosureMode {
    /// At most one item is open.
    #[default]
    Single,
    /// Any number of items may be open.
    Multiple,
}

/// Static configuration of a [`DisclosureSet`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct DisclosureConfig {
    /// Expansion mode.
    pub mode: DisclosureMode,
    /// Whether the last open item can be closed in [`DisclosureMode::Single`].
    ///
    /// Ignored in [`DisclosureMode::Multiple`].
    pub collapsible: bool,
}

impl DisclosureConfig {
    /// Single-expansion configuration.
    pub const fn single(collapsible: bool) -> Self {
        Self {
            mode: DisclosureMode::Single,
            collapsible,
        }
    }

    /// Multiple-expansion configuration.
    pub const fn multiple() -> Self {
        Self {
            mode: DisclosureMode::Multiple,
            collapsible: true,
        }
    }
}

/// Compute the open set after toggling `id`.
///
/// In single mode an externally injected set holding several ids is
/// normalized: the result never holds more than one id.
pub fn toggled<K: Clone + Eq>(open: &[K], id: &K, config: DisclosureConfig) -> OpenIds<K> {
    let present = open.contains(id);
    match config.mode {
        DisclosureMode::Multiple => {
            if present {
                open.iter().filter(|k| *k != id).cloned().collect()
            } else {
                let mut next: OpenIds<K> = open.iter().cloned().collect();
                next.push(id.clone());
                next
            }
        }
        DisclosureMode::Single => {
            if present && config.collapsible {
                OpenIds::new()
            } else {
                let mut next = OpenIds::new();
                next.push(id.clone());
                next
            }
        }
    }
}

/// The open set of a multi-item disclosure widget.
pub struct DisclosureSet<K> {
    config: DisclosureConfig,
    binding: ValueBinding<OpenIds<K>>,
}

impl<K: fmt::Debug> fmt::Debug for DisclosureSet<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DisclosureSet")
            .field("config", &self.config)
            .field("binding", &self.binding)
            .finish()
    }
}

impl<K: Clone + Eq> DisclosureSet<K> {
    /// Create a set from an optional controlled value and a default.
    pub fn new(
        config: DisclosureConfig,
        controlled: Option<OpenIds<K>>,
        default: OpenIds<K>,
    ) -> Self {
        Self {
            config,
            binding: ValueBinding::new(controlled, default),
        }
    }

    /// Create an internally owned set seeded from `default`.
    pub fn uncontrolled(config: DisclosureConfig, default: OpenIds<K>) -> Self {
        Self::new(config, None, default)
    }

    /// Create a host-controlled set.
    pub fn controlled(config: DisclosureConfig, value: OpenIds<K>) -> Self {
        Self::new(config, Some(value), OpenIds::new())
    }

    /// Install the change callback, builder style.
    #[must_use]
    pub fn with_on_change(mut self, f: impl FnMut(&OpenIds<K>) + 'static) -> Self {
        self.binding = self.binding.with_on_change(f);
        self
    }

    /// Install the change callback.
    pub fn set_on_change(&mut self, f: impl FnMut(&OpenIds<K>) + 'static) {
        self.binding.set_on_change(Some(alloc::boxed::Box::new(f)));
    }

    /// Static configuration.
    pub fn config(&self) -> DisclosureConfig {
        self.config
    }

    /// Returns `true` if the host owns the open set.
    pub fn is_controlled(&self) -> bool {
        self.binding.is_controlled()
    }

    /// Currently open ids.
    pub fn open_ids(&self) -> &[K] {
        self.binding.current()
    }

    /// Returns `true` if `id` is open.
    pub fn is_open(&self, id: &K) -> bool {
        self.open_ids().contains(id)
    }

    /// Toggle `id`. This is the only mutation entry point.
    pub fn toggle(&mut self, id: &K) {
        let next = toggled(self.open_ids(), id, self.config);
        #[cfg(feature = "tracing")]
        tracing::trace!(
            mode = ?self.config.mode,
            before = self.open_ids().len(),
            after = next.len(),
            "disclosure toggle"
        );
        self.binding.set_value(next);
    }

    /// Feed this render's controlled value (or `None` when uncontrolled).
    pub fn sync(&mut self, controlled: Option<OpenIds<K>>) -> SyncOutcome {
        self.binding.sync(controlled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::RefCell;
    use smallvec::smallvec;

    #[test]
    fn single_collapsible_walkthrough() {
        let mut set = DisclosureSet::uncontrolled(DisclosureConfig::single(true), OpenIds::new());
        set.toggle(&"i1");
        assert_eq!(set.open_ids(), ["i1"]);
        set.toggle(&"i2");
        assert_eq!(set.open_ids(), ["i2"]);
        set.toggle(&"i2");
        assert!(set.open_ids().is_empty());
    }

    #[test]
    fn single_non_collapsible_keeps_last_open() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&calls);
        let mut set = DisclosureSet::uncontrolled(DisclosureConfig::single(false), smallvec!["a"])
            .with_on_change(move |v| sink.borrow_mut().push(v.to_vec()));

        set.toggle(&"a");
        assert_eq!(set.open_ids(), ["a"]);
        // The callback still fires with the unchanged value.
        assert_eq!(*calls.borrow(), [alloc::vec!["a"]]);
    }

    #[test]
    fn multiple_appends_and_removes() {
        let mut set = DisclosureSet::uncontrolled(DisclosureConfig::multiple(), smallvec!["i1"]);
        set.toggle(&"i2");
        assert!(set.is_open(&"i1"));
        assert!(set.is_open(&"i2"));
        set.toggle(&"i1");
        assert_eq!(set.open_ids(), ["i2"]);
    }

    #[test]
    fn single_normalizes_injected_multi_value() {
        let next = toggled(&["a", "b"], &"b", DisclosureConfig::single(false));
        assert_eq!(next.as_slice(), ["b"]);
        let next = toggled(&["a", "b"], &"b", DisclosureConfig::single(true));
        assert!(next.is_empty());
    }

    #[test]
    fn controlled_set_reports_but_does_not_change() {
        let seen = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&seen);
        let mut set = DisclosureSet::controlled(DisclosureConfig::multiple(), smallvec![1_u32])
            .with_on_change(move |v: &OpenIds<u32>| *sink.borrow_mut() = Some(v.clone()));

        set.toggle(&2);
        assert_eq!(set.open_ids(), [1]);
        let requested = seen.borrow_mut().take();
        assert_eq!(requested.as_deref(), Some(&[1, 2][..]));

        // External replacement bypasses the transition rules.
        set.sync(Some(smallvec![7, 8, 9]));
        assert_eq!(set.open_ids(), [7, 8, 9]);
    }
}
