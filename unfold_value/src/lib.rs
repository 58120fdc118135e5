// Copyright 2025 the Unfold Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Unfold Value: one rule for "whose state is truth".
//!
//! Every interactive composite (a toggle, a disclosure, a selection) holds a
//! piece of state that is either:
//! - **controlled**: the host owns it and pushes it in on every render, or
//! - **uncontrolled**: the composite owns it, seeded from a default.
//!
//! [`ValueBinding`] resolves both modes into a single current value plus a
//! single setter, so the rest of a composite never branches on the mode.
//!
//! ## Minimal example
//!
//! ```rust
//! use unfold_value::ValueBinding;
//!
//! // Uncontrolled: the binding owns the state.
//! let mut open = ValueBinding::new(None, false);
//! open.set_value(true);
//! assert!(*open.current());
//!
//! // Controlled: `set_value` only reports the request.
//! let mut open = ValueBinding::new(Some(false), false);
//! open.set_value(true);
//! assert!(!*open.current());
//! // The host feeds the new value back on its next render.
//! open.sync(Some(true));
//! assert!(*open.current());
//! ```
//!
//! ## Mode is fixed
//!
//! The mode is decided once, at construction, from whether a controlled value
//! was supplied. Switching modes later is unsupported: [`ValueBinding::sync`]
//! ignores mismatched input and reports [`SyncOutcome::ModeMismatch`]. With the
//! `tracing` feature enabled a warning is also emitted.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::boxed::Box;
use core::fmt;

/// Change callback invoked with the requested next value.
pub type OnChange<T> = Box<dyn FnMut(&T)>;

/// Who owns the authoritative value of a [`ValueBinding`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BindingMode {
    /// The host owns the value and re-supplies it on every render.
    Controlled,
    /// The binding owns the value, seeded from a default.
    Uncontrolled,
}

/// Result of feeding a render's controlled value into [`ValueBinding::sync`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SyncOutcome {
    /// The input matched the binding's mode and was applied (or was a no-op).
    Applied,
    /// The input implied a different mode than the one fixed at construction.
    ///
    /// The input was ignored.
    ModeMismatch,
}

/// A piece of state that is either externally controlled or internally owned.
pub struct ValueBinding<T> {
    mode: BindingMode,
    // Last supplied value when controlled, internal state otherwise.
    value: T,
    on_change: Option<OnChange<T>>,
}

impl<T: fmt::Debug> fmt::Debug for ValueBinding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueBinding")
            .field("mode", &self.mode)
            .field("value", &self.value)
            .field("on_change", &self.on_change.is_some())
            .finish()
    }
}

impl<T> ValueBinding<T> {
    /// Create a binding from an optional controlled value and a default.
    ///
    /// The binding is controlled for its whole lifetime iff `controlled` is `Some`.
    /// In that case `default` is discarded.
    pub fn new(controlled: Option<T>, default: T) -> Self {
        match controlled {
            Some(value) => Self::controlled(value),
            None => Self::uncontrolled(default),
        }
    }

    /// Create a controlled binding.
    pub fn controlled(value: T) -> Self {
        Self {
            mode: BindingMode::Controlled,
            value,
            on_change: None,
        }
    }

    /// Create an uncontrolled binding seeded from `default`.
    pub fn uncontrolled(default: T) -> Self {
        Self {
            mode: BindingMode::Uncontrolled,
            value: default,
            on_change: None,
        }
    }

    /// Install the change callback, builder style.
    #[must_use]
    pub fn with_on_change(mut self, f: impl FnMut(&T) + 'static) -> Self {
        self.on_change = Some(Box::new(f));
        self
    }

    /// Install or clear the change callback.
    pub fn set_on_change(&mut self, f: Option<OnChange<T>>) {
        self.on_change = f;
    }

    /// The mode fixed at construction.
    pub fn mode(&self) -> BindingMode {
        self.mode
    }

    /// Returns `true` if the host owns the value.
    pub fn is_controlled(&self) -> bool {
        self.mode == BindingMode::Controlled
    }

    /// The value to render with.
    pub fn current(&self) -> &T {
        &self.value
    }

    /// Request a new value.
    ///
    /// Uncontrolled bindings store `next`. Controlled bindings never
    /// self-mutate. In both modes the change callback, if any, is invoked.
    pub fn set_value(&mut self, next: T) {
        if let Some(f) = self.on_change.as_mut() {
            f(&next);
        }
        if self.mode == BindingMode::Uncontrolled {
            self.value = next;
        }
    }

    /// Feed this render's controlled value (or its absence).
    ///
    /// A controlled binding adopts `Some(value)`. An uncontrolled binding
    /// expects `None`. Anything else is a mid-lifecycle mode switch, which is
    /// unsupported: the input is ignored and [`SyncOutcome::ModeMismatch`] is
    /// returned.
    pub fn sync(&mut self, controlled: Option<T>) -> SyncOutcome {
        match (self.mode, controlled) {
            (BindingMode::Controlled, Some(value)) => {
                self.value = value;
                SyncOutcome::Applied
            }
            (BindingMode::Uncontrolled, None) => SyncOutcome::Applied,
            (_, _) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    mode = ?self.mode,
                    "value binding switched between controlled and uncontrolled; ignoring"
                );
                SyncOutcome::ModeMismatch
            }
        }
    }
}

impl<T: Default> Default for ValueBinding<T> {
    fn default() -> Self {
        Self::uncontrolled(T::default())
    }
}
