// Copyright 2025 the Unfold Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Unfold Context: scoped contexts for compound components.
//!
//! A compound component is a root plus a family of sub-parts (trigger, item,
//! content…) sharing the root's state. Instead of threading that state through
//! every call, the root publishes it on a [`ScopedContext`] and the parts read
//! it back.
//!
//! Reading is fail-fast: outside a provider, [`ScopedContext::use_context`]
//! returns [`ContextError::MissingProvider`], whose message names the component
//! family. There is no silent default.
//!
//! ## Minimal example
//!
//! ```rust
//! use unfold_context::ScopedContext;
//!
//! let tabs: ScopedContext<u32> = ScopedContext::new("Tabs");
//!
//! let err = tabs.use_context().unwrap_err();
//! assert_eq!(
//!     err.to_string(),
//!     "Tabs compound components must be used within a Tabs component"
//! );
//!
//! {
//!     let _provider = tabs.provide(7);
//!     assert_eq!(tabs.use_context(), Ok(7));
//! }
//! // Dropping the provider ends its scope.
//! assert!(tabs.use_context().is_err());
//! ```
//!
//! ## Scoping
//!
//! Providers nest: an inner provider shadows the outer one until it drops.
//! [`Provider::set`] replaces the published value only when it differs, so a
//! root that re-provides an equal value on every render does not look like a
//! change to readers that compare values.
//!
//! Values are cloned out on read; publish cheap handles (for example an
//! `Rc<RefCell<State>>`) rather than large structs.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

/// Errors raised when a compound component is wired incorrectly.
///
/// These are programmer errors, not runtime conditions: they are never retried
/// and are expected to surface during development.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ContextError {
    /// A part read its family's context outside any provider.
    #[error("{name} compound components must be used within a {name} component")]
    MissingProvider {
        /// Name of the component family.
        name: &'static str,
    },
}

/// A named, scoped context for one compound-component family.
pub struct ScopedContext<T> {
    name: &'static str,
    stack: RefCell<Vec<T>>,
}

impl<T> fmt::Debug for ScopedContext<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let depth = self.stack.try_borrow().map(|s| s.len()).ok();
        f.debug_struct("ScopedContext")
            .field("name", &self.name)
            .field("depth", &depth)
            .finish()
    }
}

/// Create a context for the component family `name`.
pub fn create_scoped_context<T>(name: &'static str) -> ScopedContext<T> {
    ScopedContext::new(name)
}

impl<T> ScopedContext<T> {
    /// Create a context for the component family `name`.
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            stack: RefCell::new(Vec::new()),
        }
    }

    /// Name of the component family.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Number of active providers.
    pub fn depth(&self) -> usize {
        self.stack.borrow().len()
    }

    /// Publish `value` until the returned guard drops.
    pub fn provide(&self, value: T) -> Provider<'_, T> {
        let mut stack = self.stack.borrow_mut();
        stack.push(value);
        Provider {
            context: self,
            depth: stack.len() - 1,
        }
    }

    fn missing(&self) -> ContextError {
        #[cfg(feature = "tracing")]
        tracing::error!(family = self.name, "compound component used outside its provider");
        ContextError::MissingProvider { name: self.name }
    }
}

impl<T: Clone> ScopedContext<T> {
    /// Read the innermost provided value.
    pub fn use_context(&self) -> Result<T, ContextError> {
        self.try_use_context().ok_or_else(|| self.missing())
    }

    /// Read the innermost provided value, if any.
    pub fn try_use_context(&self) -> Option<T> {
        self.stack.borrow().last().cloned()
    }
}

/// Guard returned by [`ScopedContext::provide`].
///
/// Dropping it ends the provider's scope, along with any inner scopes that are
/// still open.
pub struct Provider<'a, T> {
    context: &'a ScopedContext<T>,
    depth: usize,
}

impl<T> fmt::Debug for Provider<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Provider")
            .field("name", &self.context.name)
            .field("depth", &self.depth)
            .finish()
    }
}

impl<T: PartialEq> Provider<'_, T> {
    /// Replace the published value if it differs from `value`.
    ///
    /// Returns `true` if the value changed.
    pub fn set(&self, value: T) -> bool {
        let mut stack = self.context.stack.borrow_mut();
        match stack.get_mut(self.depth) {
            Some(slot) if *slot != value => {
                *slot = value;
                true
            }
            _ => false,
        }
    }
}

impl<T> Drop for Provider<'_, T> {
    fn drop(&mut self) {
        self.context.stack.borrow_mut().truncate(self.depth);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn missing_provider_names_the_family() {
        let ctx: ScopedContext<u8> = create_scoped_context("Accordion");
        let err = ctx.use_context().unwrap_err();
        assert_eq!(err, ContextError::MissingProvider { name: "Accordion" });
        assert!(err.to_string().contains("Accordion"));
        assert_eq!(
            err.to_string(),
            "Accordion compound components must be used within a Accordion component"
        );
    }

    #[test]
    fn nested_providers_shadow() {
        let ctx = ScopedContext::new("Dropdown");
        let outer = ctx.provide(1_u32);
        {
            let _inner = ctx.provide(2);
            assert_eq!(ctx.use_context(), Ok(2));
            assert_eq!(ctx.depth(), 2);
        }
        assert_eq!(ctx.use_context(), Ok(1));
        drop(outer);
        assert_eq!(ctx.try_use_context(), None);
    }

    #[test]
    fn set_only_reports_real_changes() {
        let ctx = ScopedContext::new("Tabs");
        let provider = ctx.provide(5_i32);
        assert!(!provider.set(5));
        assert!(provider.set(6));
        assert_eq!(ctx.use_context(), Ok(6));
    }

    #[test]
    fn dropping_outer_first_closes_inner_scopes() {
        let ctx = ScopedContext::new("Tabs");
        let outer = ctx.provide('a');
        let inner = ctx.provide('b');
        drop(outer);
        assert_eq!(ctx.depth(), 0);
        // The stale inner guard neither panics nor resurrects anything.
        assert!(!inner.set('c'));
        drop(inner);
        assert!(ctx.use_context().is_err());
    }
}
