// Copyright 2025 the Unfold Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Unfold Widgets: headless composite widgets.
//!
//! Each composite is a module namespace exposing its root and its parts as
//! separate types:
//!
//! - [`accordion`]: `Root`, `Item`, `Trigger`, `Content`.
//! - [`dropdown`]: `Root`, `Trigger`, `Content`, `Item`.
//! - [`tabs`]: `Root`, `List`, `Trigger`, `Panel`.
//! - [`theme`]: `Root` plus the system color-scheme signal.
//!
//! The root resolves its state with [`unfold_value::ValueBinding`] (so it can be
//! controlled or uncontrolled), publishes a shared handle on its family's
//! [`ScopedContext`](unfold_context::ScopedContext), and the parts mount against
//! that context. Mounting a part outside its root's provider fails with
//! [`ContextError`]. Items register themselves in the root's
//! [`SharedRegistry`](unfold_roving::SharedRegistry) for keyboard navigation and
//! unregister when dropped.
//!
//! Nothing here renders. Parts expose their accessibility attributes as
//! [`AriaAttrs`] and report keyboard results as [`KeyOutcome`]; moving real
//! focus and painting are up to the host.
//!
//! ## Minimal example
//!
//! ```rust
//! use unfold_roving::Key;
//! use unfold_widgets::KeyOutcome;
//! use unfold_widgets::accordion::{self, AccordionConfig, Item, Root, Trigger};
//!
//! let scope = accordion::scope();
//! let root = Root::new(AccordionConfig::single(true), None, Default::default());
//! let _provider = root.provide(&scope);
//!
//! let one = Item::mount(&scope, "one", false).unwrap();
//! let two = Item::mount(&scope, "two", false).unwrap();
//!
//! let item_scope = accordion::item_scope();
//! let _item = one.provide(&item_scope);
//! let trigger = Trigger::mount(&item_scope).unwrap();
//!
//! trigger.click();
//! assert!(one.is_open());
//! assert_eq!(trigger.key_down(Key::ArrowDown), KeyOutcome::Focus("two"));
//! # drop(two);
//! ```
//!
//! ## Change callbacks
//!
//! Change callbacks run while their composite is updating. Record the value
//! and feed it back on the next render; calling into the same composite from
//! inside its own callback panics.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod accordion;
pub mod aria;
pub mod dismiss;
pub mod dropdown;
pub mod tabs;
pub mod theme;

use core::fmt;
use core::hash::Hash;

pub use aria::{AriaAttrs, element_id};
pub use unfold_context::ContextError;

/// Identifier of an item in a composite.
///
/// Ids are rendered into element ids with [`fmt::Display`], so they should be
/// unique within a composite and free of whitespace.
pub trait ItemId: Clone + Eq + Hash + fmt::Debug + fmt::Display + 'static {}

impl<T> ItemId for T where T: Clone + Eq + Hash + fmt::Debug + fmt::Display + 'static {}

/// What the host should do after forwarding a key press to a part.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyOutcome<K> {
    /// Move focus to the part registered under this id.
    Focus(K),
    /// The key activated the part (toggle, select, open…).
    Activated,
    /// The key was not handled; let it propagate.
    Ignored,
}
