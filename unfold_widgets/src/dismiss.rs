// Copyright 2025 the Unfold Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Document-level dismissal: Escape and pointer-down outside an open layer.
//!
//! A host owns one [`DismissStack`] per document and forwards document-level
//! key and pointer events to it. Overlays (an open dropdown menu, for example)
//! push a [`DismissLayer`] while they are open. Layers close in LIFO order:
//! the topmost layer that accepts an event is offered it, like a modal stack.
//! A layer that does not accept a reason (see [`DismissOn`]) lets that event
//! through to the layers beneath it.
//!
//! The layer guard detaches its listener when dropped, so an overlay that
//! closes or unmounts can never leave a stale listener behind.
//!
//! ```rust
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! use kurbo::{Point, Rect};
//! use unfold_roving::Key;
//! use unfold_widgets::dismiss::{DismissOn, DismissReason, DismissStack};
//!
//! let stack = DismissStack::new();
//! let hits = Rc::new(Cell::new(0));
//! let seen = Rc::clone(&hits);
//! let bounds = vec![Rect::new(0.0, 0.0, 10.0, 10.0)];
//! let layer = stack.push(bounds, DismissOn::all(), move |reason| {
//!     assert_eq!(reason, DismissReason::PointerOutside);
//!     seen.set(seen.get() + 1);
//! });
//!
//! assert!(!stack.pointer_down(Point::new(5.0, 5.0)));
//! assert!(stack.pointer_down(Point::new(50.0, 5.0)));
//! assert_eq!(hits.get(), 1);
//!
//! drop(layer);
//! assert!(!stack.key_down(Key::Escape));
//! ```

use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

use bitflags::bitflags;
use kurbo::{Point, Rect};
use unfold_roving::Key;

/// Why a layer is being dismissed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DismissReason {
    /// `Escape` was pressed.
    EscapeKey,
    /// A pointer went down outside every bound of the layer.
    PointerOutside,
}

bitflags! {
    /// The dismiss reasons a layer accepts.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct DismissOn: u8 {
        /// Close on `Escape`.
        const ESCAPE = 1 << 0;
        /// Close on pointer-down outside the layer's bounds.
        const POINTER_OUTSIDE = 1 << 1;
    }
}

impl DismissOn {
    /// Returns `true` if `reason` is accepted.
    pub fn accepts(self, reason: DismissReason) -> bool {
        match reason {
            DismissReason::EscapeKey => self.contains(Self::ESCAPE),
            DismissReason::PointerOutside => self.contains(Self::POINTER_OUTSIDE),
        }
    }
}

type Listener = Rc<RefCell<dyn FnMut(DismissReason)>>;

struct Layer {
    id: u64,
    bounds: Vec<Rect>,
    accepts: DismissOn,
    on_dismiss: Listener,
}

#[derive(Default)]
struct Stack {
    layers: Vec<Layer>,
    next_id: u64,
}

/// LIFO stack of dismissable layers for one document.
#[derive(Clone, Default)]
pub struct DismissStack {
    inner: Rc<RefCell<Stack>>,
}

impl fmt::Debug for DismissStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DismissStack")
            .field("layers", &self.len())
            .finish_non_exhaustive()
    }
}

impl DismissStack {
    /// Create an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live layers.
    pub fn len(&self) -> usize {
        self.inner.borrow().layers.len()
    }

    /// Returns `true` if no layer is live.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Push a layer on top. It stays live until the returned guard drops.
    ///
    /// `bounds` are the regions that count as "inside" (typically the trigger
    /// and the overlay content). `accepts` names the reasons the layer closes
    /// for; other events pass through to the layers beneath.
    pub fn push(
        &self,
        bounds: Vec<Rect>,
        accepts: DismissOn,
        on_dismiss: impl FnMut(DismissReason) + 'static,
    ) -> DismissLayer {
        let mut stack = self.inner.borrow_mut();
        let id = stack.next_id;
        stack.next_id += 1;
        let on_dismiss: Listener = Rc::new(RefCell::new(on_dismiss));
        stack.layers.push(Layer {
            id,
            bounds,
            accepts,
            on_dismiss,
        });
        DismissLayer {
            id,
            stack: Rc::downgrade(&self.inner),
        }
    }

    /// Forward a document-level key press.
    ///
    /// Returns `true` if `Escape` was delivered to the topmost layer that
    /// accepts it.
    pub fn key_down(&self, key: Key) -> bool {
        if key != Key::Escape {
            return false;
        }
        self.dismiss_top(DismissReason::EscapeKey, |_| false)
    }

    /// Forward a document-level pointer-down.
    ///
    /// Layers are checked from the top. A point inside a layer stops the
    /// search. The first layer the point is outside of that accepts
    /// [`DismissOn::POINTER_OUTSIDE`] is dismissed, and `true` is returned.
    pub fn pointer_down(&self, point: Point) -> bool {
        self.dismiss_top(DismissReason::PointerOutside, |layer| {
            layer.bounds.iter().any(|r| r.contains(point))
        })
    }

    /// Offer `reason` to the topmost accepting layer. An event `inside` a
    /// layer goes no further.
    fn dismiss_top(&self, reason: DismissReason, inside: impl Fn(&Layer) -> bool) -> bool {
        // Release the stack before calling out: listeners typically drop their
        // own layer guard, which needs the stack again.
        let listener = {
            let stack = self.inner.borrow();
            let mut found = None;
            for layer in stack.layers.iter().rev() {
                if inside(layer) {
                    break;
                }
                if layer.accepts.accepts(reason) {
                    found = Some(Rc::clone(&layer.on_dismiss));
                    break;
                }
            }
            found
        };
        let Some(listener) = listener else {
            return false;
        };
        #[cfg(feature = "tracing")]
        tracing::debug!(?reason, "dismissing layer");
        let mut f = listener.borrow_mut();
        (*f)(reason);
        true
    }
}

/// Guard for one live layer of a [`DismissStack`].
pub struct DismissLayer {
    id: u64,
    stack: Weak<RefCell<Stack>>,
}

impl fmt::Debug for DismissLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DismissLayer").field("id", &self.id).finish_non_exhaustive()
    }
}

impl DismissLayer {
    /// Replace the regions that count as inside this layer.
    pub fn set_bounds(&self, bounds: Vec<Rect>) {
        if let Some(inner) = self.stack.upgrade() {
            if let Some(layer) = inner
                .borrow_mut()
                .layers
                .iter_mut()
                .find(|l| l.id == self.id)
            {
                layer.bounds = bounds;
            }
        }
    }
}

impl Drop for DismissLayer {
    fn drop(&mut self) {
        if let Some(inner) = self.stack.upgrade() {
            inner.borrow_mut().layers.retain(|l| l.id != self.id);
        }
    }
}
