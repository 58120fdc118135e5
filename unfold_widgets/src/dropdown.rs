// Copyright 2025 the Unfold Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dropdown menu: a trigger that opens a list of selectable items.
//!
//! The open state is a [`ValueBinding<bool>`], so a host may control it. A
//! controlled dropdown reports every open/close request through
//! [`Root::on_open_change`] and only changes when the host feeds a new value
//! to [`Root::sync`].
//!
//! ## Dismissal
//!
//! Attach the document's [`DismissStack`] with [`Root::attach_dismiss`].
//! While the menu is open it holds a [`DismissLayer`]; Escape and pointer-down
//! outside the trigger and content bounds (see [`Root::set_bounds`]) request a
//! close. The layer is released as soon as the menu reports closed, and when
//! the root drops. Escape is never handled by [`Content::key_down`].
//!
//! ## Focus
//!
//! Opening from the keyboard records where focus should land (first item for
//! `ArrowDown`, `Enter` and `Space`; last item for `ArrowUp`). Once the content
//! is shown the host calls [`Content::take_initial_focus`] to resolve it.

use alloc::boxed::Box;
use alloc::format;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use core::fmt;

use kurbo::Rect;
use unfold_context::{ContextError, Provider, ScopedContext};
use unfold_roving::{
    Axes, Direction, ItemMeta, Key, ReadingDirection, Registration, SharedRegistry, WrapMode,
    direction_for_key,
};
use unfold_value::{SyncOutcome, ValueBinding};

use crate::aria::{AriaAttrs, element_id, open_state, tabindex};
use crate::dismiss::{DismissLayer, DismissOn, DismissStack};
use crate::{ItemId, KeyOutcome};

/// Family name used in context errors.
pub const NAME: &str = "Dropdown";

/// Dropdown configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DropdownConfig {
    /// Close when `Escape` reaches the dismiss stack.
    pub close_on_escape: bool,
    /// Close on pointer-down outside the trigger and content.
    pub close_on_outside_click: bool,
    /// Close after an item is selected.
    pub close_on_select: bool,
    /// Whether arrow navigation wraps at the ends.
    pub wrap: WrapMode,
    /// Prefix for generated element ids.
    pub id_prefix: String,
}

impl Default for DropdownConfig {
    fn default() -> Self {
        Self {
            close_on_escape: true,
            close_on_outside_click: true,
            close_on_select: true,
            wrap: WrapMode::Never,
            id_prefix: String::from("dropdown"),
        }
    }
}

impl DropdownConfig {
    /// Set whether `Escape` closes the menu.
    #[must_use]
    pub fn close_on_escape(mut self, on: bool) -> Self {
        self.close_on_escape = on;
        self
    }

    /// Set whether an outside pointer-down closes the menu.
    #[must_use]
    pub fn close_on_outside_click(mut self, on: bool) -> Self {
        self.close_on_outside_click = on;
        self
    }

    /// Set whether selecting an item closes the menu.
    #[must_use]
    pub fn close_on_select(mut self, on: bool) -> Self {
        self.close_on_select = on;
        self
    }

    /// Set the wrap mode.
    #[must_use]
    pub fn wrap(mut self, wrap: WrapMode) -> Self {
        self.wrap = wrap;
        self
    }

    /// The dismiss reasons this configuration closes on.
    pub fn dismiss_on(&self) -> DismissOn {
        let mut on = DismissOn::empty();
        on.set(DismissOn::ESCAPE, self.close_on_escape);
        on.set(DismissOn::POINTER_OUTSIDE, self.close_on_outside_click);
        on
    }

    /// Set the element id prefix.
    #[must_use]
    pub fn id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.id_prefix = prefix.into();
        self
    }
}

type OnSelect<K> = Box<dyn FnMut(&K)>;

struct State<K> {
    config: DropdownConfig,
    open: ValueBinding<bool>,
    // Open state as of the last reconcile, to detect transitions.
    was_open: bool,
    registry: SharedRegistry<K>,
    highlighted: Option<K>,
    pending_focus: Option<Direction>,
    on_select: Option<OnSelect<K>>,
    dismiss: Option<DismissStack>,
    layer: Option<DismissLayer>,
    bounds: Vec<Rect>,
}

/// Shared root state, as published on a [`Scope`].
pub struct Handle<K: ItemId> {
    state: Rc<RefCell<State<K>>>,
}

impl<K: ItemId> Clone for Handle<K> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
        }
    }
}

impl<K: ItemId> PartialEq for Handle<K> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }
}

impl<K: ItemId> fmt::Debug for Handle<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.state.try_borrow() {
            Ok(s) => f
                .debug_struct("dropdown::Handle")
                .field("open", s.open.current())
                .field("highlighted", &s.highlighted)
                .field("layer", &s.layer)
                .finish(),
            Err(_) => f.debug_struct("dropdown::Handle").finish_non_exhaustive(),
        }
    }
}

impl<K: ItemId> Handle<K> {
    fn is_open(&self) -> bool {
        *self.state.borrow().open.current()
    }

    fn config(&self) -> DropdownConfig {
        self.state.borrow().config.clone()
    }

    fn registry(&self) -> SharedRegistry<K> {
        self.state.borrow().registry.clone()
    }

    fn highlighted(&self) -> Option<K> {
        self.state.borrow().highlighted.clone()
    }

    fn set_highlighted(&self, id: Option<K>) {
        self.state.borrow_mut().highlighted = id;
    }

    fn element_id(&self, part: &str) -> String {
        format!("{}-{part}", self.state.borrow().config.id_prefix)
    }

    fn set_open(&self, open: bool) {
        self.state.borrow_mut().open.set_value(open);
        self.reconcile();
    }

    fn open_with(&self, focus: Direction) {
        self.state.borrow_mut().pending_focus = Some(focus);
        self.set_open(true);
    }


    fn select(&self, id: &K) {
        let close = {
            let mut s = self.state.borrow_mut();
            if let Some(f) = s.on_select.as_mut() {
                f(id);
            }
            s.config.close_on_select
        };
        if close {
            self.set_open(false);
        }
    }

    /// Bring transient state and the dismiss layer in line with the open state.
    fn reconcile(&self) {
        let mut s = self.state.borrow_mut();
        let open = *s.open.current();
        if s.was_open && !open {
            s.highlighted = None;
            s.pending_focus = None;
        }
        s.was_open = open;

        let accepts = s.config.dismiss_on();
        if !open || accepts.is_empty() {
            let layer = s.layer.take();
            drop(s);
            drop(layer);
            return;
        }
        if s.layer.is_some() {
            return;
        }
        let Some(stack) = s.dismiss.clone() else {
            return;
        };
        let weak = Rc::downgrade(&self.state);
        let layer = stack.push(s.bounds.clone(), accepts, move |_reason| {
            if let Some(state) = weak.upgrade() {
                Handle { state }.set_open(false);
            }
        });
        s.layer = Some(layer);
    }
}

/// Context carrying the dropdown root.
pub type Scope<K> = ScopedContext<Handle<K>>;

/// Create the context for a dropdown family.
pub fn scope<K: ItemId>() -> Scope<K> {
    ScopedContext::new(NAME)
}

/// Dropdown root.
pub struct Root<K: ItemId> {
    handle: Handle<K>,
}

impl<K: ItemId> fmt::Debug for Root<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("dropdown::Root").field(&self.handle).finish()
    }
}

impl<K: ItemId> Root<K> {
    /// Create a root.
    ///
    /// `open` makes the open state controlled for the root's lifetime;
    /// otherwise it starts from `default_open`.
    pub fn new(config: DropdownConfig, open: Option<bool>, default_open: bool) -> Self {
        let open = ValueBinding::new(open, default_open);
        let was_open = *open.current();
        Self {
            handle: Handle {
                state: Rc::new(RefCell::new(State {
                    config,
                    open,
                    was_open,
                    registry: SharedRegistry::new(),
                    highlighted: None,
                    pending_focus: None,
                    on_select: None,
                    dismiss: None,
                    layer: None,
                    bounds: Vec::new(),
                })),
            },
        }
    }

    /// Install the open-state change callback.
    pub fn on_open_change(&self, f: impl FnMut(&bool) + 'static) {
        self.handle
            .state
            .borrow_mut()
            .open
            .set_on_change(Some(Box::new(f)));
    }

    /// Install the item selection callback.
    pub fn on_select(&self, f: impl FnMut(&K) + 'static) {
        self.handle.state.borrow_mut().on_select = Some(Box::new(f));
    }

    /// Feed this render's controlled open state (`None` when uncontrolled).
    pub fn sync(&self, open: Option<bool>) -> SyncOutcome {
        let outcome = self.handle.state.borrow_mut().open.sync(open);
        self.handle.reconcile();
        outcome
    }

    /// Request the menu open or closed, as a trigger would.
    pub fn set_open(&self, open: bool) {
        self.handle.set_open(open);
    }

    /// Route Escape and outside pointer-downs from `stack` to this menu.
    pub fn attach_dismiss(&self, stack: &DismissStack) {
        {
            let mut s = self.handle.state.borrow_mut();
            s.layer = None;
            s.dismiss = Some(stack.clone());
        }
        self.handle.reconcile();
    }

    /// Set the regions that count as inside the menu (trigger and content).
    pub fn set_bounds(&self, bounds: Vec<Rect>) {
        let mut s = self.handle.state.borrow_mut();
        if let Some(layer) = &s.layer {
            layer.set_bounds(bounds.clone());
        }
        s.bounds = bounds;
    }

    /// Publish the root on `scope` until the returned guard drops.
    pub fn provide<'s>(&self, scope: &'s Scope<K>) -> Provider<'s, Handle<K>> {
        scope.provide(self.handle.clone())
    }

    /// Returns `true` if the menu is open.
    pub fn is_open(&self) -> bool {
        self.handle.is_open()
    }

    /// The highlighted item, if any.
    pub fn highlighted(&self) -> Option<K> {
        self.handle.highlighted()
    }

    /// Registered item ids, in registration order.
    pub fn items(&self) -> Vec<K> {
        self.handle.registry().order()
    }
}

/// The button that opens the menu.
pub struct Trigger<K: ItemId> {
    handle: Handle<K>,
}

impl<K: ItemId> fmt::Debug for Trigger<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("dropdown::Trigger").field(&self.handle).finish()
    }
}

impl<K: ItemId> Trigger<K> {
    /// Mount a trigger under the innermost dropdown root.
    pub fn mount(scope: &Scope<K>) -> Result<Self, ContextError> {
        Ok(Self {
            handle: scope.use_context()?,
        })
    }

    /// Handle a click: toggles the menu.
    pub fn click(&self) {
        self.handle.state.borrow_mut().pending_focus = None;
        let open = self.handle.is_open();
        self.handle.set_open(!open);
    }

    /// Handle a key press while the trigger has focus.
    pub fn key_down(&self, key: Key) -> KeyOutcome<K> {
        match key {
            Key::Enter | Key::Space if self.handle.is_open() => {
                self.handle.set_open(false);
                KeyOutcome::Activated
            }
            Key::Enter | Key::Space | Key::ArrowDown => {
                self.handle.open_with(Direction::First);
                KeyOutcome::Activated
            }
            Key::ArrowUp => {
                self.handle.open_with(Direction::Last);
                KeyOutcome::Activated
            }
            _ => KeyOutcome::Ignored,
        }
    }

    /// Attributes for the trigger button.
    pub fn attrs(&self) -> AriaAttrs {
        let open = self.handle.is_open();
        AriaAttrs::new()
            .with("id", self.handle.element_id("trigger"))
            .with("aria-haspopup", "menu")
            .flag("aria-expanded", open)
            .with("aria-controls", self.handle.element_id("content"))
            .with("data-state", open_state(open))
    }
}

/// The menu surface.
pub struct Content<K: ItemId> {
    handle: Handle<K>,
}

impl<K: ItemId> fmt::Debug for Content<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("dropdown::Content").field(&self.handle).finish()
    }
}

impl<K: ItemId> Content<K> {
    /// Mount the menu surface under the innermost dropdown root.
    pub fn mount(scope: &Scope<K>) -> Result<Self, ContextError> {
        Ok(Self {
            handle: scope.use_context()?,
        })
    }

    /// Returns `true` if the menu is shown.
    pub fn is_open(&self) -> bool {
        self.handle.is_open()
    }

    /// Resolve focus requested by a keyboard open.
    ///
    /// Returns the item to focus, which also becomes highlighted. Returns
    /// `None` once consumed, or if no item is enabled.
    pub fn take_initial_focus(&self) -> Option<K> {
        let (direction, registry, wrap) = {
            let mut s = self.handle.state.borrow_mut();
            if !*s.open.current() {
                return None;
            }
            (s.pending_focus.take()?, s.registry.clone(), s.config.wrap)
        };
        let target = registry.navigate(None, direction, wrap)?;
        self.handle.set_highlighted(Some(target.clone()));
        Some(target)
    }

    /// Handle a key press while focus is inside the menu.
    pub fn key_down(&self, key: Key) -> KeyOutcome<K> {
        if !self.handle.is_open() {
            return KeyOutcome::Ignored;
        }
        let current = self.handle.highlighted();
        if key.is_activation() {
            let Some(id) = current else {
                return KeyOutcome::Ignored;
            };
            let registry = self.handle.registry();
            if !registry.borrow().contains(&id) || registry.is_disabled(&id) {
                return KeyOutcome::Ignored;
            }
            self.handle.select(&id);
            return KeyOutcome::Activated;
        }
        if key == Key::Tab {
            self.handle.set_open(false);
            return KeyOutcome::Ignored;
        }
        let Some(direction) = direction_for_key(key, Axes::VERTICAL, ReadingDirection::Ltr)
        else {
            return KeyOutcome::Ignored;
        };
        let wrap = self.handle.config().wrap;
        match self
            .handle
            .registry()
            .navigate(current.as_ref(), direction, wrap)
        {
            Some(next) => {
                self.handle.set_highlighted(Some(next.clone()));
                KeyOutcome::Focus(next)
            }
            None => KeyOutcome::Ignored,
        }
    }

    /// Attributes for the menu surface.
    pub fn attrs(&self) -> AriaAttrs {
        let open = self.handle.is_open();
        AriaAttrs::new()
            .with("id", self.handle.element_id("content"))
            .with("role", "menu")
            .with("aria-labelledby", self.handle.element_id("trigger"))
            .with("aria-orientation", "vertical")
            .with("data-state", open_state(open))
            .when(!open, "hidden", "")
    }
}

/// One selectable menu item. Unregisters itself when dropped.
pub struct Item<K: ItemId> {
    id: K,
    disabled: Cell<bool>,
    handle: Handle<K>,
    registration: Registration<K>,
}

impl<K: ItemId> fmt::Debug for Item<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("dropdown::Item")
            .field("id", &self.id)
            .field("disabled", &self.disabled.get())
            .finish_non_exhaustive()
    }
}

impl<K: ItemId> Item<K> {
    /// Mount an item under the innermost dropdown root.
    pub fn mount(scope: &Scope<K>, id: K, disabled: bool) -> Result<Self, ContextError> {
        let handle = scope.use_context()?;
        let registration = handle
            .registry()
            .register(id.clone(), ItemMeta::with_disabled(disabled));
        Ok(Self {
            id,
            disabled: Cell::new(disabled),
            handle,
            registration,
        })
    }

    /// The item id.
    pub fn id(&self) -> &K {
        &self.id
    }

    /// Returns `true` if the item is disabled.
    pub fn is_disabled(&self) -> bool {
        self.disabled.get()
    }

    /// Enable or disable this item.
    pub fn set_disabled(&self, disabled: bool) {
        self.disabled.set(disabled);
        self.registration.set_disabled(disabled);
    }

    /// Returns `true` if the item is highlighted.
    pub fn is_highlighted(&self) -> bool {
        self.handle.highlighted().as_ref() == Some(&self.id)
    }

    /// Select the item (click, or activation while highlighted).
    ///
    /// Disabled items, and items of a closed menu, never select. Returns
    /// `true` if the item was selected.
    pub fn select(&self) -> bool {
        if self.is_disabled() || !self.handle.is_open() {
            return false;
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(id = %self.id, "dropdown item selected");
        self.handle.select(&self.id);
        true
    }

    /// Highlight the item on pointer hover.
    ///
    /// Disabled items, and items of a closed menu, are skipped.
    pub fn pointer_enter(&self) {
        if !self.is_disabled() && self.handle.is_open() {
            self.handle.set_highlighted(Some(self.id.clone()));
        }
    }

    /// Attributes for the item element.
    pub fn attrs(&self) -> AriaAttrs {
        let disabled = self.is_disabled();
        let highlighted = self.is_highlighted();
        let prefix = self.handle.config().id_prefix;
        AriaAttrs::new()
            .with("id", element_id(&prefix, "item", &self.id))
            .with("role", "menuitem")
            .with("tabindex", tabindex(highlighted))
            .when(disabled, "aria-disabled", "true")
            .when(disabled, "data-disabled", "")
            .when(highlighted, "data-highlighted", "")
    }
}

impl<K: ItemId> Drop for Item<K> {
    fn drop(&mut self) {
        // An unmounted item must not stay highlighted.
        if let Ok(mut s) = self.handle.state.try_borrow_mut() {
            if s.highlighted.as_ref() == Some(&self.id) {
                s.highlighted = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    #[test]
    fn trigger_click_toggles() {
        let scope: Scope<&str> = scope();
        let root = Root::new(DropdownConfig::default(), None, false);
        let _p = root.provide(&scope);
        let trigger = Trigger::mount(&scope).unwrap();
        trigger.click();
        assert!(root.is_open());
        assert_eq!(trigger.attrs().get("aria-expanded"), Some("true"));
        trigger.click();
        assert!(!root.is_open());
    }

    #[test]
    fn arrow_up_focuses_last_enabled() {
        let scope = scope();
        let root = Root::new(DropdownConfig::default(), None, false);
        let _p = root.provide(&scope);
        let trigger = Trigger::mount(&scope).unwrap();
        let content = Content::mount(&scope).unwrap();
        let _a = Item::mount(&scope, "a", false).unwrap();
        let _b = Item::mount(&scope, "b", false).unwrap();
        let _c = Item::mount(&scope, "c", true).unwrap();

        assert_eq!(trigger.key_down(Key::ArrowUp), KeyOutcome::Activated);
        assert!(root.is_open());
        assert_eq!(content.take_initial_focus(), Some("b"));
        assert_eq!(content.take_initial_focus(), None);
        assert_eq!(root.highlighted(), Some("b"));
    }

    #[test]
    fn content_navigation_does_not_wrap_by_default() {
        let scope = scope();
        let root = Root::new(DropdownConfig::default(), None, true);
        let _p = root.provide(&scope);
        let content = Content::mount(&scope).unwrap();
        let _a = Item::mount(&scope, 1_u8, false).unwrap();
        let _b = Item::mount(&scope, 2_u8, false).unwrap();

        assert_eq!(content.key_down(Key::ArrowDown), KeyOutcome::Focus(1));
        assert_eq!(content.key_down(Key::ArrowDown), KeyOutcome::Focus(2));
        assert_eq!(content.key_down(Key::ArrowDown), KeyOutcome::Ignored);
        assert_eq!(content.key_down(Key::Home), KeyOutcome::Focus(1));
    }

    #[test]
    fn selecting_reports_and_closes() {
        let scope = scope();
        let root: Root<&'static str> = Root::new(DropdownConfig::default(), None, true);
        let picked = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&picked);
        root.on_select(move |id| sink.borrow_mut().push(*id));
        let _p = root.provide(&scope);
        let copy = Item::mount(&scope, "copy", false).unwrap();
        let paste = Item::mount(&scope, "paste", true).unwrap();

        assert!(!paste.select());
        assert!(root.is_open());
        assert!(copy.select());
        assert!(!root.is_open());
        assert_eq!(*picked.borrow(), ["copy"]);
    }

    #[test]
    fn keep_open_on_select() {
        let scope = scope();
        let root = Root::new(DropdownConfig::default().close_on_select(false), None, true);
        let _p = root.provide(&scope);
        let content = Content::mount(&scope).unwrap();
        let item = Item::mount(&scope, 'x', false).unwrap();
        item.pointer_enter();
        assert!(item.is_highlighted());
        assert_eq!(content.key_down(Key::Enter), KeyOutcome::Activated);
        assert!(root.is_open());
    }

    #[test]
    fn unmounted_item_loses_highlight() {
        let scope = scope();
        let root: Root<&'static str> = Root::new(DropdownConfig::default(), None, true);
        let picked = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&picked);
        root.on_select(move |id| sink.borrow_mut().push(*id));
        let _p = root.provide(&scope);
        let content = Content::mount(&scope).unwrap();
        let keep = Item::mount(&scope, "keep", false).unwrap();
        let gone = Item::mount(&scope, "gone", false).unwrap();

        keep.pointer_enter();
        drop(gone);
        assert_eq!(root.highlighted(), Some("keep"));

        let gone = Item::mount(&scope, "gone", false).unwrap();
        gone.pointer_enter();
        drop(gone);
        assert_eq!(root.highlighted(), None);
        assert_eq!(root.items(), ["keep"]);
        assert_eq!(content.key_down(Key::Enter), KeyOutcome::Ignored);
        assert!(picked.borrow().is_empty());
        assert!(root.is_open());
    }

    #[test]
    fn closed_menu_items_do_not_respond() {
        let scope = scope();
        let root: Root<&'static str> = Root::new(DropdownConfig::default(), None, false);
        let picked = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&picked);
        root.on_select(move |id| sink.borrow_mut().push(*id));
        let _p = root.provide(&scope);
        let item = Item::mount(&scope, "a", false).unwrap();

        item.pointer_enter();
        assert!(!item.is_highlighted());
        assert!(!item.select());
        assert!(picked.borrow().is_empty());
    }

    #[test]
    fn layer_follows_open_state() {
        let stack = DismissStack::new();
        let scope: Scope<u32> = scope();
        let root = Root::new(DropdownConfig::default(), None, false);
        root.attach_dismiss(&stack);
        let _p = root.provide(&scope);
        let trigger = Trigger::mount(&scope).unwrap();

        assert!(stack.is_empty());
        trigger.click();
        assert_eq!(stack.len(), 1);
        trigger.click();
        assert!(stack.is_empty());
    }

    #[test]
    fn outside_pointer_closes_inside_does_not() {
        let stack = DismissStack::new();
        let root: Root<u32> = Root::new(DropdownConfig::default(), None, true);
        root.attach_dismiss(&stack);
        root.set_bounds(alloc::vec![Rect::new(0.0, 0.0, 100.0, 20.0)]);

        assert!(!stack.pointer_down(Point::new(10.0, 10.0)));
        assert!(root.is_open());
        assert!(stack.pointer_down(Point::new(10.0, 200.0)));
        assert!(!root.is_open());
        assert!(stack.is_empty());
    }

    #[test]
    fn escape_can_be_disabled() {
        let stack = DismissStack::new();
        let config = DropdownConfig::default().close_on_escape(false);
        let root: Root<u32> = Root::new(config, None, true);
        root.attach_dismiss(&stack);
        assert!(!stack.key_down(Key::Escape));
        assert!(root.is_open());
        assert!(stack.pointer_down(Point::new(10.0, 10.0)));
        assert!(!root.is_open());
    }

    #[test]
    fn no_layer_when_nothing_dismisses() {
        let stack = DismissStack::new();
        let config = DropdownConfig::default()
            .close_on_escape(false)
            .close_on_outside_click(false);
        let root: Root<u32> = Root::new(config, None, true);
        root.attach_dismiss(&stack);
        assert!(stack.is_empty());
    }

    #[test]
    fn dropping_root_releases_layer() {
        let stack = DismissStack::new();
        let root: Root<u32> = Root::new(DropdownConfig::default(), None, true);
        root.attach_dismiss(&stack);
        assert_eq!(stack.len(), 1);
        drop(root);
        assert!(stack.is_empty());
    }
}
