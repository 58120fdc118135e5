// Copyright 2025 the Unfold Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tabs: a list of triggers selecting one of several panels.
//!
//! The selected tab is a [`ValueBinding<Option<K>>`]. Triggers register
//! themselves for keyboard navigation and form a roving tab stop: only one
//! trigger (the selected one, or else the first enabled one) is reachable with
//! `Tab`; arrow keys move between the rest.
//!
//! With [`Activation::Automatic`] moving focus also selects. With
//! [`Activation::Manual`] selection waits for `Enter`, `Space` or a click.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use core::fmt;

use unfold_context::{ContextError, Provider, ScopedContext};
use unfold_roving::{
    Axes, Direction, ItemMeta, Key, ReadingDirection, Registration, SharedRegistry, WrapMode,
    direction_for_key,
};
use unfold_value::{SyncOutcome, ValueBinding};

use crate::aria::{AriaAttrs, element_id, tabindex};
use crate::{ItemId, KeyOutcome};

/// Family name used in context errors.
pub const NAME: &str = "Tabs";

/// When keyboard focus changes the selection.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Activation {
    /// Moving focus to a tab selects it.
    #[default]
    Automatic,
    /// A focused tab is selected with `Enter` or `Space`.
    Manual,
}

/// Tabs configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TabsConfig {
    /// Keyboard activation behavior.
    pub activation: Activation,
    /// Arrow-key axes that move between triggers.
    pub axes: Axes,
    /// Whether arrow navigation wraps at the ends.
    pub wrap: WrapMode,
    /// Reading direction for horizontal arrows.
    pub dir: ReadingDirection,
    /// Prefix for generated element ids.
    pub id_prefix: String,
}

impl Default for TabsConfig {
    fn default() -> Self {
        Self {
            activation: Activation::Automatic,
            axes: Axes::HORIZONTAL,
            wrap: WrapMode::Loop,
            dir: ReadingDirection::Ltr,
            id_prefix: String::from("tabs"),
        }
    }
}

impl TabsConfig {
    /// Set the activation behavior.
    #[must_use]
    pub fn activation(mut self, activation: Activation) -> Self {
        self.activation = activation;
        self
    }

    /// Set the arrow-key axes.
    #[must_use]
    pub fn axes(mut self, axes: Axes) -> Self {
        self.axes = axes;
        self
    }

    /// Set the wrap mode.
    #[must_use]
    pub fn wrap(mut self, wrap: WrapMode) -> Self {
        self.wrap = wrap;
        self
    }

    /// Set the reading direction.
    #[must_use]
    pub fn dir(mut self, dir: ReadingDirection) -> Self {
        self.dir = dir;
        self
    }

    /// Set the element id prefix.
    #[must_use]
    pub fn id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.id_prefix = prefix.into();
        self
    }
}

struct State<K> {
    config: TabsConfig,
    selected: ValueBinding<Option<K>>,
    registry: SharedRegistry<K>,
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
                .debug_struct("tabs::Handle")
                .field("selected", &s.selected)
                .field("registry", &s.registry)
                .finish(),
            Err(_) => f.debug_struct("tabs::Handle").finish_non_exhaustive(),
        }
    }
}

impl<K: ItemId> Handle<K> {
    fn config(&self) -> TabsConfig {
        self.state.borrow().config.clone()
    }

    fn registry(&self) -> SharedRegistry<K> {
        self.state.borrow().registry.clone()
    }

    fn selected(&self) -> Option<K> {
        self.state.borrow().selected.current().clone()
    }

    fn is_selected(&self, id: &K) -> bool {
        self.state.borrow().selected.current().as_ref() == Some(id)
    }

    fn select(&self, id: &K) {
        if self.is_selected(id) {
            return;
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(%id, "tab selected");
        self.state.borrow_mut().selected.set_value(Some(id.clone()));
    }

    /// The trigger that is reachable with `Tab`.
    fn tab_stop(&self) -> Option<K> {
        let registry = self.registry();
        match self.selected() {
            Some(id) if registry.borrow().contains(&id) && !registry.is_disabled(&id) => Some(id),
            _ => registry.navigate(None, Direction::First, WrapMode::Never),
        }
    }

    fn element_id(&self, part: &str, id: &K) -> String {
        element_id(&self.state.borrow().config.id_prefix, part, id)
    }
}

/// Context carrying the tabs root.
pub type Scope<K> = ScopedContext<Handle<K>>;

/// Create the context for a tabs family.
pub fn scope<K: ItemId>() -> Scope<K> {
    ScopedContext::new(NAME)
}

/// Tabs root.
pub struct Root<K: ItemId> {
    handle: Handle<K>,
}

impl<K: ItemId> fmt::Debug for Root<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("tabs::Root").field(&self.handle).finish()
    }
}

impl<K: ItemId> Root<K> {
    /// Create a root.
    ///
    /// `value` makes the selection controlled for the root's lifetime;
    /// otherwise it starts from `default`.
    pub fn new(config: TabsConfig, value: Option<Option<K>>, default: Option<K>) -> Self {
        Self {
            handle: Handle {
                state: Rc::new(RefCell::new(State {
                    config,
                    selected: ValueBinding::new(value, default),
                    registry: SharedRegistry::new(),
                })),
            },
        }
    }

    /// Create a root whose selection is owned by the host.
    pub fn controlled(config: TabsConfig, value: Option<K>) -> Self {
        Self::new(config, Some(value), None)
    }

    /// Create a root that owns its selection.
    pub fn uncontrolled(config: TabsConfig, default: Option<K>) -> Self {
        Self::new(config, None, default)
    }

    /// Install the selection change callback.
    pub fn on_value_change(&self, f: impl FnMut(&Option<K>) + 'static) {
        self.handle
            .state
            .borrow_mut()
            .selected
            .set_on_change(Some(Box::new(f)));
    }

    /// Feed this render's controlled selection (`None` when uncontrolled).
    pub fn sync(&self, value: Option<Option<K>>) -> SyncOutcome {
        self.handle.state.borrow_mut().selected.sync(value)
    }

    /// Publish the root on `scope` until the returned guard drops.
    pub fn provide<'s>(&self, scope: &'s Scope<K>) -> Provider<'s, Handle<K>> {
        scope.provide(self.handle.clone())
    }

    /// The selected tab, if any.
    pub fn selected(&self) -> Option<K> {
        self.handle.selected()
    }

    /// The trigger currently reachable with `Tab`.
    pub fn tab_stop(&self) -> Option<K> {
        self.handle.tab_stop()
    }

    /// Registered trigger ids, in registration order.
    pub fn triggers(&self) -> Vec<K> {
        self.handle.registry().order()
    }
}

/// The container of the triggers.
pub struct List<K: ItemId> {
    handle: Handle<K>,
}

impl<K: ItemId> fmt::Debug for List<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("tabs::List").field(&self.handle).finish()
    }
}

impl<K: ItemId> List<K> {
    /// Mount the list under the innermost tabs root.
    pub fn mount(scope: &Scope<K>) -> Result<Self, ContextError> {
        Ok(Self {
            handle: scope.use_context()?,
        })
    }

    /// Attributes for the list element.
    pub fn attrs(&self) -> AriaAttrs {
        let axes = self.handle.config().axes;
        let orientation = if axes == Axes::VERTICAL {
            "vertical"
        } else {
            "horizontal"
        };
        AriaAttrs::new()
            .with("role", "tablist")
            .with("aria-orientation", orientation)
    }
}

/// One tab. Unregisters itself when dropped.
pub struct Trigger<K: ItemId> {
    id: K,
    disabled: Cell<bool>,
    handle: Handle<K>,
    registration: Registration<K>,
}

impl<K: ItemId> fmt::Debug for Trigger<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("tabs::Trigger")
            .field("id", &self.id)
            .field("disabled", &self.disabled.get())
            .finish_non_exhaustive()
    }
}

impl<K: ItemId> Trigger<K> {
    /// Mount a trigger under the innermost tabs root.
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

    /// The tab id.
    pub fn id(&self) -> &K {
        &self.id
    }

    /// Returns `true` if this tab is selected.
    pub fn is_selected(&self) -> bool {
        self.handle.is_selected(&self.id)
    }

    /// Returns `true` if the tab is disabled.
    pub fn is_disabled(&self) -> bool {
        self.disabled.get()
    }

    /// Enable or disable this tab.
    pub fn set_disabled(&self, disabled: bool) {
        self.disabled.set(disabled);
        self.registration.set_disabled(disabled);
    }

    /// Select this tab (click). Disabled tabs are never selected.
    pub fn select(&self) -> bool {
        if self.is_disabled() {
            return false;
        }
        self.handle.select(&self.id);
        true
    }

    /// Handle a key press while this tab has focus.
    pub fn key_down(&self, key: Key) -> KeyOutcome<K> {
        let config = self.handle.config();
        if let Some(direction) = direction_for_key(key, config.axes, config.dir) {
            let Some(next) = self
                .handle
                .registry()
                .navigate(Some(&self.id), direction, config.wrap)
            else {
                return KeyOutcome::Ignored;
            };
            if config.activation == Activation::Automatic {
                self.handle.select(&next);
            }
            return KeyOutcome::Focus(next);
        }
        if key.is_activation() && self.select() {
            return KeyOutcome::Activated;
        }
        KeyOutcome::Ignored
    }

    /// Attributes for the tab element.
    pub fn attrs(&self) -> AriaAttrs {
        let selected = self.is_selected();
        let disabled = self.is_disabled();
        let stop = self.handle.tab_stop().as_ref() == Some(&self.id);
        AriaAttrs::new()
            .with("id", self.handle.element_id("trigger", &self.id))
            .with("role", "tab")
            .flag("aria-selected", selected)
            .with("aria-controls", self.handle.element_id("panel", &self.id))
            .with("tabindex", tabindex(stop))
            .with("data-state", if selected { "active" } else { "inactive" })
            .when(disabled, "disabled", "")
            .when(disabled, "data-disabled", "")
    }
}

/// The content shown for one tab.
pub struct Panel<K: ItemId> {
    id: K,
    handle: Handle<K>,
}

impl<K: ItemId> fmt::Debug for Panel<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("tabs::Panel")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

impl<K: ItemId> Panel<K> {
    /// Mount the panel for tab `id` under the innermost tabs root.
    pub fn mount(scope: &Scope<K>, id: K) -> Result<Self, ContextError> {
        Ok(Self {
            id,
            handle: scope.use_context()?,
        })
    }

    /// Returns `true` if the panel is shown.
    pub fn is_selected(&self) -> bool {
        self.handle.is_selected(&self.id)
    }

    /// Attributes for the panel element.
    pub fn attrs(&self) -> AriaAttrs {
        let selected = self.is_selected();
        AriaAttrs::new()
            .with("id", self.handle.element_id("panel", &self.id))
            .with("role", "tabpanel")
            .with("aria-labelledby", self.handle.element_id("trigger", &self.id))
            .with("tabindex", "0")
            .with("data-state", if selected { "active" } else { "inactive" })
            .when(!selected, "hidden", "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roving_tab_stop_falls_back_to_first_enabled() {
        let scope = scope();
        let root = Root::uncontrolled(TabsConfig::default(), None);
        let _p = root.provide(&scope);
        let a = Trigger::mount(&scope, "a", true).unwrap();
        let b = Trigger::mount(&scope, "b", false).unwrap();
        let c = Trigger::mount(&scope, "c", false).unwrap();

        assert_eq!(root.tab_stop(), Some("b"));
        assert_eq!(a.attrs().get("tabindex"), Some("-1"));
        assert_eq!(b.attrs().get("tabindex"), Some("0"));

        assert!(c.select());
        assert_eq!(root.tab_stop(), Some("c"));
        assert_eq!(b.attrs().get("tabindex"), Some("-1"));
        assert_eq!(c.attrs().get("tabindex"), Some("0"));
    }

    #[test]
    fn disabled_tab_cannot_be_selected() {
        let scope = scope();
        let root = Root::uncontrolled(TabsConfig::default(), Some(1_u8));
        let calls = Rc::new(Cell::new(0_u32));
        let seen = Rc::clone(&calls);
        root.on_value_change(move |_| seen.set(seen.get() + 1));
        let _p = root.provide(&scope);
        let _one = Trigger::mount(&scope, 1, false).unwrap();
        let two = Trigger::mount(&scope, 2, true).unwrap();
        assert!(!two.select());
        assert_eq!(two.key_down(Key::Enter), KeyOutcome::Ignored);
        assert_eq!(root.selected(), Some(1));
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn automatic_activation_selects_on_focus_move() {
        let scope = scope();
        let root = Root::uncontrolled(TabsConfig::default(), Some('a'));
        let _p = root.provide(&scope);
        let a = Trigger::mount(&scope, 'a', false).unwrap();
        let _b = Trigger::mount(&scope, 'b', true).unwrap();
        let _c = Trigger::mount(&scope, 'c', false).unwrap();

        assert_eq!(a.key_down(Key::ArrowRight), KeyOutcome::Focus('c'));
        assert_eq!(root.selected(), Some('c'));
        // Wraps back around.
        assert_eq!(a.key_down(Key::ArrowLeft), KeyOutcome::Focus('c'));
        // Vertical arrows are not on a horizontal list's axis.
        assert_eq!(a.key_down(Key::ArrowDown), KeyOutcome::Ignored);
    }

    #[test]
    fn manual_activation_waits_for_enter() {
        let scope = scope();
        let config = TabsConfig::default().activation(Activation::Manual);
        let root = Root::uncontrolled(config, Some(0_u32));
        let _p = root.provide(&scope);
        let _zero = Trigger::mount(&scope, 0, false).unwrap();
        let one = Trigger::mount(&scope, 1, false).unwrap();

        assert_eq!(one.key_down(Key::Home), KeyOutcome::Focus(0));
        assert_eq!(root.selected(), Some(0));
        assert_eq!(one.key_down(Key::Space), KeyOutcome::Activated);
        assert_eq!(root.selected(), Some(1));
    }

    #[test]
    fn rtl_flips_horizontal_arrows() {
        let scope = scope();
        let config = TabsConfig::default()
            .dir(ReadingDirection::Rtl)
            .wrap(WrapMode::Never);
        let root = Root::uncontrolled(config, None);
        let _p = root.provide(&scope);
        let first = Trigger::mount(&scope, "first", false).unwrap();
        let _second = Trigger::mount(&scope, "second", false).unwrap();
        assert_eq!(first.key_down(Key::ArrowLeft), KeyOutcome::Focus("second"));
        assert_eq!(first.key_down(Key::ArrowRight), KeyOutcome::Ignored);
    }

    #[test]
    fn panel_and_trigger_reference_each_other() {
        let scope = scope();
        let root = Root::uncontrolled(TabsConfig::default(), Some("x"));
        let _p = root.provide(&scope);
        let list = List::mount(&scope).unwrap();
        let trigger = Trigger::mount(&scope, "x", false).unwrap();
        let panel = Panel::mount(&scope, "x").unwrap();
        let other = Panel::mount(&scope, "y").unwrap();

        assert_eq!(list.attrs().get("aria-orientation"), Some("horizontal"));
        assert_eq!(trigger.attrs().get("aria-controls"), panel.attrs().get("id"));
        assert_eq!(panel.attrs().get("aria-labelledby"), trigger.attrs().get("id"));
        assert_eq!(trigger.attrs().get("aria-selected"), Some("true"));
        assert!(!panel.attrs().contains("hidden"));
        assert!(other.attrs().contains("hidden"));
    }

    #[test]
    fn controlled_selection_reports_without_changing() {
        let scope = scope();
        let root = Root::controlled(TabsConfig::default(), Some("a"));
        let requested = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&requested);
        root.on_value_change(move |v| sink.borrow_mut().push(*v));
        let _p = root.provide(&scope);
        let b = Trigger::mount(&scope, "b", false).unwrap();

        assert!(b.select());
        assert_eq!(root.selected(), Some("a"));
        assert_eq!(*requested.borrow(), [Some("b")]);

        assert_eq!(root.sync(Some(Some("b"))), SyncOutcome::Applied);
        assert!(b.is_selected());
        assert_eq!(root.sync(None), SyncOutcome::ModeMismatch);
        assert!(b.is_selected());
    }
}
