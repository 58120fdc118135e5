// Copyright 2025 the Unfold Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Accordion: a vertically stacked set of disclosure items.
//!
//! ## Parts
//!
//! - [`Root`] owns the open set (a [`DisclosureSet`]) and the item registry,
//!   and publishes a [`Handle`] on a [`Scope`].
//! - [`Item`] mounts against the root's scope, registers itself for keyboard
//!   navigation, and publishes an [`ItemHandle`] on an [`ItemScope`].
//! - [`Trigger`] and [`Content`] mount against the item's scope.
//!
//! Arrow keys move between triggers over every registered item, open or not.
//! Disabled items are skipped, and clicking them does nothing.

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use core::fmt;

use unfold_context::{ContextError, Provider, ScopedContext};
use unfold_disclosure::{DisclosureConfig, DisclosureMode, DisclosureSet, OpenIds};
use unfold_roving::{
    Axes, ItemMeta, Key, ReadingDirection, Registration, SharedRegistry, WrapMode,
    direction_for_key,
};
use unfold_value::SyncOutcome;

use crate::aria::{AriaAttrs, element_id, open_state};
use crate::{ItemId, KeyOutcome};

/// Family name used in context errors for root-level parts.
pub const NAME: &str = "Accordion";
/// Family name used in context errors for item-level parts.
pub const ITEM_NAME: &str = "AccordionItem";

/// Accordion configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccordionConfig {
    /// Single or multiple expansion, and collapsibility.
    pub disclosure: DisclosureConfig,
    /// Disables every item.
    pub disabled: bool,
    /// Arrow-key axes that move between triggers.
    pub axes: Axes,
    /// Whether arrow navigation wraps at the ends.
    pub wrap: WrapMode,
    /// Reading direction for horizontal arrows.
    pub dir: ReadingDirection,
    /// Prefix for generated element ids.
    pub id_prefix: String,
}

impl Default for AccordionConfig {
    fn default() -> Self {
        Self {
            disclosure: DisclosureConfig::default(),
            disabled: false,
            axes: Axes::VERTICAL,
            wrap: WrapMode::Loop,
            dir: ReadingDirection::Ltr,
            id_prefix: String::from("accordion"),
        }
    }
}

impl AccordionConfig {
    /// Single-expansion accordion.
    pub fn single(collapsible: bool) -> Self {
        Self {
            disclosure: DisclosureConfig::single(collapsible),
            ..Self::default()
        }
    }

    /// Multiple-expansion accordion.
    pub fn multiple() -> Self {
        Self {
            disclosure: DisclosureConfig::multiple(),
            ..Self::default()
        }
    }

    /// Disable every item.
    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
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
    config: AccordionConfig,
    disclosure: DisclosureSet<K>,
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
                .debug_struct("accordion::Handle")
                .field("config", &s.config)
                .field("open", &s.disclosure.open_ids())
                .finish(),
            Err(_) => f.debug_struct("accordion::Handle").finish_non_exhaustive(),
        }
    }
}

impl<K: ItemId> Handle<K> {
    fn registry(&self) -> SharedRegistry<K> {
        self.state.borrow().registry.clone()
    }

    fn config(&self) -> AccordionConfig {
        self.state.borrow().config.clone()
    }

    fn is_open(&self, id: &K) -> bool {
        self.state.borrow().disclosure.is_open(id)
    }

    fn is_disabled(&self) -> bool {
        self.state.borrow().config.disabled
    }

    fn toggle(&self, id: &K) {
        self.state.borrow_mut().disclosure.toggle(id);
    }
}

/// Context carrying the accordion root.
pub type Scope<K> = ScopedContext<Handle<K>>;

/// Create the root-level context for an accordion family.
pub fn scope<K: ItemId>() -> Scope<K> {
    ScopedContext::new(NAME)
}

/// Accordion root.
pub struct Root<K: ItemId> {
    handle: Handle<K>,
}

impl<K: ItemId> fmt::Debug for Root<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("accordion::Root").field(&self.handle).finish()
    }
}

impl<K: ItemId> Root<K> {
    /// Create a root.
    ///
    /// `value` makes the open set controlled for the root's lifetime;
    /// otherwise it starts from `default`.
    pub fn new(config: AccordionConfig, value: Option<OpenIds<K>>, default: OpenIds<K>) -> Self {
        let disclosure = DisclosureSet::new(config.disclosure, value, default);
        Self {
            handle: Handle {
                state: Rc::new(RefCell::new(State {
                    config,
                    disclosure,
                    registry: SharedRegistry::new(),
                })),
            },
        }
    }

    /// Install the open-set change callback.
    pub fn on_value_change(&self, f: impl FnMut(&OpenIds<K>) + 'static) {
        self.handle.state.borrow_mut().disclosure.set_on_change(f);
    }

    /// Feed this render's controlled open set (`None` when uncontrolled).
    pub fn sync(&self, value: Option<OpenIds<K>>) -> SyncOutcome {
        self.handle.state.borrow_mut().disclosure.sync(value)
    }

    /// Publish the root on `scope` until the returned guard drops.
    pub fn provide<'s>(&self, scope: &'s Scope<K>) -> Provider<'s, Handle<K>> {
        scope.provide(self.handle.clone())
    }

    /// The shared handle.
    pub fn handle(&self) -> Handle<K> {
        self.handle.clone()
    }

    /// Currently open ids.
    pub fn open_ids(&self) -> OpenIds<K> {
        self.handle
            .state
            .borrow()
            .disclosure
            .open_ids()
            .iter()
            .cloned()
            .collect()
    }

    /// Returns `true` if `id` is open.
    pub fn is_open(&self, id: &K) -> bool {
        self.handle.is_open(id)
    }

    /// Registered item ids, in registration order.
    pub fn items(&self) -> Vec<K> {
        self.handle.registry().order()
    }

    /// Enable or disable every item.
    pub fn set_disabled(&self, disabled: bool) {
        self.handle.state.borrow_mut().config.disabled = disabled;
    }

    /// Attributes for the root element.
    pub fn attrs(&self) -> AriaAttrs {
        let config = self.handle.config();
        let orientation = if config.axes == Axes::HORIZONTAL {
            "horizontal"
        } else {
            "vertical"
        };
        AriaAttrs::new()
            .with("data-orientation", orientation)
            .when(config.disabled, "data-disabled", "")
    }
}

struct ItemInner<K: ItemId> {
    id: K,
    disabled: Cell<bool>,
    root: Handle<K>,
    registration: Registration<K>,
}

/// Shared item state, as published on an [`ItemScope`].
pub struct ItemHandle<K: ItemId> {
    inner: Rc<ItemInner<K>>,
}

impl<K: ItemId> Clone for ItemHandle<K> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<K: ItemId> PartialEq for ItemHandle<K> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<K: ItemId> fmt::Debug for ItemHandle<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("accordion::ItemHandle")
            .field("id", &self.inner.id)
            .field("disabled", &self.inner.disabled.get())
            .finish_non_exhaustive()
    }
}

impl<K: ItemId> ItemHandle<K> {
    fn id(&self) -> &K {
        &self.inner.id
    }

    fn is_open(&self) -> bool {
        self.inner.root.is_open(&self.inner.id)
    }

    fn is_disabled(&self) -> bool {
        self.inner.disabled.get() || self.inner.root.is_disabled()
    }

    fn element_id(&self, part: &str) -> String {
        element_id(&self.inner.root.config().id_prefix, part, &self.inner.id)
    }
}

/// Context carrying one accordion item.
pub type ItemScope<K> = ScopedContext<ItemHandle<K>>;

/// Create the item-level context for an accordion family.
pub fn item_scope<K: ItemId>() -> ItemScope<K> {
    ScopedContext::new(ITEM_NAME)
}

/// One accordion item. Unregisters itself when the last of its parts drops.
pub struct Item<K: ItemId> {
    handle: ItemHandle<K>,
}

impl<K: ItemId> fmt::Debug for Item<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("accordion::Item").field(&self.handle).finish()
    }
}

impl<K: ItemId> Item<K> {
    /// Mount an item under the innermost accordion root.
    pub fn mount(scope: &Scope<K>, id: K, disabled: bool) -> Result<Self, ContextError> {
        let root = scope.use_context()?;
        let registration = root
            .registry()
            .register(id.clone(), ItemMeta::with_disabled(disabled));
        Ok(Self {
            handle: ItemHandle {
                inner: Rc::new(ItemInner {
                    id,
                    disabled: Cell::new(disabled),
                    root,
                    registration,
                }),
            },
        })
    }

    /// Publish the item on `scope` until the returned guard drops.
    pub fn provide<'s>(&self, scope: &'s ItemScope<K>) -> Provider<'s, ItemHandle<K>> {
        scope.provide(self.handle.clone())
    }

    /// The item id.
    pub fn id(&self) -> &K {
        self.handle.id()
    }

    /// Returns `true` if the item is open.
    pub fn is_open(&self) -> bool {
        self.handle.is_open()
    }

    /// Returns `true` if the item or the whole accordion is disabled.
    pub fn is_disabled(&self) -> bool {
        self.handle.is_disabled()
    }

    /// Enable or disable this item.
    pub fn set_disabled(&self, disabled: bool) {
        self.handle.inner.disabled.set(disabled);
        self.handle.inner.registration.set_disabled(disabled);
    }

    /// Attributes for the item wrapper element.
    pub fn attrs(&self) -> AriaAttrs {
        AriaAttrs::new()
            .with("data-state", open_state(self.is_open()))
            .when(self.is_disabled(), "data-disabled", "")
    }
}

/// The button that toggles an item.
pub struct Trigger<K: ItemId> {
    item: ItemHandle<K>,
}

impl<K: ItemId> fmt::Debug for Trigger<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("accordion::Trigger").field(&self.item).finish()
    }
}

impl<K: ItemId> Trigger<K> {
    /// Mount a trigger under the innermost accordion item.
    pub fn mount(scope: &ItemScope<K>) -> Result<Self, ContextError> {
        Ok(Self {
            item: scope.use_context()?,
        })
    }

    /// Handle a click. Returns `false` (and does nothing) when disabled.
    pub fn click(&self) -> bool {
        if self.item.is_disabled() {
            return false;
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(id = %self.item.id(), "accordion trigger toggled");
        self.item.inner.root.toggle(self.item.id());
        true
    }

    /// Handle a key press while this trigger has focus.
    pub fn key_down(&self, key: Key) -> KeyOutcome<K> {
        let root = &self.item.inner.root;
        let config = root.config();
        if let Some(direction) = direction_for_key(key, config.axes, config.dir) {
            if config.disabled {
                return KeyOutcome::Ignored;
            }
            return match root
                .registry()
                .navigate(Some(self.item.id()), direction, config.wrap)
            {
                Some(next) => KeyOutcome::Focus(next),
                None => KeyOutcome::Ignored,
            };
        }
        if key.is_activation() && self.click() {
            return KeyOutcome::Activated;
        }
        KeyOutcome::Ignored
    }

    /// Attributes for the trigger button.
    pub fn attrs(&self) -> AriaAttrs {
        let open = self.item.is_open();
        let disabled = self.item.is_disabled();
        let disclosure = self.item.inner.root.config().disclosure;
        // An open item that cannot be collapsed is announced as disabled.
        let locked = open && disclosure.mode == DisclosureMode::Single && !disclosure.collapsible;
        AriaAttrs::new()
            .with("id", self.item.element_id("trigger"))
            .with("aria-controls", self.item.element_id("content"))
            .flag("aria-expanded", open)
            .when(disabled || locked, "aria-disabled", "true")
            .with("data-state", open_state(open))
            .when(disabled, "disabled", "")
            .when(disabled, "data-disabled", "")
    }
}

/// The region an item shows or hides.
pub struct Content<K: ItemId> {
    item: ItemHandle<K>,
}

impl<K: ItemId> fmt::Debug for Content<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("accordion::Content").field(&self.item).finish()
    }
}

impl<K: ItemId> Content<K> {
    /// Mount a content region under the innermost accordion item.
    pub fn mount(scope: &ItemScope<K>) -> Result<Self, ContextError> {
        Ok(Self {
            item: scope.use_context()?,
        })
    }

    /// Returns `true` if the region is shown.
    pub fn is_open(&self) -> bool {
        self.item.is_open()
    }

    /// Attributes for the content region.
    pub fn attrs(&self) -> AriaAttrs {
        let open = self.item.is_open();
        AriaAttrs::new()
            .with("id", self.item.element_id("content"))
            .with("role", "region")
            .with("aria-labelledby", self.item.element_id("trigger"))
            .with("data-state", open_state(open))
            .when(!open, "hidden", "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use unfold_disclosure::smallvec::smallvec;

    #[test]
    fn parts_outside_their_provider_fail() {
        let scope: Scope<&str> = scope();
        let err = Item::mount(&scope, "a", false).unwrap_err();
        assert_eq!(err, ContextError::MissingProvider { name: NAME });

        let items: ItemScope<&str> = item_scope();
        assert_eq!(
            Trigger::mount(&items).unwrap_err(),
            ContextError::MissingProvider { name: ITEM_NAME }
        );
        assert!(Content::mount(&items).is_err());
    }

    #[test]
    fn trigger_and_content_reference_each_other() {
        let scope = scope();
        let root = Root::new(AccordionConfig::single(true), None, smallvec!["a"]);
        let _p = root.provide(&scope);
        let item = Item::mount(&scope, "a", false).unwrap();
        let items = item_scope();
        let _ip = item.provide(&items);
        let trigger = Trigger::mount(&items).unwrap();
        let content = Content::mount(&items).unwrap();

        let t = trigger.attrs();
        let c = content.attrs();
        assert_eq!(t.get("aria-controls"), c.get("id"));
        assert_eq!(c.get("aria-labelledby"), t.get("id"));
        assert_eq!(t.get("aria-expanded"), Some("true"));
        assert_eq!(c.get("role"), Some("region"));
        assert!(!c.contains("hidden"));

        trigger.click();
        assert_eq!(trigger.attrs().get("aria-expanded"), Some("false"));
        assert!(content.attrs().contains("hidden"));
    }

    #[test]
    fn locked_item_is_announced_disabled() {
        let scope = scope();
        let root = Root::new(AccordionConfig::single(false), None, smallvec![1_u8]);
        let _p = root.provide(&scope);
        let item = Item::mount(&scope, 1, false).unwrap();
        let items = item_scope();
        let _ip = item.provide(&items);
        let trigger = Trigger::mount(&items).unwrap();
        assert_eq!(trigger.attrs().get("aria-disabled"), Some("true"));
        // Clicking is still accepted; the set just stays as it is.
        assert!(trigger.click());
        assert!(item.is_open());
    }

    #[test]
    fn disabled_item_ignores_click_and_activation() {
        let scope = scope();
        let root = Root::new(AccordionConfig::multiple(), None, OpenIds::new());
        let calls = Rc::new(Cell::new(0_u32));
        let seen = Rc::clone(&calls);
        root.on_value_change(move |_| seen.set(seen.get() + 1));
        let _p = root.provide(&scope);
        let item = Item::mount(&scope, "x", true).unwrap();
        let items = item_scope();
        let _ip = item.provide(&items);
        let trigger = Trigger::mount(&items).unwrap();

        assert!(!trigger.click());
        assert_eq!(trigger.key_down(Key::Enter), KeyOutcome::Ignored);
        assert_eq!(trigger.key_down(Key::Space), KeyOutcome::Ignored);
        assert!(root.open_ids().is_empty());
        assert_eq!(calls.get(), 0);
        assert!(trigger.attrs().contains("disabled"));
    }

    #[test]
    fn items_unregister_when_dropped() {
        let scope = scope();
        let root = Root::new(AccordionConfig::default(), None, OpenIds::new());
        let _p = root.provide(&scope);
        let a = Item::mount(&scope, 'a', false).unwrap();
        let b = Item::mount(&scope, 'b', false).unwrap();
        assert_eq!(root.items(), ['a', 'b']);
        drop(a);
        assert_eq!(root.items(), ['b']);
        drop(b);
        assert!(root.items().is_empty());
    }

    #[test]
    fn root_disabled_blocks_everything() {
        let scope = scope();
        let root = Root::new(AccordionConfig::single(true).disabled(true), None, OpenIds::new());
        let _p = root.provide(&scope);
        let item = Item::mount(&scope, 1_u32, false).unwrap();
        let _other = Item::mount(&scope, 2_u32, false).unwrap();
        let items = item_scope();
        let _ip = item.provide(&items);
        let trigger = Trigger::mount(&items).unwrap();

        assert!(item.is_disabled());
        assert!(!trigger.click());
        assert_eq!(trigger.key_down(Key::ArrowDown), KeyOutcome::Ignored);
        assert!(root.attrs().contains("data-disabled"));
    }
}
