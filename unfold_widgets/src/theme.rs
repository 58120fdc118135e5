// Copyright 2025 the Unfold Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Theme mode: light, dark, or following the system color scheme.
//!
//! There is no global. The application creates one [`Root`] at start-up:
//!
//! - it reads the persisted preference from a [`ThemeStore`], falling back to
//!   [`ThemeMode::System`];
//! - it subscribes to the [`SystemScheme`] signal, so a `System` preference
//!   tracks the platform;
//! - it publishes a read-only [`ThemeHandle`] on a [`Scope`];
//! - [`Root::set_mode`] is the only way to change the preference, and it
//!   persists the new value.
//!
//! Dropping the root drops its [`Subscription`], which detaches the system
//! listener.
//!
//! ```rust
//! use unfold_widgets::theme::{self, ColorScheme, MemoryStore, Root, SystemScheme, ThemeMode};
//!
//! let system = SystemScheme::new(ColorScheme::Light);
//! let mut root = Root::new(MemoryStore::new(), &system);
//! assert_eq!(root.resolved(), ColorScheme::Light);
//!
//! system.set(ColorScheme::Dark);
//! assert_eq!(root.resolved(), ColorScheme::Dark);
//!
//! root.set_mode(ThemeMode::Light);
//! assert_eq!(root.resolved(), ColorScheme::Light);
//!
//! let scope = theme::scope();
//! let _provider = root.provide(&scope);
//! assert_eq!(scope.use_context().unwrap().mode(), ThemeMode::Light);
//! ```

use alloc::boxed::Box;
use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

use unfold_context::{Provider, ScopedContext};

use crate::aria::AriaAttrs;

/// Family name used in context errors.
pub const NAME: &str = "Theme";

/// A concrete color scheme.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ColorScheme {
    /// Light backgrounds.
    #[default]
    Light,
    /// Dark backgrounds.
    Dark,
}

impl ColorScheme {
    /// Attribute value for this scheme.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

/// The user's theme preference.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ThemeMode {
    /// Always light.
    Light,
    /// Always dark.
    Dark,
    /// Follow the system color scheme.
    #[default]
    System,
}

impl ThemeMode {
    /// Attribute value for this mode.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::System => "system",
        }
    }

    /// The scheme this mode shows when the system reports `system`.
    pub const fn resolve(self, system: ColorScheme) -> ColorScheme {
        match self {
            Self::Light => ColorScheme::Light,
            Self::Dark => ColorScheme::Dark,
            Self::System => system,
        }
    }
}

/// Persistence for the theme preference.
pub trait ThemeStore {
    /// The saved preference, if any.
    fn load(&self) -> Option<ThemeMode>;
    /// Save a new preference.
    fn save(&mut self, mode: ThemeMode);
}

/// In-memory [`ThemeStore`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryStore {
    mode: Option<ThemeMode>,
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding `mode`.
    pub fn with_mode(mode: ThemeMode) -> Self {
        Self { mode: Some(mode) }
    }
}

impl ThemeStore for MemoryStore {
    fn load(&self) -> Option<ThemeMode> {
        self.mode
    }

    fn save(&mut self, mode: ThemeMode) {
        self.mode = Some(mode);
    }
}

type SchemeListener = Rc<RefCell<dyn FnMut(ColorScheme)>>;

struct Signal {
    scheme: ColorScheme,
    // Dead entries are pruned on the next notification.
    listeners: Vec<Weak<RefCell<dyn FnMut(ColorScheme)>>>,
}

/// The platform's color scheme, as reported by the host.
#[derive(Clone)]
pub struct SystemScheme {
    inner: Rc<RefCell<Signal>>,
}

impl fmt::Debug for SystemScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.inner.borrow();
        f.debug_struct("SystemScheme")
            .field("scheme", &s.scheme)
            .field("listeners", &s.listeners.len())
            .finish()
    }
}

impl Default for SystemScheme {
    fn default() -> Self {
        Self::new(ColorScheme::default())
    }
}

impl SystemScheme {
    /// A signal starting at `scheme`.
    pub fn new(scheme: ColorScheme) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Signal {
                scheme,
                listeners: Vec::new(),
            })),
        }
    }

    /// The current system scheme.
    pub fn get(&self) -> ColorScheme {
        self.inner.borrow().scheme
    }

    /// Report a new system scheme. Equal values are ignored.
    pub fn set(&self, scheme: ColorScheme) {
        let live: Vec<SchemeListener> = {
            let mut s = self.inner.borrow_mut();
            if s.scheme == scheme {
                return;
            }
            s.scheme = scheme;
            s.listeners.retain(|l| l.strong_count() > 0);
            s.listeners.iter().filter_map(Weak::upgrade).collect()
        };
        #[cfg(feature = "tracing")]
        tracing::debug!(?scheme, listeners = live.len(), "system color scheme changed");
        for listener in live {
            (*listener.borrow_mut())(scheme);
        }
    }

    /// Call `f` on every change until the returned guard drops.
    pub fn subscribe(&self, f: impl FnMut(ColorScheme) + 'static) -> Subscription {
        let callback: SchemeListener = Rc::new(RefCell::new(f));
        self.inner
            .borrow_mut()
            .listeners
            .push(Rc::downgrade(&callback));
        Subscription {
            _callback: callback,
        }
    }

    /// Number of attached listeners.
    pub fn listener_count(&self) -> usize {
        self.inner
            .borrow()
            .listeners
            .iter()
            .filter(|l| l.strong_count() > 0)
            .count()
    }
}

/// Guard returned by [`SystemScheme::subscribe`]. Dropping it unsubscribes.
pub struct Subscription {
    _callback: SchemeListener,
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}

type OnSchemeChange = Box<dyn FnMut(ColorScheme)>;

struct ThemeState {
    mode: ThemeMode,
    system: ColorScheme,
    on_change: Option<OnSchemeChange>,
}

impl ThemeState {
    fn resolved(&self) -> ColorScheme {
        self.mode.resolve(self.system)
    }

    /// Apply `update` and report the resolved scheme if it changed.
    fn update(&mut self, update: impl FnOnce(&mut Self)) {
        let before = self.resolved();
        update(self);
        let after = self.resolved();
        if before != after {
            if let Some(f) = self.on_change.as_mut() {
                f(after);
            }
        }
    }
}

/// Read-only view of the theme, as published on a [`Scope`].
#[derive(Clone)]
pub struct ThemeHandle {
    state: Rc<RefCell<ThemeState>>,
}

impl PartialEq for ThemeHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }
}

impl fmt::Debug for ThemeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.state.try_borrow() {
            Ok(s) => f
                .debug_struct("ThemeHandle")
                .field("mode", &s.mode)
                .field("system", &s.system)
                .finish(),
            Err(_) => f.debug_struct("ThemeHandle").finish_non_exhaustive(),
        }
    }
}

impl ThemeHandle {
    /// The preference.
    pub fn mode(&self) -> ThemeMode {
        self.state.borrow().mode
    }

    /// The scheme to render with.
    pub fn resolved(&self) -> ColorScheme {
        self.state.borrow().resolved()
    }
}

/// Context carrying the theme.
pub type Scope = ScopedContext<ThemeHandle>;

/// Create the theme context.
pub fn scope() -> Scope {
    ScopedContext::new(NAME)
}

/// Owner of the application's theme state.
pub struct Root<S: ThemeStore> {
    handle: ThemeHandle,
    store: S,
    _system: Subscription,
}

impl<S: ThemeStore + fmt::Debug> fmt::Debug for Root<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("theme::Root")
            .field("handle", &self.handle)
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

impl<S: ThemeStore> Root<S> {
    /// Initialize from `store`, and follow `system` while the root lives.
    pub fn new(store: S, system: &SystemScheme) -> Self {
        let mode = store.load().unwrap_or_default();
        let state = Rc::new(RefCell::new(ThemeState {
            mode,
            system: system.get(),
            on_change: None,
        }));
        let weak = Rc::downgrade(&state);
        let subscription = system.subscribe(move |scheme| {
            if let Some(state) = weak.upgrade() {
                state.borrow_mut().update(|s| s.system = scheme);
            }
        });
        Self {
            handle: ThemeHandle { state },
            store,
            _system: subscription,
        }
    }

    /// Install the callback fired when the resolved scheme changes.
    pub fn on_change(&self, f: impl FnMut(ColorScheme) + 'static) {
        self.handle.state.borrow_mut().on_change = Some(Box::new(f));
    }

    /// Change and persist the preference.
    pub fn set_mode(&mut self, mode: ThemeMode) {
        self.store.save(mode);
        self.handle.state.borrow_mut().update(|s| s.mode = mode);
    }

    /// The preference.
    pub fn mode(&self) -> ThemeMode {
        self.handle.mode()
    }

    /// The scheme to render with.
    pub fn resolved(&self) -> ColorScheme {
        self.handle.resolved()
    }

    /// The store backing the preference.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The shared read-only handle.
    pub fn handle(&self) -> ThemeHandle {
        self.handle.clone()
    }

    /// Publish the theme on `scope` until the returned guard drops.
    pub fn provide<'s>(&self, scope: &'s Scope) -> Provider<'s, ThemeHandle> {
        scope.provide(self.handle.clone())
    }

    /// Attributes for the document root element.
    pub fn attrs(&self) -> AriaAttrs {
        AriaAttrs::new()
            .with("data-theme", self.resolved().as_str())
            .with("data-theme-mode", self.mode().as_str())
    }
}
