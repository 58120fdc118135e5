// Copyright 2025 the Unfold Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Unfold Roving: keyboard navigation for composite widgets.
//!
//! This crate models roving focus as a combination of:
//! - **Navigation intents** ([`Direction`]) such as [`Direction::Next`] or
//!   [`Direction::First`], usually derived from a [`Key`] with
//!   [`direction_for_key`].
//! - An **item registry** ([`ItemRegistry`]) holding the registration order of
//!   items plus per-item metadata (disabled flag, host focus handle).
//! - A **pure cursor** ([`navigate`]) that picks the next item to focus, skipping
//!   disabled entries and optionally wrapping at the ends ([`WrapMode`]).
//!
//! The cursor has no state of its own. It is evaluated fresh on every key event
//! from the registry and the currently focused id; moving actual focus to the
//! returned id is the host's job (see [`ItemRegistry::focus_handle`]).
//!
//! ## Minimal example
//!
//! ```rust
//! use unfold_roving::{Direction, WrapMode, navigate};
//!
//! let order = ["a", "b", "c", "d"];
//! let disabled = |id: &&str| *id == "b";
//!
//! // Disabled entries are skipped…
//! assert_eq!(navigate(&order, disabled, Some(&"a"), Direction::Next, WrapMode::Loop), Some(&"c"));
//! // …and the walk wraps around the end when looping.
//! assert_eq!(navigate(&order, disabled, Some(&"d"), Direction::Next, WrapMode::Loop), Some(&"a"));
//! assert_eq!(navigate(&order, disabled, Some(&"d"), Direction::Next, WrapMode::Never), None);
//! ```
//!
//! ## Registries owned by a composite
//!
//! A composite root owns a [`SharedRegistry`]. Each child item registers itself
//! on mount and receives a [`Registration`] guard that removes exactly its own
//! entry when dropped:
//!
//! ```rust
//! use unfold_roving::{Direction, ItemMeta, SharedRegistry, WrapMode};
//!
//! let registry: SharedRegistry<u32> = SharedRegistry::new();
//! let one = registry.register(1, ItemMeta::default());
//! let two = registry.register(2, ItemMeta::default());
//! assert_eq!(registry.navigate(Some(&1), Direction::Next, WrapMode::Never), Some(2));
//!
//! drop(two);
//! assert_eq!(registry.navigate(Some(&1), Direction::Next, WrapMode::Never), None);
//! # drop(one);
//! ```
//!
//! Navigation always runs over every registered item, regardless of any
//! other widget state (for example whether an accordion item is expanded).
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod keys;
mod registry;

pub use keys::{Axes, Key, ReadingDirection, direction_for_key};
pub use registry::{ItemMeta, ItemRegistry, Registration, SharedRegistry};

/// Requested focus movement.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Move to the following enabled item (for example, `ArrowDown`).
    Next,
    /// Move to the preceding enabled item (for example, `ArrowUp`).
    Previous,
    /// Move to the first enabled item (`Home`).
    First,
    /// Move to the last enabled item (`End`).
    Last,
}

/// Wrap behavior at the ends of the item order.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum WrapMode {
    /// Reaching the end of the sequence yields no next candidate.
    Never,
    /// Continue from the opposite end.
    #[default]
    Loop,
}

impl WrapMode {
    /// `Loop` when `looping` is set, `Never` otherwise.
    pub const fn from_loop(looping: bool) -> Self {
        if looping { Self::Loop } else { Self::Never }
    }
}

#[derive(Copy, Clone)]
enum Step {
    Forward,
    Backward,
}

/// Compute the item to move focus to.
///
/// Walks `order` from `current` in `direction`, skipping ids for which
/// `is_disabled` returns `true`. A `current` that is `None` (or not present in
/// `order`) starts the walk just outside the sequence, so `Next` lands on the
/// first enabled item and `Previous` on the last. `First` and `Last` scan from
/// the corresponding end.
///
/// Returns `None` when no enabled candidate is reachable: the set is empty or
/// fully disabled, or the walk hit an end with [`WrapMode::Never`].
pub fn navigate<'a, K, F>(
    order: &'a [K],
    is_disabled: F,
    current: Option<&K>,
    direction: Direction,
    wrap: WrapMode,
) -> Option<&'a K>
where
    K: Eq,
    F: Fn(&K) -> bool,
{
    if order.is_empty() {
        return None;
    }
    let origin = current.and_then(|c| order.iter().position(|k| k == c));
    let (from, step, wrap) = match direction {
        Direction::Next => (origin, Step::Forward, wrap),
        Direction::Previous => (origin, Step::Backward, wrap),
        Direction::First => (None, Step::Forward, WrapMode::Never),
        Direction::Last => (None, Step::Backward, WrapMode::Never),
    };
    let found = walk(order, &is_disabled, from, step, wrap);

    #[cfg(feature = "tracing")]
    tracing::trace!(?direction, ?wrap, ?origin, ?found, "roving navigate");

    found.map(|i| &order[i])
}

// `from == None` means "just outside the sequence" on the side the walk starts from.
fn walk<K, F>(
    order: &[K],
    is_disabled: &F,
    from: Option<usize>,
    step: Step,
    wrap: WrapMode,
) -> Option<usize>
where
    F: Fn(&K) -> bool,
{
    let len = order.len();
    let mut pos = from;
    // Each index is visited at most once.
    for _ in 0..len {
        let next = match (step, pos) {
            (Step::Forward, None) => Some(0),
            (Step::Forward, Some(i)) if i + 1 < len => Some(i + 1),
            (Step::Backward, None) => Some(len - 1),
            (Step::Backward, Some(i)) if i > 0 => Some(i - 1),
            _ => None,
        };
        let i = match (next, wrap, step) {
            (Some(i), _, _) => i,
            (None, WrapMode::Never, _) => return None,
            (None, WrapMode::Loop, Step::Forward) => 0,
            (None, WrapMode::Loop, Step::Backward) => len - 1,
        };
        if !is_disabled(&order[i]) {
            return Some(i);
        }
        pos = Some(i);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORDER: [&str; 4] = ["a", "b", "c", "d"];

    fn b_disabled(id: &&str) -> bool {
        *id == "b"
    }

    fn none_disabled(_: &&str) -> bool {
        false
    }

    #[test]
    fn next_skips_disabled() {
        let got = navigate(&ORDER, b_disabled, Some(&"a"), Direction::Next, WrapMode::Never);
        assert_eq!(got, Some(&"c"));
    }

    #[test]
    fn prev_skips_disabled() {
        let got = navigate(&ORDER, b_disabled, Some(&"c"), Direction::Previous, WrapMode::Never);
        assert_eq!(got, Some(&"a"));
    }

    #[test]
    fn loop_wraps_both_ways() {
        assert_eq!(
            navigate(&ORDER, b_disabled, Some(&"d"), Direction::Next, WrapMode::Loop),
            Some(&"a")
        );
        assert_eq!(
            navigate(&ORDER, none_disabled, Some(&"a"), Direction::Previous, WrapMode::Loop),
            Some(&"d")
        );
    }

    #[test]
    fn no_wrap_stops_at_edges() {
        assert_eq!(
            navigate(&ORDER, b_disabled, Some(&"d"), Direction::Next, WrapMode::Never),
            None
        );
        assert_eq!(
            navigate(&ORDER, none_disabled, Some(&"a"), Direction::Previous, WrapMode::Never),
            None
        );
    }

    #[test]
    fn wrap_skips_disabled_at_the_far_end() {
        let disabled = |id: &&str| *id == "a";
        assert_eq!(
            navigate(&ORDER, disabled, Some(&"d"), Direction::Next, WrapMode::Loop),
            Some(&"b")
        );
    }

    #[test]
    fn first_and_last_skip_disabled_ends() {
        let disabled = |id: &&str| *id == "a" || *id == "d";
        assert_eq!(
            navigate(&ORDER, disabled, Some(&"b"), Direction::First, WrapMode::Never),
            Some(&"b")
        );
        assert_eq!(
            navigate(&ORDER, disabled, None, Direction::Last, WrapMode::Loop),
            Some(&"c")
        );
    }

    #[test]
    fn no_focus_enters_from_the_ends() {
        assert_eq!(
            navigate(&ORDER, none_disabled, None, Direction::Next, WrapMode::Never),
            Some(&"a")
        );
        assert_eq!(
            navigate(&ORDER, none_disabled, None, Direction::Previous, WrapMode::Never),
            Some(&"d")
        );
        // An unknown origin behaves like no focus.
        assert_eq!(
            navigate(&ORDER, none_disabled, Some(&"zz"), Direction::Next, WrapMode::Never),
            Some(&"a")
        );
    }

    #[test]
    fn fully_disabled_yields_none() {
        let all = |_: &&str| true;
        for direction in [Direction::Next, Direction::Previous, Direction::First, Direction::Last] {
            for wrap in [WrapMode::Never, WrapMode::Loop] {
                assert_eq!(navigate(&ORDER, all, Some(&"b"), direction, wrap), None);
                assert_eq!(navigate(&ORDER, all, None, direction, wrap), None);
            }
        }
    }

    #[test]
    fn lone_enabled_item_loops_to_itself() {
        let disabled = |id: &&str| *id != "c";
        assert_eq!(
            navigate(&ORDER, disabled, Some(&"c"), Direction::Next, WrapMode::Loop),
            Some(&"c")
        );
        assert_eq!(
            navigate(&ORDER, disabled, Some(&"c"), Direction::Next, WrapMode::Never),
            None
        );
    }

    #[test]
    fn empty_order() {
        let order: [&str; 0] = [];
        assert_eq!(
            navigate(&order, none_disabled, None, Direction::First, WrapMode::Loop),
            None
        );
    }
}
