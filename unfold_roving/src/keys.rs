// Copyright 2025 the Unfold Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Key vocabulary and the mapping from keys to navigation directions.

use crate::Direction;

/// Keys that composite widgets react to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// `ArrowUp`.
    ArrowUp,
    /// `ArrowDown`.
    ArrowDown,
    /// `ArrowLeft`.
    ArrowLeft,
    /// `ArrowRight`.
    ArrowRight,
    /// `Home`.
    Home,
    /// `End`.
    End,
    /// `Enter`.
    Enter,
    /// The space bar.
    Space,
    /// `Escape`.
    Escape,
    /// `Tab`.
    Tab,
    /// Any printable character.
    Character(char),
}

impl Key {
    /// Returns `true` for keys that activate the focused element like a click.
    pub const fn is_activation(self) -> bool {
        matches!(self, Self::Enter | Self::Space)
    }
}

bitflags::bitflags! {
    /// Arrow-key axes a composite responds to.
    ///
    /// Keys on an axis that is not enabled are ignored, which leaves them to
    /// the host (for example, vertical tabs let left/right scroll the page).
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Axes: u8 {
        /// `ArrowLeft` / `ArrowRight`.
        const HORIZONTAL = 0b0000_0001;
        /// `ArrowUp` / `ArrowDown`.
        const VERTICAL   = 0b0000_0010;
    }
}

impl Default for Axes {
    fn default() -> Self {
        Self::HORIZONTAL | Self::VERTICAL
    }
}

/// Reading direction, which flips the meaning of horizontal arrows.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ReadingDirection {
    /// Left to right.
    #[default]
    Ltr,
    /// Right to left.
    Rtl,
}

/// Translate a key press into a navigation direction.
///
/// `Home`/`End` always map to [`Direction::First`]/[`Direction::Last`]. Arrows
/// map only when their axis is enabled in `axes`. Any other key yields `None`.
pub fn direction_for_key(key: Key, axes: Axes, dir: ReadingDirection) -> Option<Direction> {
    let (forward, backward) = match dir {
        ReadingDirection::Ltr => (Key::ArrowRight, Key::ArrowLeft),
        ReadingDirection::Rtl => (Key::ArrowLeft, Key::ArrowRight),
    };
    match key {
        Key::Home => Some(Direction::First),
        Key::End => Some(Direction::Last),
        Key::ArrowDown if axes.contains(Axes::VERTICAL) => Some(Direction::Next),
        Key::ArrowUp if axes.contains(Axes::VERTICAL) => Some(Direction::Previous),
        k if k == forward && axes.contains(Axes::HORIZONTAL) => Some(Direction::Next),
        k if k == backward && axes.contains(Axes::HORIZONTAL) => Some(Direction::Previous),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertical_only_ignores_horizontal_arrows() {
        let axes = Axes::VERTICAL;
        let ltr = ReadingDirection::Ltr;
        assert_eq!(direction_for_key(Key::ArrowDown, axes, ltr), Some(Direction::Next));
        assert_eq!(direction_for_key(Key::ArrowUp, axes, ltr), Some(Direction::Previous));
        assert_eq!(direction_for_key(Key::ArrowRight, axes, ltr), None);
        assert_eq!(direction_for_key(Key::Home, axes, ltr), Some(Direction::First));
        assert_eq!(direction_for_key(Key::End, axes, ltr), Some(Direction::Last));
    }

    #[test]
    fn rtl_flips_horizontal_arrows() {
        let axes = Axes::HORIZONTAL;
        assert_eq!(
            direction_for_key(Key::ArrowLeft, axes, ReadingDirection::Rtl),
            Some(Direction::Next)
        );
        assert_eq!(
            direction_for_key(Key::ArrowLeft, axes, ReadingDirection::Ltr),
            Some(Direction::Previous)
        );
        assert_eq!(direction_for_key(Key::ArrowDown, axes, ReadingDirection::Ltr), None);
    }

    #[test]
    fn non_navigation_keys() {
        let axes = Axes::default();
        for key in [Key::Enter, Key::Space, Key::Escape, Key::Tab, Key::Character('x')] {
            assert_eq!(direction_for_key(key, axes, ReadingDirection::Ltr), None);
        }
        assert!(Key::Space.is_activation());
        assert!(!Key::Escape.is_activation());
    }
}
