//! Per-tick input snapshot.
//!
//! The frontend reports the raw set of keys that are down this frame; the
//! snapshot keeps that set and the previous frame's set so scenes can ask
//! two questions only: was a key *pressed* this tick (edge) or is it *held*
//! (level).

use bitflags::bitflags;

bitflags! {
    /// A set of keys, used both for raw device state and for queries.
    ///
    /// A query with more than one key means "any of these".
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Keys: u16 {
        /// Up arrow.
        const UP = 1 << 0;
        /// Down arrow.
        const DOWN = 1 << 1;
        /// Left arrow.
        const LEFT = 1 << 2;
        /// Right arrow.
        const RIGHT = 1 << 3;
        /// W key.
        const W = 1 << 4;
        /// A key.
        const A = 1 << 5;
        /// S key.
        const S = 1 << 6;
        /// D key.
        const D = 1 << 7;
        /// Enter / return.
        const ENTER = 1 << 8;
        /// Space bar.
        const SPACE = 1 << 9;
        /// Escape.
        const ESCAPE = 1 << 10;
    }
}

impl Keys {
    /// Keys that move up or select the previous menu entry.
    pub const BIND_UP: Self = Self::UP.union(Self::W);
    /// Keys that move down or select the next menu entry.
    pub const BIND_DOWN: Self = Self::DOWN.union(Self::S);
    /// Keys that move left.
    pub const BIND_LEFT: Self = Self::LEFT.union(Self::A);
    /// Keys that move right.
    pub const BIND_RIGHT: Self = Self::RIGHT.union(Self::D);
    /// Keys that confirm a choice.
    pub const BIND_CONFIRM: Self = Self::ENTER.union(Self::SPACE);
}

/// Double-buffered keyboard state for a single tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    current: Keys,
    previous: Keys,
}

impl InputSnapshot {
    /// Create a snapshot with no keys down.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            current: Keys::empty(),
            previous: Keys::empty(),
        }
    }

    /// Advance one tick: the current state becomes the previous one.
    pub fn advance(&mut self, raw: Keys) {
        self.previous = self.current;
        self.current = raw;
    }

    /// Build the snapshot a scene would see after `previous` then `current`.
    #[must_use]
    pub const fn from_states(previous: Keys, current: Keys) -> Self {
        Self { current, previous }
    }

    /// True only on the tick where any of `keys` went from up to down.
    #[must_use]
    pub fn pressed(&self, keys: Keys) -> bool {
        !self
            .current
            .intersection(keys)
            .difference(self.previous)
            .is_empty()
    }

    /// True on every tick where any of `keys` is down.
    #[must_use]
    pub fn held(&self, keys: Keys) -> bool {
        self.current.intersects(keys)
    }

    /// Confirm (Enter or Space) was pressed this tick.
    #[must_use]
    pub fn confirm_pressed(&self) -> bool {
        self.pressed(Keys::BIND_CONFIRM)
    }

    /// Up (arrow or W) was pressed this tick.
    #[must_use]
    pub fn up_pressed(&self) -> bool {
        self.pressed(Keys::BIND_UP)
    }

    /// Down (arrow or S) was pressed this tick.
    #[must_use]
    pub fn down_pressed(&self) -> bool {
        self.pressed(Keys::BIND_DOWN)
    }

    /// Unnormalized direction from held movement keys, each axis in {-1, 0, 1}.
    ///
    /// Screen coordinates: y grows downward.
    #[must_use]
    pub fn direction_held(&self) -> (f32, f32) {
        let mut x = 0.0;
        let mut y = 0.0;
        if self.held(Keys::BIND_UP) {
            y -= 1.0;
        }
        if self.held(Keys::BIND_DOWN) {
            y += 1.0;
        }
        if self.held(Keys::BIND_LEFT) {
            x -= 1.0;
        }
        if self.held(Keys::BIND_RIGHT) {
            x += 1.0;
        }
        (x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pressed_is_edge_triggered() {
        let mut input = InputSnapshot::new();
        input.advance(Keys::ENTER);
        assert!(input.pressed(Keys::ENTER));
        assert!(input.held(Keys::ENTER));

        input.advance(Keys::ENTER);
        assert!(!input.pressed(Keys::ENTER), "still down is not a new press");
        assert!(input.held(Keys::ENTER));

        input.advance(Keys::empty());
        assert!(!input.pressed(Keys::ENTER));
        assert!(!input.held(Keys::ENTER));
    }

    #[test]
    fn test_query_matches_any_key() {
        let input = InputSnapshot::from_states(Keys::empty(), Keys::SPACE);
        assert!(input.confirm_pressed());
        assert!(!input.up_pressed());
    }

    #[test]
    fn test_pressed_with_other_key_already_held() {
        // Enter held from before, Space newly pressed: confirm still fires
        let input = InputSnapshot::from_states(Keys::ENTER, Keys::ENTER | Keys::SPACE);
        assert!(input.confirm_pressed());
    }

    #[test]
    fn test_direction_held() {
        let input = InputSnapshot::from_states(Keys::empty(), Keys::W | Keys::RIGHT);
        assert_eq!(input.direction_held(), (1.0, -1.0));

        let opposed = InputSnapshot::from_states(Keys::empty(), Keys::LEFT | Keys::D);
        assert_eq!(opposed.direction_held(), (0.0, 0.0));
    }
}
