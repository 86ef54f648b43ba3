//! Keyboard state fed by window events

use slither_core::input::{Direction, DirectionInput};
use std::collections::HashSet;

/// Directions currently held down.
///
/// The window layer translates its key events into [`press`]/[`release`]
/// calls; systems read it through [`DirectionInput`].
///
/// [`press`]: KeyboardState::press
/// [`release`]: KeyboardState::release
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    held: HashSet<Direction>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, direction: Direction) {
        self.held.insert(direction);
    }

    pub fn release(&mut self, direction: Direction) {
        self.held.remove(&direction);
    }

    /// Forget every held key, e.g. when the window loses focus.
    pub fn clear(&mut self) {
        self.held.clear();
    }
}

impl DirectionInput for KeyboardState {
    fn is_direction_down(&self, direction: Direction) -> bool {
        self.held.contains(&direction)
    }
}
