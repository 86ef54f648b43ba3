//! World-level game state that no single entity owns

/// Candy bookkeeping shared by the collision and spawn systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameState {
    pub current_candies: u32,
    pub max_candies: u32,
}

impl GameState {
    pub const fn new(max_candies: u32) -> Self {
        Self {
            current_candies: 0,
            max_candies,
        }
    }

    pub fn wants_candy(&self) -> bool {
        self.current_candies < self.max_candies
    }

    /// One candy eaten. Never goes below zero.
    pub fn candy_eaten(&mut self) {
        self.current_candies = self.current_candies.saturating_sub(1);
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(5)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Playing,
    Paused,
}

impl RunState {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            RunState::Playing => RunState::Paused,
            RunState::Paused => RunState::Playing,
        }
    }

    pub fn is_paused(self) -> bool {
        self == RunState::Paused
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candy_count_saturates_at_zero() {
        let mut state = GameState::new(2);
        assert!(state.wants_candy());
        state.candy_eaten();
        assert_eq!(state.current_candies, 0);
    }

    #[test]
    fn toggle_flips_run_state() {
        assert!(RunState::Playing.toggled().is_paused());
        assert_eq!(RunState::Paused.toggled(), RunState::Playing);
    }
}
