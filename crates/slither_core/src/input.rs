//! Directional input boundary
//!
//! The core never polls devices itself; whatever owns the window implements
//! [`DirectionInput`] and hands it to the systems each tick.

use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];
}

pub trait DirectionInput {
    fn is_direction_down(&self, direction: Direction) -> bool;
}

/// Nothing ever pressed.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoInput;

impl DirectionInput for NoInput {
    fn is_direction_down(&self, _direction: Direction) -> bool {
        false
    }
}

/// Fixed set of held directions, for tests and scripted runs.
#[derive(Debug, Clone, Default)]
pub struct HeldDirections(pub Vec<Direction>);

impl DirectionInput for HeldDirections {
    fn is_direction_down(&self, direction: Direction) -> bool {
        self.0.contains(&direction)
    }
}

/// Heading requested by the held keys, or `None` when no direction key is
/// down. Left beats right and up beats down; each axis is -1, 0 or 1.
pub fn steering(input: &dyn DirectionInput) -> Option<Vec2> {
    let x = if input.is_direction_down(Direction::Left) {
        -1.0
    } else if input.is_direction_down(Direction::Right) {
        1.0
    } else {
        0.0
    };
    let y = if input.is_direction_down(Direction::Up) {
        -1.0
    } else if input.is_direction_down(Direction::Down) {
        1.0
    } else {
        0.0
    };

    let heading = Vec2::new(x, y);
    (heading != Vec2::ZERO).then_some(heading)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_keys_resolve_to_left_and_up() {
        let held = HeldDirections(Direction::ALL.to_vec());
        assert_eq!(steering(&held), Some(Vec2::new(-1.0, -1.0)));
    }

    #[test]
    fn single_key_sets_one_axis() {
        let held = HeldDirections(vec![Direction::Down]);
        assert_eq!(steering(&held), Some(Vec2::new(0.0, 1.0)));
    }

    #[test]
    fn no_keys_means_no_steering() {
        assert_eq!(steering(&NoInput), None);
    }
}
