use serde::{Deserialize, Serialize};

use crate::grid::Direction;

/// Order in which held directions are tried when several are down at once.
///
/// This tie-break decides observable turn outcomes, so it is fixed.
pub const TURN_PRIORITY: [Direction; 4] = [
    Direction::Up,
    Direction::Left,
    Direction::Down,
    Direction::Right,
];

/// Level-triggered directional keys, sampled once at the start of a tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeldDirections {
    pub up: bool,
    pub right: bool,
    pub down: bool,
    pub left: bool,
}

impl HeldDirections {
    pub const NONE: HeldDirections = HeldDirections {
        up: false,
        right: false,
        down: false,
        left: false,
    };

    /// Only `direction` held.
    pub fn only(direction: Direction) -> Self {
        let mut held = Self::NONE;
        held.set(direction, true);
        held
    }

    pub fn from_directions(directions: &[Direction]) -> Self {
        let mut held = Self::NONE;
        for &direction in directions {
            held.set(direction, true);
        }
        held
    }

    /// Map WASD / arrow key codes (`"KeyW"`, `"ArrowUp"`, …) onto directions.
    /// Unknown codes are ignored.
    pub fn from_key_codes<'a>(codes: impl IntoIterator<Item = &'a str>) -> Self {
        let mut held = Self::NONE;
        for code in codes {
            let direction = match code {
                "KeyW" | "ArrowUp" => Direction::Up,
                "KeyA" | "ArrowLeft" => Direction::Left,
                "KeyS" | "ArrowDown" => Direction::Down,
                "KeyD" | "ArrowRight" => Direction::Right,
                _ => continue,
            };
            held.set(direction, true);
        }
        held
    }

    pub fn is_held(&self, direction: Direction) -> bool {
        match direction {
            Direction::Up => self.up,
            Direction::Right => self.right,
            Direction::Down => self.down,
            Direction::Left => self.left,
        }
    }

    pub fn set(&mut self, direction: Direction, held: bool) {
        match direction {
            Direction::Up => self.up = held,
            Direction::Right => self.right = held,
            Direction::Down => self.down = held,
            Direction::Left => self.left = held,
        }
    }

    /// Held directions in [`TURN_PRIORITY`] order.
    pub fn in_priority_order(&self) -> impl Iterator<Item = Direction> + '_ {
        TURN_PRIORITY
            .into_iter()
            .filter(move |&d| self.is_held(d))
    }
}
