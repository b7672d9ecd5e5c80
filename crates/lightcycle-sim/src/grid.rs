use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Progress units in one cell. Motion, speed and turn tolerance are all
/// measured in these units; pixels only appear in the render view.
pub const PROGRESS_PER_CELL: u32 = 100;

/// A grid node, addressed by integer `(col, row)`. Row grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighbouring node one step along `direction`, or `None` past the
    /// edge of the `i32` coordinate range.
    pub fn checked_step(self, direction: Direction) -> Option<Self> {
        let (dx, dy) = direction.vector();
        Some(Self {
            x: self.x.checked_add(dx)?,
            y: self.y.checked_add(dy)?,
        })
    }
}

impl From<(i32, i32)> for Cell {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Cardinal direction of travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

/// The two axes a direction can lie on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn axis(self) -> Axis {
        match self {
            Direction::Up | Direction::Down => Axis::Vertical,
            Direction::Left | Direction::Right => Axis::Horizontal,
        }
    }

    /// Whether `other` lies on the same axis (equal or opposite).
    pub fn is_parallel(self, other: Direction) -> bool {
        self.axis() == other.axis()
    }

    /// Unit step in grid space.
    pub fn vector(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Right => (1, 0),
            Direction::Left => (-1, 0),
        }
    }

    /// Heading sprite rotation in degrees, with Down as the unrotated pose.
    pub fn rotation_degrees(self) -> f32 {
        match self {
            Direction::Up => 180.0,
            Direction::Right => 90.0,
            Direction::Down => 0.0,
            Direction::Left => -90.0,
        }
    }
}

/// Unvalidated grid parameters as they appear in a config file.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct RawGridConfig {
    cell_size: u32,
    speed: u32,
    turn_tolerance: u32,
}

impl Default for RawGridConfig {
    fn default() -> Self {
        Self {
            cell_size: 40,
            speed: 4,
            turn_tolerance: 5,
        }
    }
}

/// Immutable grid parameters, validated on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGridConfig", into = "RawGridConfig")]
pub struct GridConfig {
    cell_size: u32,
    speed: u32,
    turn_tolerance: u32,
}

impl GridConfig {
    /// Build a grid config.
    ///
    /// `cell_size` is pixels per cell. `speed` and `turn_tolerance` are in
    /// progress units ([`PROGRESS_PER_CELL`] per cell). Speed must divide a
    /// cell exactly so boundary crossings never drift, and must stay below a
    /// full cell so at most one node is crossed per tick.
    pub fn new(cell_size: u32, speed: u32, turn_tolerance: u32) -> Result<Self, ConfigError> {
        if cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }
        if speed == 0 {
            return Err(ConfigError::ZeroSpeed);
        }
        if speed >= PROGRESS_PER_CELL {
            return Err(ConfigError::SpeedNotBelowCell {
                speed,
                per_cell: PROGRESS_PER_CELL,
            });
        }
        if PROGRESS_PER_CELL % speed != 0 {
            return Err(ConfigError::SpeedDoesNotDivideCell {
                speed,
                per_cell: PROGRESS_PER_CELL,
            });
        }
        let half = PROGRESS_PER_CELL / 2;
        if turn_tolerance >= half {
            return Err(ConfigError::ToleranceTooWide {
                tolerance: turn_tolerance,
                half,
            });
        }
        Ok(Self {
            cell_size,
            speed,
            turn_tolerance,
        })
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    pub fn turn_tolerance(&self) -> u32 {
        self.turn_tolerance
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cell_size: 40,
            speed: 4,
            turn_tolerance: 5,
        }
    }
}

impl TryFrom<RawGridConfig> for GridConfig {
    type Error = ConfigError;

    fn try_from(raw: RawGridConfig) -> Result<Self, Self::Error> {
        GridConfig::new(raw.cell_size, raw.speed, raw.turn_tolerance)
    }
}

impl From<GridConfig> for RawGridConfig {
    fn from(grid: GridConfig) -> Self {
        Self {
            cell_size: grid.cell_size,
            speed: grid.speed,
            turn_tolerance: grid.turn_tolerance,
        }
    }
}
