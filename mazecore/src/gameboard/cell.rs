use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::Pos;

use self::Direction::*;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DirectionError {
    #[error("{0} is not a valid wall direction")]
    InvalidWallDirection(String),
}

/// Side of a cell, each one may hold a wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Order in which neighbours are enumerated, random draws index into it.
    pub fn get_in_order() -> [Direction; 4] {
        [Up, Down, Left, Right]
    }

    pub fn to_coord(&self) -> Pos {
        match self {
            Up => Pos::new(-1, 0),
            Down => Pos::new(1, 0),
            Left => Pos::new(0, -1),
            Right => Pos::new(0, 1),
        }
    }

    pub fn reverse_wall(&self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Up => "up",
            Down => "down",
            Left => "left",
            Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Direction {
    type Err = DirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(Up),
            "down" => Ok(Down),
            "left" => Ok(Left),
            "right" => Ok(Right),
            _ => Err(DirectionError::InvalidWallDirection(s.to_string())),
        }
    }
}

/// Four walls and the visited mark.
///
/// Serialized as `{left, right, up, down, visited}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    left: bool,
    right: bool,
    up: bool,
    down: bool,
    visited: bool,
}

impl Cell {
    pub fn new() -> Cell {
        Cell {
            left: true,
            right: true,
            up: true,
            down: true,
            visited: false,
        }
    }

    pub fn remove_wall(&mut self, wall: Direction) {
        match wall {
            Up => self.up = false,
            Down => self.down = false,
            Left => self.left = false,
            Right => self.right = false,
        }
    }

    pub fn get_wall(&self, wall: Direction) -> bool {
        match wall {
            Up => self.up,
            Down => self.down,
            Left => self.left,
            Right => self.right,
        }
    }

    pub fn is_open(&self, wall: Direction) -> bool {
        !self.get_wall(wall)
    }

    /// Puts all four walls back on this cell only, neighbours are left untouched.
    pub fn restore_walls(&mut self) {
        self.up = true;
        self.down = true;
        self.left = true;
        self.right = true;
    }

    pub fn is_visited(&self) -> bool {
        self.visited
    }

    pub(crate) fn set_visited(&mut self, visited: bool) {
        self.visited = visited;
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::new()
    }
}

/// Down wall glyph followed by right wall glyph.
impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let down = if self.down { '_' } else { ' ' };
        let right = if self.right { '|' } else { ' ' };
        write!(f, "{down}{right}")
    }
}
