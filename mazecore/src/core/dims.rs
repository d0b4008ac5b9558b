use std::{
    fmt,
    ops::{Add, Sub},
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Position of a cell on the grid.
///
/// Components are signed, so positions coming from the outside can be
/// validated instead of silently wrapping around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Pos {
    pub row: i32,
    pub column: i32,
}

/// Size of the grid, `width` columns by `height` rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: usize,
    pub height: usize,
}

impl Pos {
    pub const ZERO: Pos = Pos::new(0, 0);

    pub const fn new(row: i32, column: i32) -> Self {
        Pos { row, column }
    }

    /// `|Δrow| + |Δcolumn|`
    pub fn manhattan(&self, other: Pos) -> u32 {
        self.row.abs_diff(other.row) + self.column.abs_diff(other.column)
    }

    pub fn is_negative(&self) -> bool {
        self.row < 0 || self.column < 0
    }
}

impl Size {
    pub const fn new(width: usize, height: usize) -> Self {
        Size { width, height }
    }

    pub fn area(&self) -> usize {
        self.width * self.height
    }

    pub fn all_positive(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    pub fn contains(&self, pos: Pos) -> bool {
        !pos.is_negative() && (pos.row as usize) < self.height && (pos.column as usize) < self.width
    }

    /// Every position inside, in row-major order.
    pub fn iter_pos(self) -> impl Iterator<Item = Pos> {
        (0..self.height).flat_map(move |row| {
            (0..self.width).map(move |column| Pos::new(row as i32, column as i32))
        })
    }
}

impl Add for Pos {
    type Output = Pos;

    fn add(self, other: Pos) -> Pos {
        Pos::new(self.row + other.row, self.column + other.column)
    }
}

impl Sub for Pos {
    type Output = Pos;

    fn sub(self, other: Pos) -> Pos {
        Pos::new(self.row - other.row, self.column - other.column)
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row, self.column)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("expected position as `row,column`, got `{0}`")]
pub struct ParsePosError(String);

impl FromStr for Pos {
    type Err = ParsePosError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParsePosError(s.to_string());
        let (row, column) = s.split_once(',').ok_or_else(err)?;
        let row = row.trim().parse().map_err(|_| err())?;
        let column = column.trim().parse().map_err(|_| err())?;
        Ok(Pos::new(row, column))
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
