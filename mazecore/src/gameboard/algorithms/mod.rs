mod depth_first_search;
mod hunt_and_kill;

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Maze;

use crate::{core::*, rng::IntSource};
pub use depth_first_search::DepthFirstSearch;
pub use hunt_and_kill::HuntAndKill;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("{0} is an Invalid Maze Generation Algorithm")]
    InvalidAlgorithm(String),
    #[error("Cannot generate a maze of size {0}")]
    InvalidSize(Size),
}

/// Supported generation algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Algorithm {
    #[default]
    #[serde(rename = "DEPTHFIRST")]
    DepthFirst,
    #[serde(rename = "HUNTANDKILL")]
    HuntAndKill,
}

impl Algorithm {
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::DepthFirst => "DEPTHFIRST",
            Algorithm::HuntAndKill => "HUNTANDKILL",
        }
    }

    pub fn generate<R: IntSource + ?Sized>(
        &self,
        size: Size,
        rng: &mut R,
    ) -> Result<Maze, GenerationError> {
        match self {
            Algorithm::DepthFirst => DepthFirstSearch::generate(size, rng),
            Algorithm::HuntAndKill => HuntAndKill::generate(size, rng),
        }
    }
}

/// Case-insensitive, an empty name picks the default algorithm.
impl FromStr for Algorithm {
    type Err = GenerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "" | "DEPTHFIRST" => Ok(Algorithm::DepthFirst),
            "HUNTANDKILL" => Ok(Algorithm::HuntAndKill),
            _ => Err(GenerationError::InvalidAlgorithm(s.to_string())),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub trait MazeAlgorithm {
    fn generate<R: IntSource + ?Sized>(size: Size, rng: &mut R) -> Result<Maze, GenerationError> {
        if !size.all_positive() {
            return Err(GenerationError::InvalidSize(size));
        }

        let mut maze = Maze::new(size.width, size.height);
        Self::generate_individual(&mut maze, rng);
        Ok(maze)
    }

    /// Carves a spanning tree into a fresh, non-empty maze.
    fn generate_individual<R: IntSource + ?Sized>(maze: &mut Maze, rng: &mut R);
}

/// Generates mazes of a fixed size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Generator {
    size: Size,
}

impl Generator {
    pub fn new(width: usize, height: usize) -> Self {
        Generator {
            size: Size::new(width, height),
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Parses the algorithm name and generates the maze with it.
    pub fn generate_maze<R: IntSource + ?Sized>(
        &self,
        algorithm: &str,
        rng: &mut R,
    ) -> Result<Maze, GenerationError> {
        let algorithm = algorithm.parse::<Algorithm>()?;
        self.generate_with(algorithm, rng)
    }

    pub fn generate_with<R: IntSource + ?Sized>(
        &self,
        algorithm: Algorithm,
        rng: &mut R,
    ) -> Result<Maze, GenerationError> {
        log::debug!("Generating {} maze using {}", self.size, algorithm);
        let maze = algorithm.generate(self.size, rng)?;
        log::trace!("Generated {} maze, {} open walls", self.size, maze.open_wall_count());
        Ok(maze)
    }
}

/// Draws the starting cell, row first.
pub(crate) fn random_cell<R: IntSource + ?Sized>(size: Size, rng: &mut R) -> Pos {
    let row = rng.next_int(0, size.height as i32 - 1);
    let column = rng.next_int(0, size.width as i32 - 1);
    Pos::new(row, column)
}

pub(crate) fn choose_index<R: IntSource + ?Sized>(len: usize, rng: &mut R) -> usize {
    debug_assert!(len > 0);
    rng.next_int(0, len as i32 - 1) as usize
}
