pub mod array;
pub mod config;
pub mod core;
pub mod gameboard;
pub mod rng;
pub mod solver;

pub use config::{generate, GeneratedMaze, MazeConfig};
