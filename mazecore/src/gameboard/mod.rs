pub mod maze;
pub use maze::{HuntTarget, Maze, Neighbour, Neighbours};
pub mod cell;
pub use cell::{Cell, Direction, DirectionError};

pub mod algorithms;
