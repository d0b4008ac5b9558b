use super::{choose_index, random_cell, Maze, MazeAlgorithm};

use crate::rng::IntSource;

/// Randomized iterative backtracker.
pub struct DepthFirstSearch {}

impl MazeAlgorithm for DepthFirstSearch {
    fn generate_individual<R: IntSource + ?Sized>(maze: &mut Maze, rng: &mut R) {
        let size = maze.size();
        let mut stack = Vec::with_capacity(size.area());

        let mut current = random_cell(size, rng);
        loop {
            // a cell is marked when it becomes current, not when it's chosen
            maze.visit_cell(current);
            let unvisited_neighbors = maze.get_unvisited_neighbour_indices(current);

            if !unvisited_neighbors.is_empty() {
                stack.push(current);
                let chosen = unvisited_neighbors[choose_index(unvisited_neighbors.len(), rng)];
                maze.remove_wall(current, chosen.direction);
                current = chosen.pos;
            } else if let Some(previous) = stack.pop() {
                current = previous;
            } else {
                break;
            }
        }
    }
}
