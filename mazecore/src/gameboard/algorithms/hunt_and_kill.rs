use super::{choose_index, random_cell, Maze, MazeAlgorithm};

use crate::{core::Pos, rng::IntSource};

/// Random walks until stuck, then hunts for the first unvisited cell touching
/// the visited region and walks again from there.
pub struct HuntAndKill {}

impl HuntAndKill {
    /// Walks through unvisited cells until there is none next to the current one.
    pub fn randomised_walk<R: IntSource + ?Sized>(maze: &mut Maze, mut current: Pos, rng: &mut R) {
        loop {
            let unvisited = maze.get_unvisited_neighbour_indices(current);
            if unvisited.is_empty() {
                break;
            }

            let next = unvisited[choose_index(unvisited.len(), rng)];
            maze.remove_wall(current, next.direction);
            current = next.pos;
            maze.visit_cell(current);
        }
    }
}

impl MazeAlgorithm for HuntAndKill {
    fn generate_individual<R: IntSource + ?Sized>(maze: &mut Maze, rng: &mut R) {
        let start = random_cell(maze.size(), rng);
        maze.visit_cell(start);
        Self::randomised_walk(maze, start, rng);

        while maze.get_total_unvisited_cells() > 0 {
            let Some(target) = maze.get_first_unvisited_cell_with_visited_neighbour() else {
                log::warn!(
                    "{} cells left unvisited but none borders the visited region",
                    maze.get_total_unvisited_cells()
                );
                break;
            };

            let neighbour = target.neighbours[choose_index(target.neighbours.len(), rng)];
            maze.remove_wall(target.cell, neighbour.direction);
            maze.visit_cell(target.cell);
            Self::randomised_walk(maze, target.cell, rng);
        }
    }
}
