use std::fmt;

use smallvec::SmallVec;

use crate::{
    array::Array2D,
    core::*,
    gameboard::cell::{Cell, Direction},
    solver::{Solver, SolverError},
};

/// Neighbouring cell together with the side of the cell it lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbour {
    pub direction: Direction,
    pub pos: Pos,
}

/// At most four, always in `Direction::get_in_order` order.
pub type Neighbours = SmallVec<[Neighbour; 4]>;

/// Result of the hunt phase: an unvisited cell bordering the visited region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuntTarget {
    pub cell: Pos,
    pub neighbours: Neighbours,
}

/// Grid of cells, `height` rows of `width` cells.
///
/// Walls between two cells are stored on both of them and [`Maze::remove_wall`]
/// keeps the two copies in sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    pub(crate) cells: Array2D<Cell>,
    unvisited: usize,
    /// Row-major index of the first unvisited cell, `area` once all are visited.
    first_unvisited: usize,
}

impl Maze {
    pub fn new(width: usize, height: usize) -> Self {
        Maze {
            cells: Array2D::new(Cell::new(), width, height),
            unvisited: width * height,
            first_unvisited: 0,
        }
    }

    pub fn size(&self) -> Size {
        self.cells.size()
    }

    pub fn width(&self) -> usize {
        self.size().width
    }

    pub fn height(&self) -> usize {
        self.size().height
    }

    pub fn is_in_bounds(&self, pos: Pos) -> bool {
        self.size().contains(pos)
    }

    pub fn get_cells(&self) -> &Array2D<Cell> {
        &self.cells
    }

    pub fn get_cell(&self, pos: Pos) -> Option<&Cell> {
        self.cells.get(pos)
    }

    /// Direct access to a cell, mirrored walls are *not* maintained through it.
    pub fn get_cell_mut(&mut self, pos: Pos) -> Option<&mut Cell> {
        self.cells.get_mut(pos)
    }

    /// # Panics
    /// If `pos` is outside of the maze.
    pub fn get_cell_visited(&self, pos: Pos) -> bool {
        self.cells[pos].is_visited()
    }

    /// # Panics
    /// If `pos` is outside of the maze.
    pub fn visit_cell(&mut self, pos: Pos) {
        let cell = &mut self.cells[pos];
        if cell.is_visited() {
            return;
        }
        cell.set_visited(true);
        self.unvisited -= 1;

        // cells are never unvisited again, so the cursor only moves forward
        let area = self.size().area();
        while self.first_unvisited < area && self.cell_at(self.first_unvisited).is_visited() {
            self.first_unvisited += 1;
        }
    }

    fn cell_at(&self, idx: usize) -> &Cell {
        let pos = self.cells.idx_to_pos(idx).expect("Index out of bounds");
        &self.cells[pos]
    }

    /// Removes the wall of the cell and the matching wall of the neighbour behind it.
    ///
    /// Outer walls can be removed too, there is just no neighbour to update.
    pub fn remove_wall(&mut self, pos: Pos, wall: Direction) {
        let Some(cell) = self.cells.get_mut(pos) else {
            return;
        };
        cell.remove_wall(wall);

        if let Some(neighbour) = self.cells.get_mut(pos + wall.to_coord()) {
            neighbour.remove_wall(wall.reverse_wall());
        }
    }

    /// # Panics
    /// If `pos` is outside of the maze.
    pub fn get_wall_status(&self, pos: Pos, wall: Direction) -> bool {
        self.cells[pos].get_wall(wall)
    }

    pub fn get_cell_neighbour_indices(&self, pos: Pos) -> Neighbours {
        if !self.is_in_bounds(pos) {
            return Neighbours::new();
        }

        Direction::get_in_order()
            .into_iter()
            .map(|direction| Neighbour {
                direction,
                pos: pos + direction.to_coord(),
            })
            .filter(|n| self.is_in_bounds(n.pos))
            .collect()
    }

    pub fn get_unvisited_neighbour_indices(&self, pos: Pos) -> Neighbours {
        self.neighbours_visited(pos, false)
    }

    pub fn get_visited_neighbour_indices(&self, pos: Pos) -> Neighbours {
        self.neighbours_visited(pos, true)
    }

    fn neighbours_visited(&self, pos: Pos, visited: bool) -> Neighbours {
        let mut neighbours = self.get_cell_neighbour_indices(pos);
        neighbours.retain(|n| self.get_cell_visited(n.pos) == visited);
        neighbours
    }

    /// First unvisited cell, in row-major order, that has at least one visited neighbour.
    pub fn get_first_unvisited_cell_with_visited_neighbour(&self) -> Option<HuntTarget> {
        self.iter_unvisited().find_map(|cell| {
            let neighbours = self.get_visited_neighbour_indices(cell);
            (!neighbours.is_empty()).then_some(HuntTarget { cell, neighbours })
        })
    }

    pub fn get_unvisited_cells(&self) -> Vec<Pos> {
        self.iter_unvisited().collect()
    }

    pub fn get_total_unvisited_cells(&self) -> usize {
        self.unvisited
    }

    /// Row-major, starting at the first unvisited cell instead of the origin.
    fn iter_unvisited(&self) -> impl Iterator<Item = Pos> + '_ {
        (self.first_unvisited..self.size().area())
            .filter_map(move |idx| self.cells.idx_to_pos(idx))
            .filter(move |&pos| !self.get_cell_visited(pos))
    }

    /// Number of open walls between two cells of the maze, outer walls don't count.
    pub fn open_wall_count(&self) -> usize {
        self.cells
            .iter_pos()
            .map(|pos| {
                [Direction::Right, Direction::Down]
                    .into_iter()
                    .filter(|&dir| {
                        self.is_in_bounds(pos + dir.to_coord()) && !self.get_wall_status(pos, dir)
                    })
                    .count()
            })
            .sum()
    }

    /// Runs the solver over this maze, see [`Solver::new`].
    pub fn generate_solution(&self, start: Pos, goal: Pos) -> Result<Solver<'_>, SolverError> {
        Solver::new(self, start, goal)
    }

    /// `{ "rows": [[{left, right, up, down, visited}, ...], ...] }`
    pub fn to_json(&self) -> serde_json::Value {
        let rows: Vec<&[Cell]> = self.cells.rows().collect();
        serde_json::json!({ "rows": rows })
    }

    pub(crate) fn fmt_top_border(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cell in self.cells.row(0).unwrap_or_default() {
            f.write_str(if cell.get_wall(Direction::Up) { " _" } else { "  " })?;
        }
        f.write_str("\n")
    }
}

/// ASCII rendering:
/// ```text
///  _ _ _
/// |_  |_|
/// |_| |_|
/// |_|_|_|
/// ```
impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_top_border(f)?;

        for (row, cells) in self.cells.rows().enumerate() {
            if row > 0 {
                f.write_str("\n")?;
            }
            if cells.first().is_some_and(|cell| cell.get_wall(Direction::Left)) {
                f.write_str("|")?;
            }
            for cell in cells {
                write!(f, "{cell}")?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Direction::*;

    fn pos(row: i32, column: i32) -> Pos {
        Pos::new(row, column)
    }

    fn directions(neighbours: &Neighbours) -> Vec<Direction> {
        neighbours.iter().map(|n| n.direction).collect()
    }

    #[test]
    fn created_with_dimensions() {
        for (width, height) in [(1, 1), (5, 5), (100, 50)] {
            let maze = Maze::new(width, height);
            assert_eq!(maze.width(), width);
            assert_eq!(maze.height(), height);
            assert_eq!(maze.get_cells().rows().count(), height);
            assert_eq!(maze.get_total_unvisited_cells(), width * height);
        }
    }

    #[test]
    fn remove_wall_mirrors_neighbour() {
        let mut maze = Maze::new(3, 3);

        maze.remove_wall(pos(1, 1), Right);
        assert!(!maze.get_wall_status(pos(1, 1), Right));
        assert!(!maze.get_wall_status(pos(1, 2), Left));

        maze.remove_wall(pos(1, 1), Left);
        assert!(!maze.get_wall_status(pos(1, 0), Right));

        maze.remove_wall(pos(1, 1), Up);
        assert!(!maze.get_wall_status(pos(0, 1), Down));

        maze.remove_wall(pos(1, 1), Down);
        assert!(!maze.get_wall_status(pos(2, 1), Up));
    }

    #[test]
    fn remove_outer_wall() {
        let mut maze = Maze::new(3, 3);
        maze.remove_wall(pos(0, 2), Right);
        maze.remove_wall(pos(0, 0), Left);
        maze.remove_wall(pos(0, 0), Up);
        maze.remove_wall(pos(2, 2), Down);
        assert!(!maze.get_wall_status(pos(0, 2), Right));
        assert!(!maze.get_wall_status(pos(0, 0), Left));
        assert!(!maze.get_wall_status(pos(0, 0), Up));
        assert!(!maze.get_wall_status(pos(2, 2), Down));
        assert_eq!(maze.open_wall_count(), 0);
    }

    #[test]
    fn remove_wall_outside_is_noop() {
        let mut maze = Maze::new(2, 2);
        let before = maze.clone();
        maze.remove_wall(pos(2, 0), Up);
        maze.remove_wall(pos(-1, 0), Down);
        assert_eq!(maze, before);
    }

    #[test]
    fn visit_cells() {
        let mut maze = Maze::new(3, 3);
        assert!(!maze.get_cell_visited(pos(0, 0)));
        maze.visit_cell(pos(0, 0));
        assert!(maze.get_cell_visited(pos(0, 0)));
        assert_eq!(maze.get_total_unvisited_cells(), 8);

        // visiting twice doesn't count twice
        maze.visit_cell(pos(0, 0));
        assert_eq!(maze.get_total_unvisited_cells(), 8);

        for p in maze.size().iter_pos() {
            maze.visit_cell(p);
        }
        assert_eq!(maze.get_total_unvisited_cells(), 0);
        assert!(maze.get_unvisited_cells().is_empty());
    }

    #[test]
    fn neighbour_indices() {
        let maze = Maze::new(3, 3);

        let centre = maze.get_cell_neighbour_indices(pos(1, 1));
        assert_eq!(directions(&centre), vec![Up, Down, Left, Right]);
        assert_eq!(
            centre.iter().map(|n| n.pos).collect::<Vec<_>>(),
            vec![pos(0, 1), pos(2, 1), pos(1, 0), pos(1, 2)]
        );

        assert_eq!(directions(&maze.get_cell_neighbour_indices(pos(1, 2))), vec![Up, Down, Left]);
        assert_eq!(directions(&maze.get_cell_neighbour_indices(pos(1, 0))), vec![Up, Down, Right]);
        assert_eq!(directions(&maze.get_cell_neighbour_indices(pos(0, 1))), vec![Down, Left, Right]);
        assert_eq!(directions(&maze.get_cell_neighbour_indices(pos(2, 1))), vec![Up, Left, Right]);
        assert_eq!(directions(&maze.get_cell_neighbour_indices(pos(0, 0))), vec![Down, Right]);
    }

    #[test]
    fn single_cell_has_no_neighbours() {
        let maze = Maze::new(1, 1);
        assert!(maze.get_cell_neighbour_indices(pos(0, 0)).is_empty());
    }

    #[test]
    fn unvisited_and_visited_neighbours() {
        let mut maze = Maze::new(3, 3);
        assert_eq!(maze.get_unvisited_neighbour_indices(pos(1, 1)).len(), 4);
        assert_eq!(maze.get_unvisited_neighbour_indices(pos(1, 0)).len(), 3);
        assert_eq!(maze.get_unvisited_neighbour_indices(pos(0, 0)).len(), 2);
        assert!(maze.get_visited_neighbour_indices(pos(1, 1)).is_empty());

        maze.visit_cell(pos(0, 1));
        maze.visit_cell(pos(1, 2));

        let unvisited = maze.get_unvisited_neighbour_indices(pos(1, 1));
        assert_eq!(directions(&unvisited), vec![Down, Left]);
        let visited = maze.get_visited_neighbour_indices(pos(1, 1));
        assert_eq!(directions(&visited), vec![Up, Right]);
    }

    #[test]
    fn hunt_target_none_when_isolated_or_done() {
        let mut maze = Maze::new(3, 3);
        assert_eq!(maze.get_first_unvisited_cell_with_visited_neighbour(), None);

        for p in maze.size().iter_pos() {
            maze.visit_cell(p);
        }
        assert_eq!(maze.get_first_unvisited_cell_with_visited_neighbour(), None);
    }

    #[test]
    fn hunt_target_first_in_row_major_order() {
        let mut maze = Maze::new(3, 3);
        maze.visit_cell(pos(1, 0));
        let target = maze.get_first_unvisited_cell_with_visited_neighbour().unwrap();
        assert_eq!(target.cell, pos(0, 0));
        assert_eq!(directions(&target.neighbours), vec![Down]);

        let mut maze = Maze::new(3, 3);
        for column in 0..3 {
            maze.visit_cell(pos(0, column));
        }
        maze.visit_cell(pos(1, 0));
        let target = maze.get_first_unvisited_cell_with_visited_neighbour().unwrap();
        assert_eq!(target.cell, pos(1, 1));
        assert_eq!(
            target.neighbours.iter().map(|n| n.pos).collect::<Vec<_>>(),
            vec![pos(0, 1), pos(1, 0)]
        );
    }

    #[test]
    fn string_representation() {
        let mut maze = Maze::new(3, 3);
        assert_eq!(maze.to_string(), " _ _ _\n|_|_|_|\n|_|_|_|\n|_|_|_|");

        maze.remove_wall(pos(0, 0), Right);
        assert_eq!(maze.to_string(), " _ _ _\n|_ _|_|\n|_|_|_|\n|_|_|_|");

        maze.remove_wall(pos(1, 1), Up);
        maze.remove_wall(pos(1, 1), Down);
        assert_eq!(maze.to_string(), " _ _ _\n|_  |_|\n|_| |_|\n|_|_|_|");
    }

    #[test]
    fn string_representation_outer_walls() {
        let mut maze = Maze::new(3, 3);
        maze.remove_wall(pos(0, 0), Up);
        maze.remove_wall(pos(2, 2), Down);
        assert_eq!(maze.to_string(), "   _ _\n|_|_|_|\n|_|_|_|\n|_|_| |");

        maze.remove_wall(pos(1, 0), Left);
        assert_eq!(maze.to_string(), "   _ _\n|_|_|_|\n_|_|_|\n|_|_| |");
    }

    #[test]
    fn json_representation() {
        let mut maze = Maze::new(2, 1);
        maze.remove_wall(pos(0, 0), Right);
        maze.visit_cell(pos(0, 1));
        assert_eq!(
            maze.to_json(),
            serde_json::json!({
                "rows": [[
                    {"left": true, "right": false, "up": true, "down": true, "visited": false},
                    {"left": false, "right": true, "up": true, "down": true, "visited": true}
                ]]
            })
        );
    }

    #[test]
    fn get_cell_mut_bypasses_mirroring() {
        let mut maze = Maze::new(2, 1);
        maze.remove_wall(pos(0, 0), Right);
        maze.get_cell_mut(pos(0, 1)).unwrap().restore_walls();
        assert!(!maze.get_wall_status(pos(0, 0), Right));
        assert!(maze.get_wall_status(pos(0, 1), Left));
        assert!(maze.get_cell_mut(pos(1, 0)).is_none());
    }

    #[test]
    fn get_cell_reads_state() {
        let mut maze = Maze::new(2, 2);
        maze.remove_wall(pos(1, 0), Up);
        maze.visit_cell(pos(1, 1));

        let cell = maze.get_cell(pos(0, 0)).unwrap();
        assert!(!cell.get_wall(Down));
        assert!(!cell.is_visited());
        assert!(maze.get_cell(pos(1, 1)).unwrap().is_visited());
        assert!(maze.get_cell(pos(2, 0)).is_none());
        assert!(maze.get_cell(pos(0, -1)).is_none());
    }

    #[test]
    fn hunt_matches_full_scan() {
        use crate::rng::{IntSource, XorShift32};

        fn full_scan(maze: &Maze) -> Option<HuntTarget> {
            maze.size().iter_pos().find_map(|cell| {
                if maze.get_cell_visited(cell) {
                    return None;
                }
                let neighbours = maze.get_visited_neighbour_indices(cell);
                (!neighbours.is_empty()).then_some(HuntTarget { cell, neighbours })
            })
        }

        let mut rng = XorShift32::from_number(31);
        let mut maze = Maze::new(7, 5);
        while maze.get_total_unvisited_cells() > 0 {
            let cell = pos(rng.next_int(0, 4), rng.next_int(0, 6));
            maze.visit_cell(cell);

            assert_eq!(maze.get_first_unvisited_cell_with_visited_neighbour(), full_scan(&maze));
            let unvisited: Vec<_> = maze
                .size()
                .iter_pos()
                .filter(|&p| !maze.get_cell_visited(p))
                .collect();
            assert_eq!(maze.get_unvisited_cells(), unvisited);
        }
        assert_eq!(maze.get_first_unvisited_cell_with_visited_neighbour(), None);
    }
}
