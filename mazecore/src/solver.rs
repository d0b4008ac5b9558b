use std::fmt;

use thiserror::Error;

use crate::{
    array::Array2D,
    core::*,
    gameboard::{Direction, Maze},
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SolverError {
    #[error("start column/row must be greater than or equal to 0.")]
    NegativeStart,
    #[error("goal column/row must be greater than or equal to 0.")]
    NegativeGoal,
    #[error("start/goal rows must be less than maze height ({max_row}).")]
    RowOutOfBounds { max_row: usize },
    #[error("start/goal columns must be less than maze width ({max_column}).")]
    ColumnOutOfBounds { max_column: usize },
    #[error("cannot solve an empty maze of size {0}")]
    EmptyMaze(Size),
}

/// Expansion order of the search.
const EXPANSION_ORDER: [Direction; 4] = [
    Direction::Left,
    Direction::Right,
    Direction::Up,
    Direction::Down,
];

#[derive(Debug, Clone, Copy)]
struct Node {
    pos: Pos,
    cost: u64,
    parent: Option<usize>,
}

/// Path between two cells of a maze, computed on construction.
///
/// The search is best-first on an accumulated distance to the goal, so the
/// path is deterministic but not necessarily the shortest one. An unreachable
/// goal leaves the path empty.
#[derive(Debug, Clone)]
pub struct Solver<'a> {
    maze: &'a Maze,
    start: Pos,
    goal: Pos,
    path: Vec<Pos>,
}

impl<'a> Solver<'a> {
    pub fn new(maze: &'a Maze, start: Pos, goal: Pos) -> Result<Self, SolverError> {
        validate(maze.size(), start, goal)?;

        let path = search(maze, start, goal);
        if path.is_empty() {
            log::debug!("No path from {start} to {goal}");
        } else {
            log::debug!("Found path from {start} to {goal} in {} steps", path.len());
        }

        Ok(Solver {
            maze,
            start,
            goal,
            path,
        })
    }

    pub fn start(&self) -> Pos {
        self.start
    }

    pub fn goal(&self) -> Pos {
        self.goal
    }

    pub fn path(&self) -> &[Pos] {
        &self.path
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// `[{row, column}, ...]` from start to goal.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!(self.path)
    }

    fn glyph(&self, step: usize) -> &'static str {
        if step == 0 {
            return "S";
        }
        if step == self.path.len() - 1 {
            return "G";
        }

        let cell = self.path[step];
        let next = self.path[step + 1] - cell;
        let prev = self.path[step - 1] - cell;

        match (next.row, next.column) {
            (1, _) => match prev.column {
                1 => "↶",
                -1 => "↴",
                _ => "↓",
            },
            (-1, _) => match prev.column {
                1 => "⇖",
                -1 => "⇗",
                _ => "↑",
            },
            (_, 1) => match prev.row {
                1 => "↱",
                -1 => "↳",
                _ => "→",
            },
            _ => "←",
        }
    }
}

fn validate(size: Size, start: Pos, goal: Pos) -> Result<(), SolverError> {
    if start.is_negative() {
        return Err(SolverError::NegativeStart);
    }
    if goal.is_negative() {
        return Err(SolverError::NegativeGoal);
    }

    if !size.all_positive() {
        return Err(SolverError::EmptyMaze(size));
    }

    let max_row = size.height - 1;
    if start.row as usize > max_row || goal.row as usize > max_row {
        return Err(SolverError::RowOutOfBounds { max_row });
    }

    let max_column = size.width - 1;
    if start.column as usize > max_column || goal.column as usize > max_column {
        return Err(SolverError::ColumnOutOfBounds { max_column });
    }

    Ok(())
}

fn search(maze: &Maze, start: Pos, goal: Pos) -> Vec<Pos> {
    let mut nodes = vec![Node {
        pos: start,
        cost: 0,
        parent: None,
    }];
    let mut open = vec![0usize];
    // cells that are in the open or closed set
    let mut seen = Array2D::new_size(false, maze.size());
    seen[start] = true;

    let mut found = None;
    while !open.is_empty() {
        let current = nodes[open[0]];
        let current_idx = open[0];
        let mut reached_goal = None;

        for dir in EXPANSION_ORDER {
            if maze.get_wall_status(current.pos, dir) {
                continue;
            }

            let next = current.pos + dir.to_coord();
            // an outer wall may have been opened by hand
            if !maze.is_in_bounds(next) || seen[next] {
                continue;
            }

            seen[next] = true;
            nodes.push(Node {
                pos: next,
                cost: current.cost + u64::from(next.manhattan(goal)),
                parent: Some(current_idx),
            });
            open.push(nodes.len() - 1);

            if next == goal {
                reached_goal = Some(nodes.len() - 1);
            }
        }

        open.remove(0);
        open.sort_by_key(|&idx| nodes[idx].cost);

        if reached_goal.is_some() {
            found = reached_goal;
            break;
        }
    }

    let mut path = Vec::new();
    let mut node = found;
    while let Some(idx) = node {
        path.push(nodes[idx].pos);
        node = nodes[idx].parent;
    }
    path.reverse();
    path
}

/// Maze rendering with the path drawn as arrows, `S` and `G` marking its ends.
impl fmt::Display for Solver<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            return Ok(());
        }

        let mut steps: Array2D<Option<usize>> = Array2D::new_size(None, self.maze.size());
        for (step, &pos) in self.path.iter().enumerate() {
            steps[pos] = Some(step);
        }

        self.maze.fmt_top_border(f)?;

        let cells = self.maze.get_cells();
        for (row, row_cells) in cells.rows().enumerate() {
            if row > 0 {
                f.write_str("\n")?;
            }
            if row_cells.first().is_some_and(|cell| cell.get_wall(Direction::Left)) {
                f.write_str("|")?;
            }
            for (column, cell) in row_cells.iter().enumerate() {
                match steps[Pos::new(row as i32, column as i32)] {
                    Some(step) => {
                        let right = if cell.get_wall(Direction::Right) { '|' } else { ' ' };
                        write!(f, "{}{right}", self.glyph(step))?;
                    }
                    None => write!(f, "{cell}")?,
                }
            }
        }

        f.write_str("\n")?;
        let last_row = self.maze.height() - 1;
        for (column, cell) in cells.row(last_row).unwrap_or_default().iter().enumerate() {
            match steps[Pos::new(last_row as i32, column as i32)] {
                Some(_) if cell.get_wall(Direction::Down) => f.write_str(" ¯")?,
                Some(_) => {}
                None => f.write_str("  ")?,
            }
        }

        Ok(())
    }
}
