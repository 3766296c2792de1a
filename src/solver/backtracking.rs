//! Plain depth-first backtracking, the reference strategy every other
//! solver is checked against (solver equivalence, property 5).

use crate::cell::Cell;
use crate::constraint::{is_consistent_at, is_valid};
use crate::grid::Grid;
use crate::solver::{Solver, Stats};
use crate::state::State;

#[derive(Debug, Default)]
pub struct BacktrackingSolver {
    stats: Stats,
}

impl BacktrackingSolver {
    pub fn new() -> Self {
        Self::default()
    }

    fn backtrack(&mut self, grid: &mut Grid) -> bool {
        self.stats.nodes_explored += 1;
        if grid.is_full() {
            return is_valid(grid);
        }
        let (r, c) = grid.first_empty().expect("grid not full must have an empty cell");
        for v in 0..=1u8 {
            grid.set(r, c, Cell::from_digit(v));
            if is_consistent_at(grid, r, c) && self.backtrack(grid) {
                return true;
            }
            grid.set(r, c, Cell::Empty);
            self.stats.backtrack_count += 1;
        }
        false
    }
}

impl Solver for BacktrackingSolver {
    fn name(&self) -> &'static str {
        "Backtracking"
    }

    fn stats(&self) -> &Stats {
        &self.stats
    }

    fn stats_mut(&mut self) -> &mut Stats {
        &mut self.stats
    }

    fn solve(&mut self, state: &State) -> Option<State> {
        let mut grid = state.grid().clone();
        if self.backtrack(&mut grid) {
            Some(State::derived(grid))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;

    #[test]
    fn s4_solves_4x4_stub() {
        let mut grid = Grid::new(4).unwrap();
        grid.set(0, 0, Cell::Zero);
        grid.set(0, 2, Cell::One);
        grid.set(1, 1, Cell::One);
        grid.set(2, 3, Cell::Zero);
        let state = State::new(grid);

        let mut solver = BacktrackingSolver::new();
        let solved = solver.solve(&state).expect("expected a solution");
        assert!(crate::constraint::is_valid(solved.grid()));
        assert!(solved.grid().is_full());
    }

    #[test]
    fn returns_none_when_unsatisfiable() {
        // A 4x4 row that already breaks rule 2 can never be completed.
        let mut grid = Grid::new(4).unwrap();
        grid.set(0, 0, Cell::Zero);
        grid.set(0, 1, Cell::Zero);
        grid.set(0, 2, Cell::Zero);
        let state = State::new(grid);
        let mut solver = BacktrackingSolver::new();
        assert!(solver.solve(&state).is_none());
    }
}
