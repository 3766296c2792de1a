//! MRV + Degree + LCV + Forward Checking: the fastest general-purpose
//! choice on small grids, and the default solver used by the validator
//! and generator.

use crate::cell::Cell;
use crate::constraint::{is_consistent_at, is_valid, possible_values};
use crate::grid::Grid;
use crate::solver::{forward_check, mrv_with_degree, order_lcv, Solver, Stats};
use crate::state::State;

#[derive(Debug, Default)]
pub struct HeuristicSolver {
    stats: Stats,
}

impl HeuristicSolver {
    pub fn new() -> Self {
        Self::default()
    }

    fn backtrack(&mut self, grid: &mut Grid) -> bool {
        self.stats.nodes_explored += 1;
        if grid.is_full() {
            return is_valid(grid);
        }
        let Some((r, c)) = mrv_with_degree(grid) else {
            return is_valid(grid);
        };
        let domain = possible_values(grid, r, c);
        if domain.is_empty() {
            return false;
        }
        for v in order_lcv(grid, r, c, domain) {
            grid.set(r, c, Cell::from_digit(v));
            if is_consistent_at(grid, r, c) && forward_check(grid, r, c) && self.backtrack(grid) {
                return true;
            }
            grid.set(r, c, Cell::Empty);
            self.stats.backtrack_count += 1;
        }
        false
    }
}

impl Solver for HeuristicSolver {
    fn name(&self) -> &'static str {
        "Heuristic"
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

        let mut solver = HeuristicSolver::new();
        let solved = solver.solve(&state).expect("expected a solution");
        assert!(is_valid(solved.grid()));
    }

    #[test]
    fn solves_empty_8x8() {
        let grid = Grid::new(8).unwrap();
        let state = State::new(grid);
        let mut solver = HeuristicSolver::new();
        let solved = solver.solve(&state).expect("expected a solution");
        assert!(solved.grid().is_full());
        assert!(is_valid(solved.grid()));
    }
}
