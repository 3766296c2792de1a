//! Backtracking augmented with forward checking: after a value passes
//! the local consistency check, every empty neighbor must still have a
//! non-empty domain, or the value is rejected without recursing.

use crate::cell::Cell;
use crate::constraint::is_consistent_at;
use crate::grid::Grid;
use crate::solver::{forward_check, Solver, Stats};
use crate::state::State;

#[derive(Debug, Default)]
pub struct ForwardCheckingSolver {
    stats: Stats,
}

impl ForwardCheckingSolver {
    pub fn new() -> Self {
        Self::default()
    }

    fn backtrack(&mut self, grid: &mut Grid) -> bool {
        self.stats.nodes_explored += 1;
        if grid.is_full() {
            return crate::constraint::is_valid(grid);
        }
        let (r, c) = grid.first_empty().expect("grid not full must have an empty cell");
        for v in 0..=1u8 {
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

impl Solver for ForwardCheckingSolver {
    fn name(&self) -> &'static str {
        "ForwardChecking"
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
