//! Arc-consistency #3 pre-processing followed by plain backtracking over
//! the pruned domains.

use std::collections::VecDeque;

use crate::cell::{Cell, Domain};
use crate::constraint::{is_consistent_pair, is_valid};
use crate::grid::Grid;
use crate::solver::{Solver, Stats};
use crate::state::State;

type Pos = (usize, usize);

/// Per-cell domain store, flat and indexed like the grid itself.
#[derive(Debug, Clone)]
pub struct Domains {
    size: usize,
    cells: Vec<Domain>,
}

impl Domains {
    pub fn init(grid: &Grid) -> Self {
        let size = grid.size();
        let cells = (0..size * size)
            .map(|idx| Domain::from(grid.get(idx / size, idx % size)))
            .collect();
        Self { size, cells }
    }

    fn idx(&self, pos: Pos) -> usize {
        pos.0 * self.size + pos.1
    }

    pub fn get(&self, pos: Pos) -> Domain {
        self.cells[self.idx(pos)]
    }

    pub fn set(&mut self, pos: Pos, d: Domain) {
        let idx = self.idx(pos);
        self.cells[idx] = d;
    }
}

/// `revise(X_i, X_j)`: removes every value from `D_i` that has no
/// supporting value in `D_j`. Returns whether `D_i` changed.
pub fn revise(grid: &mut Grid, domains: &mut Domains, i: Pos, j: Pos) -> bool {
    let d_i = domains.get(i);
    let d_j = domains.get(j);
    let mut changed = false;
    let mut new_d_i = d_i;
    for x in d_i.values() {
        let supported = d_j
            .values()
            .any(|y| is_consistent_pair(grid, i, x, j, y));
        if !supported {
            new_d_i.remove(x);
            changed = true;
        }
    }
    if changed {
        domains.set(i, new_d_i);
    }
    changed
}

/// Runs AC-3 to a fixpoint starting from every arc in the grid. Returns
/// `false` the moment any domain is emptied (no solution exists).
pub fn ac3_global(grid: &mut Grid, domains: &mut Domains) -> bool {
    let size = grid.size();
    let mut queue: VecDeque<(Pos, Pos)> = crate::constraint::all_arcs(size).into();
    ac3_drain(grid, domains, &mut queue)
}

/// Runs AC-3 seeded with only the arcs in `queue` to a fixpoint (used by
/// MAC to re-propagate from a single changed cell).
pub fn ac3_drain(grid: &mut Grid, domains: &mut Domains, queue: &mut VecDeque<(Pos, Pos)>) -> bool {
    let size = grid.size();
    while let Some((i, j)) = queue.pop_front() {
        if revise(grid, domains, i, j) {
            if domains.get(i).is_empty() {
                return false;
            }
            let mut incident = Vec::new();
            crate::constraint::arcs_incident_to(size, i, &mut incident);
            for (k, _) in incident {
                if k != j {
                    queue.push_back((k, i));
                }
            }
        }
    }
    true
}

/// Commits every singleton domain to the grid.
pub fn commit_singletons(grid: &mut Grid, domains: &Domains) {
    let size = grid.size();
    for r in 0..size {
        for c in 0..size {
            if let Some(v) = domains.get((r, c)).single_value() {
                if grid.is_empty_cell(r, c) {
                    grid.set(r, c, Cell::from_digit(v));
                }
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct Ac3Solver {
    stats: Stats,
}

impl Ac3Solver {
    pub fn new() -> Self {
        Self::default()
    }

    fn backtrack(&mut self, grid: &mut Grid, domains: &Domains) -> bool {
        self.stats.nodes_explored += 1;
        if grid.is_full() {
            return is_valid(grid);
        }
        let (r, c) = grid.first_empty().expect("grid not full must have an empty cell");
        for v in domains.get((r, c)).values() {
            grid.set(r, c, Cell::from_digit(v));
            if crate::constraint::is_consistent_at(grid, r, c) && self.backtrack(grid, domains) {
                return true;
            }
            grid.set(r, c, Cell::Empty);
            self.stats.backtrack_count += 1;
        }
        false
    }
}

impl Solver for Ac3Solver {
    fn name(&self) -> &'static str {
        "AC3"
    }

    fn stats(&self) -> &Stats {
        &self.stats
    }

    fn stats_mut(&mut self) -> &mut Stats {
        &mut self.stats
    }

    fn solve(&mut self, state: &State) -> Option<State> {
        let mut grid = state.grid().clone();
        let mut domains = Domains::init(&grid);
        if !ac3_global(&mut grid, &mut domains) {
            return None;
        }
        commit_singletons(&mut grid, &domains);
        if self.backtrack(&mut grid, &domains) {
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

        let mut solver = Ac3Solver::new();
        let solved = solver.solve(&state).expect("expected a solution");
        assert!(is_valid(solved.grid()));
    }

    #[test]
    fn revise_restores_grid() {
        let mut grid = Grid::new(4).unwrap();
        grid.set(0, 1, Cell::Zero);
        let before = grid.clone();
        let mut domains = Domains::init(&grid);
        let _ = revise(&mut grid, &mut domains, (0, 0), (0, 1));
        assert_eq!(grid, before);
    }
}
