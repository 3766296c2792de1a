//! Maintaining Arc Consistency: AC-3 re-run after every assignment, with
//! a full domain-map snapshot/restore on backtrack. The strongest of the
//! six strategies, and the memory-cost trade-off spec.md calls out
//! against Forward Checking's cheaper but weaker pruning.

use std::collections::VecDeque;

use crate::cell::{Cell, Domain};
use crate::constraint::{arcs_incident_to, is_consistent_at, is_valid};
use crate::grid::Grid;
use crate::solver::ac3::{ac3_drain, ac3_global, commit_singletons, Domains};
use crate::solver::{mrv_with_degree, Solver, Stats};
use crate::state::State;

#[derive(Debug, Default)]
pub struct MacSolver {
    stats: Stats,
}

impl MacSolver {
    pub fn new() -> Self {
        Self::default()
    }

    fn search(&mut self, grid: &mut Grid, domains: &mut Domains) -> bool {
        self.stats.nodes_explored += 1;
        if grid.is_full() {
            return is_valid(grid);
        }
        let Some((r, c)) = mrv_with_degree(grid) else {
            return is_valid(grid);
        };
        let domain = domains.get((r, c));
        if domain.is_empty() {
            return false;
        }

        for v in domain.values() {
            // Snapshot both the domain map and the grid before mutating
            // anything: commit_singletons below can write forced values
            // into cells other than (r, c), so undoing just (r, c) on
            // backtrack would leave those cells wrongly fixed.
            let domains_snapshot = domains.clone();
            let grid_snapshot = grid.clone();

            grid.set(r, c, Cell::from_digit(v));
            if !is_consistent_at(grid, r, c) {
                *grid = grid_snapshot;
                self.stats.backtrack_count += 1;
                continue;
            }
            domains.set((r, c), Domain::singleton(v));

            let mut queue = VecDeque::new();
            arcs_incident_to(grid.size(), (r, c), &mut queue);
            let consistent = ac3_drain(grid, domains, &mut queue);

            if consistent {
                commit_singletons(grid, domains);
                if self.search(grid, domains) {
                    return true;
                }
            }

            *grid = grid_snapshot;
            *domains = domains_snapshot;
            self.stats.backtrack_count += 1;
        }
        false
    }
}

impl Solver for MacSolver {
    fn name(&self) -> &'static str {
        "MAC"
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
        if self.search(&mut grid, &mut domains) {
            Some(State::derived(grid))
        } else {
            None
        }
    }
}
