//! Arc-consistency #4 pre-processing: support counters and support lists
//! give the same pruning as AC-3 with better asymptotic behavior, at the
//! cost of the upfront counter/support-list build.

use std::collections::VecDeque;

use crate::cell::Cell;
use crate::constraint::{arcs_incident_to, is_consistent_pair, is_valid};
use crate::grid::Grid;
use crate::solver::ac3::{commit_singletons, Domains};
use crate::solver::{Solver, Stats};
use crate::state::State;

type Pos = (usize, usize);

struct SupportTables {
    size: usize,
    /// counter[(Xi,a)]: number of neighbor-value pairs currently
    /// supporting value `a` at cell `Xi`.
    counter: Vec<usize>,
    /// support_list[(Xj,b)]: every `(Xi,a)` such that `b` supports `a`.
    support_list: Vec<Vec<(Pos, u8)>>,
}

impl SupportTables {
    fn idx(&self, pos: Pos, v: u8) -> usize {
        (pos.0 * self.size + pos.1) * 2 + v as usize
    }

    fn counter(&self, pos: Pos, v: u8) -> usize {
        self.counter[self.idx(pos, v)]
    }

    fn counter_mut(&mut self, pos: Pos, v: u8) -> &mut usize {
        let idx = self.idx(pos, v);
        &mut self.counter[idx]
    }

    fn support_list(&self, pos: Pos, v: u8) -> &[(Pos, u8)] {
        let idx = self.idx(pos, v);
        &self.support_list[idx]
    }

    fn push_support(&mut self, pos: Pos, v: u8, entry: (Pos, u8)) {
        let idx = self.idx(pos, v);
        self.support_list[idx].push(entry);
    }
}

/// Builds the counter/support-list tables and the initial empty-counter
/// queue by scanning every `(Xi, a)` against its row/column neighbors.
fn build(grid: &mut Grid, domains: &Domains) -> (SupportTables, VecDeque<(Pos, u8)>) {
    let size = grid.size();
    let mut tables = SupportTables {
        size,
        counter: vec![0; size * size * 2],
        support_list: vec![Vec::new(); size * size * 2],
    };
    let mut queue = VecDeque::new();

    for r in 0..size {
        for c in 0..size {
            let xi = (r, c);
            for a in domains.get(xi).values() {
                let mut neighbors = Vec::new();
                arcs_incident_to(size, xi, &mut neighbors);
                let mut support_count = 0usize;
                for (xj, _) in neighbors {
                    for b in domains.get(xj).values() {
                        if is_consistent_pair(grid, xi, a, xj, b) {
                            support_count += 1;
                            tables.push_support(xj, b, (xi, a));
                        }
                    }
                }
                *tables.counter_mut(xi, a) = support_count;
                if support_count == 0 {
                    queue.push_back((xi, a));
                }
            }
        }
    }

    (tables, queue)
}

/// Drains the empty-counter queue, pruning values and decrementing the
/// counters of everything that value used to support. Returns `false`
/// the moment a domain is emptied.
fn propagate(domains: &mut Domains, tables: &mut SupportTables, queue: &mut VecDeque<(Pos, u8)>) -> bool {
    while let Some((xi, a)) = queue.pop_front() {
        let mut d = domains.get(xi);
        if !d.contains(a) {
            continue;
        }
        d.remove(a);
        domains.set(xi, d);
        if d.is_empty() {
            return false;
        }
        for &(xk, b) in tables.support_list(xi, a).to_vec().iter() {
            let counter = tables.counter_mut(xk, b);
            if *counter > 0 {
                *counter -= 1;
                if *counter == 0 {
                    queue.push_back((xk, b));
                }
            }
        }
    }
    true
}

#[derive(Debug, Default)]
pub struct Ac4Solver {
    stats: Stats,
}

impl Ac4Solver {
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

impl Solver for Ac4Solver {
    fn name(&self) -> &'static str {
        "AC4"
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
        let (mut tables, mut queue) = build(&mut grid, &domains);
        if !propagate(&mut domains, &mut tables, &mut queue) {
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

        let mut solver = Ac4Solver::new();
        let solved = solver.solve(&state).expect("expected a solution");
        assert!(is_valid(solved.grid()));
    }
}
