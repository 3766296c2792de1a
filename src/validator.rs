//! Read-only consumer of the constraint module: rule checking, the hint
//! oracle, and a structured violation report for an external UI.

use serde::{Deserialize, Serialize};

use crate::cell::Cell;
use crate::constraint::{self, possible_values};
use crate::grid::Grid;
use crate::solver::{default_solver, Solver};
use crate::state::State;

/// What kind of rule a flagged cell participates in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationKind {
    Triplet,
    Balance,
    Duplicate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellViolation {
    pub row: usize,
    pub col: usize,
    pub kind: ViolationKind,
}

/// A suggested value for an empty cell, or an acknowledgment that more
/// than one value is still legal there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Suggestion {
    Forced(u8),
    Ambiguous,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    pub constraints_valid: bool,
    pub solvable: bool,
    pub solution: Option<Vec<Vec<i8>>>,
    pub violations: Vec<String>,
}

pub fn is_valid(grid: &Grid) -> bool {
    constraint::is_valid(grid)
}

/// Delegates to the default solver (`HeuristicSolver`); true iff a full
/// valid grid is found.
pub fn is_solvable(grid: &Grid) -> bool {
    let mut solver = default_solver();
    solver.solve(&State::new(grid.clone())).is_some()
}

/// Rule-check plus a solvability attempt, bundled with human-readable
/// violation messages.
pub fn validate(grid: &Grid) -> ValidationReport {
    let constraints_valid = constraint::is_valid(grid);
    let mut violations = Vec::new();
    if !constraint::no_triplets_global(grid) {
        violations.push("triplet detected: three equal values in a row or column".to_owned());
    }
    if !constraint::all_lines_balanced(grid) {
        violations.push("balance violated: a row or column has too many 0s or 1s".to_owned());
    }
    if !constraint::unique_lines(grid) {
        violations.push("duplicated row or column".to_owned());
    }

    let mut solver = default_solver();
    let solution = solver.solve(&State::new(grid.clone()));
    let solvable = solution.is_some();
    let solution = solution.map(|state| {
        let g = state.into_grid();
        (0..g.size())
            .map(|r| (0..g.size()).map(|c| g.get(r, c).to_sentinel()).collect())
            .collect()
    });

    ValidationReport {
        constraints_valid,
        solvable,
        solution,
        violations,
    }
}

/// Every cell participating in a triplet (all three positions), and every
/// filled cell in an unbalanced line, for display by an external UI.
pub fn find_violations(grid: &Grid) -> Vec<CellViolation> {
    let n = grid.size();
    let mut out = Vec::new();

    for r in 0..n {
        for c in 0..n.saturating_sub(2) {
            let a = grid.get(r, c);
            if !a.is_empty() && a == grid.get(r, c + 1) && a == grid.get(r, c + 2) {
                for cc in c..c + 3 {
                    out.push(CellViolation { row: r, col: cc, kind: ViolationKind::Triplet });
                }
            }
        }
    }
    for c in 0..n {
        for r in 0..n.saturating_sub(2) {
            let a = grid.get(r, c);
            if !a.is_empty() && a == grid.get(r + 1, c) && a == grid.get(r + 2, c) {
                for rr in r..r + 3 {
                    out.push(CellViolation { row: rr, col: c, kind: ViolationKind::Triplet });
                }
            }
        }
    }

    for r in 0..n {
        if !constraint::row_balance(grid, r) {
            for c in 0..n {
                if !grid.is_empty_cell(r, c) {
                    out.push(CellViolation { row: r, col: c, kind: ViolationKind::Balance });
                }
            }
        }
    }
    for c in 0..n {
        if !constraint::column_balance(grid, c) {
            for r in 0..n {
                if !grid.is_empty_cell(r, c) {
                    out.push(CellViolation { row: r, col: c, kind: ViolationKind::Balance });
                }
            }
        }
    }

    out
}

/// Returns the forced value at `(r, c)` if its domain is a singleton,
/// or `Ambiguous` if more than one value is still legal there.
pub fn suggest_value(grid: &mut Grid, r: usize, c: usize) -> Suggestion {
    let domain = possible_values(grid, r, c);
    match domain.single_value() {
        Some(v) => Suggestion::Forced(v),
        None => Suggestion::Ambiguous,
    }
}

/// The first empty cell (row-major) whose domain is a singleton, with
/// its forced value; `None` if no such cell exists.
pub fn find_obvious_move(grid: &mut Grid) -> Option<(usize, usize, u8)> {
    let empties: Vec<(usize, usize)> = grid.iter_empty().collect();
    for (r, c) in empties {
        if let Some(v) = possible_values(grid, r, c).single_value() {
            return Some((r, c, v));
        }
    }
    None
}
