//! Seed + solve + remove: synthesizes a full valid grid with the default
//! solver, then removes cells to reach a target empty-cell ratio.

use std::fmt;

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_seeder::Seeder;

use crate::cell::Cell;
use crate::constraint::is_consistent_at;
use crate::grid::Grid;
use crate::solver::{default_solver, Solver};
use crate::state::State;

pub const EASY: f64 = 0.3;
pub const MEDIUM: f64 = 0.5;
pub const HARD: f64 = 0.7;

const MIN_DIFFICULTY: f64 = 0.1;
const MAX_DIFFICULTY: f64 = 0.9;

#[derive(Debug, Clone, PartialEq)]
pub enum GeneratorError {
    InvalidSize(usize),
    InvalidDifficulty(f64),
    InvalidPatternLength { expected: usize, found: usize },
}

impl fmt::Display for GeneratorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeneratorError::InvalidSize(size) => {
                write!(f, "invalid grid size {size}: must be even and at least 4")
            }
            GeneratorError::InvalidDifficulty(d) => write!(
                f,
                "invalid difficulty {d}: must be within [{MIN_DIFFICULTY}, {MAX_DIFFICULTY}]"
            ),
            GeneratorError::InvalidPatternLength { expected, found } => write!(
                f,
                "pattern has {found} characters, expected {expected} for a size x size grid"
            ),
        }
    }
}

impl std::error::Error for GeneratorError {}

fn rng_from_seed(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(seed) => Seeder::from(seed.to_string()).make_rng(),
        None => SmallRng::from_entropy(),
    }
}

/// Produces a full, valid, randomly-seeded solution grid of the given
/// size. An unlucky seeding can leave the default solver nothing to find a
/// solution from; retried internally, indefinitely, until one succeeds --
/// generation failure is never surfaced to the caller.
fn generate_complete_solution(size: usize, rng: &mut SmallRng) -> Grid {
    loop {
        let mut grid = Grid::new(size).unwrap();
        let seed_count = size / 2;

        for _ in 0..seed_count {
            let r = rng.gen_range(0..size);
            let c = rng.gen_range(0..size);
            let v = rng.gen_range(0..=1u8);

            // Tentative placement with rollback: mutate first, then
            // check, rather than batch-validating before committing.
            if !grid.is_empty_cell(r, c) {
                continue;
            }
            grid.set(r, c, Cell::from_digit(v));
            if !is_consistent_at(&grid, r, c) {
                grid.set(r, c, Cell::Empty);
            }
        }

        let mut solver = default_solver();
        if let Some(solved) = solver.solve(&State::new(grid)) {
            return solved.into_grid();
        }
    }
}

/// Generates a puzzle of the given size and difficulty (empty-cell
/// ratio), reproducibly if `seed` is given.
pub fn generate_seeded(size: usize, difficulty: f64, seed: Option<u64>) -> Result<Grid, GeneratorError> {
    if size < 4 || size % 2 != 0 {
        return Err(GeneratorError::InvalidSize(size));
    }
    if !(MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&difficulty) {
        return Err(GeneratorError::InvalidDifficulty(difficulty));
    }

    let mut rng = rng_from_seed(seed);
    let solution = generate_complete_solution(size, &mut rng);

    let mut puzzle = solution.clone();
    let cells_to_remove = ((size * size) as f64 * difficulty).floor() as usize;
    let mut positions: Vec<(usize, usize)> =
        (0..size).flat_map(|r| (0..size).map(move |c| (r, c))).collect();
    positions.shuffle(&mut rng);

    for &(r, c) in positions.iter().take(cells_to_remove) {
        puzzle.set(r, c, Cell::Empty);
    }

    Ok(puzzle)
}

pub fn generate(size: usize, difficulty: f64) -> Result<Grid, GeneratorError> {
    generate_seeded(size, difficulty, None)
}

pub fn generate_easy(size: usize) -> Result<Grid, GeneratorError> {
    generate(size, EASY)
}

pub fn generate_medium(size: usize) -> Result<Grid, GeneratorError> {
    generate(size, MEDIUM)
}

pub fn generate_hard(size: usize) -> Result<Grid, GeneratorError> {
    generate(size, HARD)
}

/// Builds a grid from a row-major character string: `'0'` -> 0, `'1'` ->
/// 1, anything else -> empty.
pub fn generate_with_pattern(size: usize, pattern: &str) -> Result<Grid, GeneratorError> {
    if size < 4 || size % 2 != 0 {
        return Err(GeneratorError::InvalidSize(size));
    }
    let chars: Vec<char> = pattern.chars().collect();
    if chars.len() != size * size {
        return Err(GeneratorError::InvalidPatternLength {
            expected: size * size,
            found: chars.len(),
        });
    }

    let mut grid = Grid::new(size).unwrap();
    for (i, ch) in chars.into_iter().enumerate() {
        let cell = match ch {
            '0' => Cell::Zero,
            '1' => Cell::One,
            _ => Cell::Empty,
        };
        grid.set(i / size, i % size, cell);
    }
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::is_valid;

    #[test]
    fn rejects_invalid_size_and_difficulty() {
        assert_eq!(generate(3, 0.5), Err(GeneratorError::InvalidSize(3)));
        assert_eq!(generate(4, 0.05), Err(GeneratorError::InvalidDifficulty(0.05)));
        assert_eq!(generate(4, 0.95), Err(GeneratorError::InvalidDifficulty(0.95)));
    }

    #[test]
    fn generated_puzzle_matches_a_valid_solution() {
        let puzzle = generate_seeded(6, MEDIUM, Some(42)).unwrap();
        assert_eq!(puzzle.size(), 6);

        // Every filled cell must be extendable to a valid complete
        // solution: the puzzle itself, once solved, must be valid.
        let mut solver = default_solver();
        let solved = solver
            .solve(&State::new(puzzle.clone()))
            .expect("generated puzzle must be solvable");
        assert!(is_valid(solved.grid()));
        for r in 0..6 {
            for c in 0..6 {
                if !puzzle.is_empty_cell(r, c) {
                    assert_eq!(puzzle.get(r, c), solved.grid().get(r, c));
                }
            }
        }
    }

    #[test]
    fn empty_ratio_is_close_to_difficulty() {
        let size = 8;
        let puzzle = generate_seeded(size, MEDIUM, Some(7)).unwrap();
        let ratio = puzzle.count_empty() as f64 / (size * size) as f64;
        let epsilon = 1.0 / (size * size) as f64;
        assert!((ratio - MEDIUM).abs() <= epsilon);
    }

    #[test]
    fn same_seed_is_reproducible() {
        let a = generate_seeded(6, MEDIUM, Some(123)).unwrap();
        let b = generate_seeded(6, MEDIUM, Some(123)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn pattern_parses_known_tokens_and_defaults_rest_to_empty() {
        let grid = generate_with_pattern(4, "01..10..........").unwrap();
        assert_eq!(grid.get(0, 0), Cell::Zero);
        assert_eq!(grid.get(0, 1), Cell::One);
        assert_eq!(grid.get(0, 2), Cell::Empty);
        assert_eq!(grid.get(1, 1), Cell::One);
    }
}
