#![allow(unused)]

use binairo_core::generator;
use binairo_core::solver::{
    ac3::Ac3Solver, ac4::Ac4Solver, backtracking::BacktrackingSolver,
    forward_checking::ForwardCheckingSolver, heuristic::HeuristicSolver, mac::MacSolver, Solver,
};
use binairo_core::state::State;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn randomized_puzzles() -> Vec<(usize, usize)> {
    // (grid size, seed) pairs, generated deterministically so the
    // benchmark is reproducible across runs.
    vec![(8, 1), (8, 2), (10, 3)]
}

fn bench_solvers(c: &mut Criterion) {
    let mut group = c.benchmark_group("Solvers");

    for (size, seed) in randomized_puzzles() {
        let puzzle = generator::generate_seeded(size, generator::MEDIUM, Some(seed as u64))
            .expect("generation should succeed for a benchmark puzzle");
        let label = format!("{size}x{size}-seed{seed}");

        macro_rules! bench_one {
            ($name:literal, $solver:expr) => {
                group.bench_with_input(BenchmarkId::new($name, &label), &puzzle, |b, grid| {
                    b.iter(|| {
                        let mut solver = $solver;
                        black_box(solver.solve(&State::new(grid.clone())));
                    })
                });
            };
        }

        bench_one!("Backtracking", BacktrackingSolver::new());
        bench_one!("ForwardChecking", ForwardCheckingSolver::new());
        bench_one!("AC3", Ac3Solver::new());
        bench_one!("AC4", Ac4Solver::new());
        bench_one!("Heuristic", HeuristicSolver::new());
        bench_one!("MAC", MacSolver::new());
    }
}

criterion_group!(benches, bench_solvers);
criterion_main!(benches);
