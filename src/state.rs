use crate::grid::Grid;

/// Thin wrapper over a `Grid` carrying whether it is the caller-supplied
/// initial puzzle or a state derived by search. Search strategies copy a
/// `State` on descent in the solvers that snapshot rather than mutate in
/// place (MAC); the plain backtracking family mutates the grid directly
/// and undoes on backtrack instead of cloning every frame.
#[derive(Debug, Clone)]
pub struct State {
    grid: Grid,
    initial: bool,
}

impl State {
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            initial: true,
        }
    }

    pub fn derived(grid: Grid) -> Self {
        Self {
            grid,
            initial: false,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn into_grid(self) -> Grid {
        self.grid
    }

    pub fn is_initial(&self) -> bool {
        self.initial
    }

    pub fn solved(&self) -> bool {
        self.grid.is_full()
    }
}
