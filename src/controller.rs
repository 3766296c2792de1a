//! Thin actix-web surface over the core Solver/Generator/Validator APIs.
//! No constraint-solving logic lives here; every handler parses its
//! request, delegates to the core, and serializes the result.

use actix_web::{post, web, HttpResponse, Responder};
use log::info;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::cell::Cell;
use crate::grid::Grid;
use crate::solver::{
    ac3::Ac3Solver, ac4::Ac4Solver, backtracking::BacktrackingSolver,
    forward_checking::ForwardCheckingSolver, heuristic::HeuristicSolver, mac::MacSolver, Solver,
};
use crate::state::State;
use crate::{generator, validator};

static GRID_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[01.]+$").unwrap());

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    fn bad_request(message: impl Into<String>) -> HttpResponse {
        HttpResponse::BadRequest().json(Self {
            code: "400".to_owned(),
            message: message.into(),
        })
    }
}

/// Parses a row-major grid string, validating its character set up front
/// so malformed payloads never reach the core.
fn parse_grid(raw: &str) -> Result<Grid, String> {
    if !GRID_TOKEN.is_match(raw) {
        return Err("grid must contain only '0', '1', and '.' characters".to_owned());
    }
    let len = raw.chars().count();
    let size = (len as f64).sqrt() as usize;
    if size * size != len || size < 4 || size % 2 != 0 {
        return Err("grid must be a square of even side length >= 4".to_owned());
    }
    let mut grid = Grid::new(size).map_err(|e| e.to_string())?;
    for (i, ch) in raw.chars().enumerate() {
        let cell = match ch {
            '0' => Cell::Zero,
            '1' => Cell::One,
            _ => Cell::Empty,
        };
        grid.set(i / size, i % size, cell);
    }
    Ok(grid)
}

fn grid_to_string(grid: &Grid) -> String {
    (0..grid.size())
        .flat_map(|r| (0..grid.size()).map(move |c| (r, c)))
        .map(|(r, c)| grid.get(r, c).to_string())
        .collect()
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SolveRequest {
    pub grid: String,
    #[serde(default = "default_strategy")]
    pub strategy: String,
}

fn default_strategy() -> String {
    "heuristic".to_owned()
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SolveResponse {
    pub solved: bool,
    pub grid: Option<String>,
    pub strategy: String,
    pub nodes_explored: u64,
    pub backtrack_count: u64,
    pub solving_time_ms: u128,
}

#[post("/solve")]
pub async fn solve(req: web::Json<SolveRequest>) -> impl Responder {
    let grid = match parse_grid(&req.grid) {
        Ok(grid) => grid,
        Err(message) => return ErrorResponse::bad_request(message),
    };
    let state = State::new(grid);

    macro_rules! run {
        ($solver:expr) => {{
            let mut solver = $solver;
            let result = solver.solve_with_timing(&state);
            let response = SolveResponse {
                solved: result.is_some(),
                grid: result.as_ref().map(|s| grid_to_string(s.grid())),
                strategy: solver.name().to_owned(),
                nodes_explored: solver.nodes_explored(),
                backtrack_count: solver.backtrack_count(),
                solving_time_ms: solver.solving_time_ms(),
            };
            info!(
                "solved={} strategy={} nodes={} ms={}",
                response.solved, response.strategy, response.nodes_explored, response.solving_time_ms
            );
            HttpResponse::Ok().json(response)
        }};
    }

    match req.strategy.as_str() {
        "backtracking" => run!(BacktrackingSolver::new()),
        "forward_checking" => run!(ForwardCheckingSolver::new()),
        "ac3" => run!(Ac3Solver::new()),
        "ac4" => run!(Ac4Solver::new()),
        "mac" => run!(MacSolver::new()),
        "heuristic" => run!(HeuristicSolver::new()),
        other => ErrorResponse::bad_request(format!("unknown strategy {other:?}")),
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub size: usize,
    pub difficulty: f64,
    pub seed: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub grid: String,
}

#[post("/generate")]
pub async fn generate(req: web::Json<GenerateRequest>) -> impl Responder {
    match generator::generate_seeded(req.size, req.difficulty, req.seed) {
        Ok(grid) => {
            info!("generated a {}x{} puzzle at difficulty {}", req.size, req.size, req.difficulty);
            HttpResponse::Ok().json(GenerateResponse { grid: grid_to_string(&grid) })
        }
        Err(e) => ErrorResponse::bad_request(e.to_string()),
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ValidateRequest {
    pub grid: String,
}

#[post("/validate")]
pub async fn validate(req: web::Json<ValidateRequest>) -> impl Responder {
    let grid = match parse_grid(&req.grid) {
        Ok(grid) => grid,
        Err(message) => return ErrorResponse::bad_request(message),
    };
    HttpResponse::Ok().json(validator::validate(&grid))
}
