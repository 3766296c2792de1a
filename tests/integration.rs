use actix_web::{http::StatusCode, test, App};
use binairo_core::controller::{self, ErrorResponse, GenerateRequest, SolveRequest, SolveResponse, ValidateRequest};
use binairo_core::generator;
use binairo_core::validator::ValidationReport;

/// Sends a handful of generated puzzles to the '/solve' endpoint and
/// checks that every solver strategy returns a valid completion.
#[actix_web::test]
async fn test_solve_every_strategy() {
    let app = test::init_service(
        App::new()
            .service(controller::solve)
            .service(controller::generate)
            .service(controller::validate),
    )
    .await;

    let puzzle = generator::generate_seeded(6, generator::MEDIUM, Some(99)).unwrap();
    let grid_str: String = (0..6)
        .flat_map(|r| (0..6).map(move |c| (r, c)))
        .map(|(r, c)| puzzle.get(r, c).to_string())
        .collect();

    for strategy in ["backtracking", "forward_checking", "ac3", "ac4", "mac", "heuristic"] {
        let req = test::TestRequest::post()
            .uri("/solve")
            .set_json(SolveRequest {
                grid: grid_str.clone(),
                strategy: strategy.to_owned(),
            })
            .to_request();
        let res: SolveResponse = test::call_and_read_body_json(&app, req).await;

        assert!(res.solved, "strategy {strategy} failed to solve a generated puzzle");
        assert!(res.grid.is_some());
    }
}

/// Sends a POST request with a syntactically malformed grid string.
#[actix_web::test]
async fn test_malformed_data() {
    let app = test::init_service(App::new().service(controller::solve)).await;

    let bad_grids = vec![
        "00X0",          // invalid character
        "010",           // not a perfect square
        "01010101010101".to_owned() + "1", // odd side length (not N*N for even N)
    ];

    for raw in bad_grids {
        let req = test::TestRequest::post()
            .uri("/solve")
            .set_json(SolveRequest {
                grid: raw.to_owned(),
                strategy: "heuristic".to_owned(),
            })
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(
            res.status(),
            StatusCode::BAD_REQUEST,
            "malformed grid {raw:?} should yield 400"
        );

        let body: ErrorResponse = test::read_body_json(res).await;
        assert_eq!(body.code, "400");
        assert!(!body.message.is_empty());
    }
}

/// Sends an unsatisfiable grid (pre-existing rule violation) and expects
/// the solver to report no solution rather than erroring out.
#[actix_web::test]
async fn test_unsolvable_grid_reports_no_solution() {
    let app = test::init_service(App::new().service(controller::solve)).await;

    // Row 0 already contains a triplet: unsatisfiable for any 4x4 grid.
    let unsolvable = "000.............".to_owned();
    let req = test::TestRequest::post()
        .uri("/solve")
        .set_json(SolveRequest {
            grid: unsolvable,
            strategy: "backtracking".to_owned(),
        })
        .to_request();
    let res: SolveResponse = test::call_and_read_body_json(&app, req).await;

    assert!(!res.solved);
    assert!(res.grid.is_none());
}

#[actix_web::test]
async fn test_generate_endpoint() {
    let app = test::init_service(App::new().service(controller::generate)).await;

    let req = test::TestRequest::post()
        .uri("/generate")
        .set_json(GenerateRequest { size: 6, difficulty: generator::EASY, seed: Some(1) })
        .to_request();
    let res: controller::GenerateResponse = test::call_and_read_body_json(&app, req).await;

    assert_eq!(res.grid.chars().count(), 36);
}

#[actix_web::test]
async fn test_generate_rejects_bad_difficulty() {
    let app = test::init_service(App::new().service(controller::generate)).await;

    let req = test::TestRequest::post()
        .uri("/generate")
        .set_json(GenerateRequest { size: 6, difficulty: 0.99, seed: None })
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_validate_endpoint() {
    let app = test::init_service(App::new().service(controller::validate)).await;

    let req = test::TestRequest::post()
        .uri("/validate")
        .set_json(ValidateRequest { grid: "0000............".to_owned() })
        .to_request();
    let report: ValidationReport = test::call_and_read_body_json(&app, req).await;

    assert!(!report.constraints_valid);
    assert!(!report.violations.is_empty());
}
