use axum::{routing::post, Router, Json};
use crate::data::{PlacementInput, ScheduleView};
use crate::error::SolveError;
use crate::solver::SolveControl;
use crate::{model, project, solver};
use std::time::{Duration, Instant};

async fn solve_handler(
    Json(input): Json<PlacementInput>,
) -> Result<Json<ScheduleView>, (axum::http::StatusCode, String)> {
    let model = model::build(&input.rooms, &input.offerings)
        .map_err(|e| (axum::http::StatusCode::BAD_REQUEST, e.to_string()))?;
    let control = SolveControl {
        deadline: input
            .deadline_ms
            .map(|ms| Instant::now() + Duration::from_millis(ms)),
        cancel: None,
    };
    let assignment = solver::solve_with(&model, &control).map_err(|e| {
        let status = match e {
            SolveError::Cancelled => axum::http::StatusCode::REQUEST_TIMEOUT,
            SolveError::NoFeasibleAssignment { .. } => {
                axum::http::StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, e.to_string())
    })?;
    Ok(Json(project::project(&assignment)))
}

pub async fn run_server() {
    let app = Router::new().route("/v1/placement/solve", post(solve_handler));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:8080")
        .await
        .unwrap();

    println!("Server running at http://{}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
