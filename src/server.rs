//! The thin HTTP facade (SPEC_FULL §6): two routes that deserialize JSON into
//! the core's input types, call the core, and serialize its output per the
//! wire field names. No business logic lives here.

use axum::{http::StatusCode, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use crate::data::{Assignment, Course};
use crate::error::ScheduleError;
use crate::scheduler;
use crate::vacancy::{self, VacancyReport};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SolveRequest {
    courses: Vec<Course>,
    seed: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SolveResponse {
    assignments: Vec<Assignment>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeRequest {
    assignments: Vec<Assignment>,
}

impl From<ScheduleError> for (StatusCode, String) {
    fn from(err: ScheduleError) -> Self {
        (StatusCode::BAD_REQUEST, err.to_string())
    }
}

async fn solve_handler(
    Json(request): Json<SolveRequest>,
) -> Result<Json<SolveResponse>, (StatusCode, String)> {
    let assignments = scheduler::schedule(&request.courses, request.seed)?;
    Ok(Json(SolveResponse { assignments }))
}

async fn analyze_handler(Json(request): Json<AnalyzeRequest>) -> Json<VacancyReport> {
    Json(vacancy::analyze(&request.assignments))
}

pub fn app() -> Router {
    Router::new()
        .route("/v1/schedule/solve", post(solve_handler))
        .route("/v1/schedule/analyze", post(analyze_handler))
}

pub async fn run_server() {
    let app = app();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await.unwrap();

    log::info!("server running at http://{}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
