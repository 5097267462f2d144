//! Job HTTP routes.
//!
//! - GET / - combined internal and external listing, filterable
//! - GET /{id}
//! - POST /
//! - PUT /{id}
//! - DELETE /{id}

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use tracing::info;

use super::responses::{
    bad_body, error_response, internal_error, message_response, parse_id,
};
use super::state::{GuardedJobStore, ServerState};
use crate::aggregation::{JobAggregator, JobFilter, ListJobsQuery};
use crate::job::JobInput;

const JOB_NOT_FOUND: &str = "Job not found";

async fn list_combined_jobs(
    State(aggregator): State<JobAggregator>,
    Query(query): Query<ListJobsQuery>,
) -> Response {
    let filter = JobFilter::from(query);
    match aggregator.get_combined_jobs(&filter).await {
        Ok(jobs) if jobs.is_empty() => StatusCode::NO_CONTENT.into_response(),
        Ok(jobs) => Json(jobs).into_response(),
        Err(err) => internal_error("Failed to list combined jobs", err),
    }
}

async fn get_job(State(job_store): State<GuardedJobStore>, Path(id): Path<String>) -> Response {
    let Some(id) = parse_id(&id) else {
        return error_response(StatusCode::NOT_FOUND, JOB_NOT_FOUND);
    };
    match job_store.get_job(id) {
        Ok(Some(job)) => Json(job).into_response(),
        Ok(None) => error_response(StatusCode::NOT_FOUND, JOB_NOT_FOUND),
        Err(err) => internal_error("Failed to get job", err),
    }
}

async fn create_job(
    State(job_store): State<GuardedJobStore>,
    body: Result<Json<JobInput>, JsonRejection>,
) -> Response {
    let Json(input) = match body {
        Ok(body) => body,
        Err(rejection) => return bad_body(rejection),
    };
    let Some(new_job) = input.to_new_job(Utc::now()) else {
        return error_response(StatusCode::BAD_REQUEST, "Missing required fields");
    };
    match job_store.create_job(new_job) {
        Ok(job) => {
            info!("Created job {} ({})", job.id, job.title);
            (StatusCode::CREATED, Json(job)).into_response()
        }
        Err(err) => internal_error("Failed to create job", err),
    }
}

async fn update_job(
    State(job_store): State<GuardedJobStore>,
    Path(id): Path<String>,
    body: Result<Json<JobInput>, JsonRejection>,
) -> Response {
    let Some(id) = parse_id(&id) else {
        return error_response(StatusCode::NOT_FOUND, JOB_NOT_FOUND);
    };
    let Json(input) = match body {
        Ok(body) => body,
        Err(rejection) => return bad_body(rejection),
    };
    if !input.has_update_fields() {
        return error_response(StatusCode::BAD_REQUEST, "No data provided");
    }
    match job_store.update_job(id, &input) {
        Ok(Some(job)) => Json(job).into_response(),
        Ok(None) => error_response(StatusCode::NOT_FOUND, JOB_NOT_FOUND),
        Err(err) => internal_error("Failed to update job", err),
    }
}

async fn delete_job(State(job_store): State<GuardedJobStore>, Path(id): Path<String>) -> Response {
    let Some(id) = parse_id(&id) else {
        return error_response(StatusCode::NOT_FOUND, JOB_NOT_FOUND);
    };
    match job_store.delete_job(id) {
        Ok(true) => {
            info!("Deleted job {}", id);
            message_response("Job deleted successfully")
        }
        Ok(false) => error_response(StatusCode::NOT_FOUND, JOB_NOT_FOUND),
        Err(err) => internal_error("Failed to delete job", err),
    }
}

pub fn jobs_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(list_combined_jobs).post(create_job))
        .route("/{id}", get(get_job).put(update_job).delete(delete_job))
}
