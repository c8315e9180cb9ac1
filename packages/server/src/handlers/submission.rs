use axum::Json;
use axum::extract::{Path, State};
use sea_orm::EntityTrait;
use tracing::instrument;
use uuid::Uuid;

use crate::entity::submission;
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::judge;
use crate::judge::scoring;
use crate::models::submission::*;
use crate::state::AppState;

/// Submit a solution and judge it.
#[utoipa::path(
    post,
    path = "/",
    tag = "Submissions",
    operation_id = "createSubmission",
    summary = "Submit a solution for judging",
    description = "Runs the submission against the problem's test cases on the execution backend and returns the aggregated verdict. The caller-supplied submission_id acts as an idempotency key: repeating a request with the same id returns the recorded result.",
    request_body = SubmitRequest,
    responses(
        (status = 200, description = "Submission judged", body = SubmitResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Problem or contest not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Problem has no test cases (EMPTY_TEST_SET)", body = ErrorBody),
        (status = 502, description = "Execution backend failure (EXECUTION_BACKEND_ERROR)", body = ErrorBody),
        (status = 504, description = "Execution polling bound exceeded (EXECUTION_TIMEOUT)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn create_submission(
    State(state): State<AppState>,
    AppJson(payload): AppJson<SubmitRequest>,
) -> Result<Json<SubmitResponse>, AppError> {
    validate_submit(&payload, state.config.submission.max_size)?;

    let outcome = judge::judge_submission(&state, &payload).await?;

    Ok(Json(SubmitResponse::from(outcome)))
}

/// Get a stored submission with its per-case results.
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Submissions",
    operation_id = "getSubmission",
    summary = "Get submission details",
    params(
        ("id" = Uuid, Path, description = "Submission ID")
    ),
    responses(
        (status = 200, description = "Submission details", body = SubmissionDetailResponse),
        (status = 404, description = "Submission not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(submission_id = %id))]
pub async fn get_submission(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SubmissionDetailResponse>, AppError> {
    let sub = submission::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Submission not found".into()))?;

    let cases = scoring::load_recorded_cases(&state.db, sub.id).await?;

    Ok(Json(SubmissionDetailResponse {
        submission_id: sub.id,
        problem_id: sub.problem_id,
        user_id: sub.user_id,
        language: sub.language,
        code: sub.code,
        status: sub.status,
        contest_id: sub.contest_id,
        created_at: sub.created_at,
        judged_at: sub.judged_at,
        test_cases: cases.into_iter().map(Into::into).collect(),
    }))
}
