use axum::Json;
use axum::extract::{Path, State};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use tracing::instrument;

use crate::entity::problem;
use crate::error::{AppError, ErrorBody};
use crate::models::problem::ProblemResponse;
use crate::state::AppState;

/// List visible problems.
#[utoipa::path(
    get,
    path = "/",
    tag = "Problems",
    operation_id = "listProblems",
    summary = "List problems",
    description = "Returns all non-hidden problems with their solved counts.",
    responses(
        (status = 200, description = "List of problems", body = [ProblemResponse]),
    ),
)]
#[instrument(skip(state))]
pub async fn list_problems(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProblemResponse>>, AppError> {
    let problems = problem::Entity::find()
        .filter(problem::Column::Hidden.eq(false))
        .order_by_asc(problem::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(
        problems.into_iter().map(ProblemResponse::from).collect(),
    ))
}

/// Get a problem by ID.
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Problems",
    operation_id = "getProblem",
    summary = "Get problem metadata",
    params(
        ("id" = String, Path, description = "Problem ID")
    ),
    responses(
        (status = 200, description = "Problem metadata", body = ProblemResponse),
        (status = 404, description = "Problem not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(problem_id = %id))]
pub async fn get_problem(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProblemResponse>, AppError> {
    let model = problem::Entity::find_by_id(id.as_str())
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Problem not found".into()))?;

    Ok(Json(ProblemResponse::from(model)))
}
