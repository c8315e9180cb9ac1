use axum::Json;
use axum::extract::{Path, State};
use sea_orm::{ColumnTrait, EntityTrait, Order, QueryFilter, QueryOrder};
use tracing::instrument;

use crate::entity::{contest, contest_participant};
use crate::error::{AppError, ErrorBody};
use crate::models::contest::{StandingRow, StandingsResponse};
use crate::state::AppState;

/// Get the scoreboard for a contest.
#[utoipa::path(
    get,
    path = "/{id}/standings",
    tag = "Contests",
    operation_id = "getContestStandings",
    summary = "Get contest standings",
    description = "Returns the contest scoreboard ordered by total score descending. Scores are recomputed from accepted submissions whenever a contest-tagged submission is judged.",
    params(
        ("id" = String, Path, description = "Contest ID")
    ),
    responses(
        (status = 200, description = "Contest standings", body = StandingsResponse),
        (status = 404, description = "Contest not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(contest_id = %id))]
pub async fn get_standings(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StandingsResponse>, AppError> {
    let contest_model = contest::Entity::find_by_id(id.as_str())
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Contest not found".into()))?;

    let participants = contest_participant::Entity::find()
        .filter(contest_participant::Column::ContestId.eq(id.as_str()))
        .order_by(contest_participant::Column::TotalScore, Order::Desc)
        .order_by(contest_participant::Column::UserId, Order::Asc)
        .all(&state.db)
        .await?;

    let standings = participants
        .into_iter()
        .enumerate()
        .map(|(i, p)| StandingRow {
            rank: (i + 1) as i32,
            user_id: p.user_id,
            total_score: p.total_score,
        })
        .collect();

    Ok(Json(StandingsResponse {
        contest_id: contest_model.id,
        title: contest_model.title,
        standings,
    }))
}
