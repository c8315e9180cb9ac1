pub mod execution;
pub mod scoring;
pub mod test_cases;
pub mod verdict;

use chrono::Utc;
use common::SubmissionStatus;
use sea_orm::sea_query::OnConflict;
use sea_orm::{EntityTrait, Set};
use tracing::{info, instrument};

use crate::entity::{contest, submission};
use crate::error::AppError;
use crate::models::submission::SubmitRequest;
use crate::state::AppState;
use self::verdict::AggregatedVerdict;

/// Result of driving a submission through the whole pipeline.
pub struct JudgeOutcome {
    pub submission: submission::Model,
    pub verdict: AggregatedVerdict,
}

/// Drive one submission through the pipeline: load the problem's test cases,
/// execute them as a batch on the backend, aggregate the outcomes into a
/// verdict, and persist submission, per-case results, and solved/score state.
///
/// Any failure surfaces as an error and leaves the stored submission (if one
/// was created) in `Pending`; a verdict is only ever recorded when every test
/// case was positively confirmed.
#[instrument(
    skip(state, request),
    fields(
        submission_id = %request.submission_id,
        problem_id = %request.problem_id,
        user_id = %request.user_id,
    )
)]
pub async fn judge_submission(
    state: &AppState,
    request: &SubmitRequest,
) -> Result<JudgeOutcome, AppError> {
    let db = &state.db;

    let cases = test_cases::load_for_problem(db, &request.problem_id).await?;

    if let Some(ref contest_id) = request.contest_id {
        check_contest_window(state, contest_id).await?;
    }

    let language_id = state
        .config
        .executor
        .language_id(&request.language)
        .ok_or_else(|| {
            AppError::Validation(format!("Unsupported language '{}'", request.language.trim()))
        })?;

    // Claim the idempotency key. A duplicate id either short-circuits to the
    // recorded result or (if a prior attempt died mid-flight) is judged again
    // under the same row.
    let inserted = submission::Entity::insert(submission::ActiveModel {
        id: Set(request.submission_id),
        problem_id: Set(request.problem_id.clone()),
        user_id: Set(request.user_id.clone()),
        code: Set(request.code.clone()),
        language: Set(request.language.trim().to_string()),
        status: Set(SubmissionStatus::Pending),
        contest_id: Set(request.contest_id.clone()),
        created_at: Set(Utc::now()),
        judged_at: Set(None),
        ..Default::default()
    })
    .on_conflict(
        OnConflict::column(submission::Column::Id)
            .do_nothing()
            .to_owned(),
    )
    .exec_without_returning(db)
    .await?;

    if inserted == 0 {
        let existing = submission::Entity::find_by_id(request.submission_id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Submission not found".into()))?;

        if existing.status.is_final() {
            info!(
                submission_id = %existing.id,
                status = %existing.status,
                "Duplicate submission id, returning recorded result"
            );
            let cases = scoring::load_recorded_cases(db, existing.id).await?;
            let status = existing.status;
            return Ok(JudgeOutcome {
                submission: existing,
                verdict: AggregatedVerdict { status, cases },
            });
        }
    }

    let outcomes = state
        .executor
        .run_batch(language_id, &request.code, &cases)
        .await?;

    let verdict = verdict::aggregate(&state.config.executor.statuses, &cases, &outcomes);

    let submission = scoring::record_result(db, request.submission_id, &verdict).await?;

    Ok(JudgeOutcome {
        submission,
        verdict,
    })
}

/// A contest tag is only accepted while the contest window is open, so every
/// stored contest-tagged submission is in-window by construction and the
/// score recomputation can trust the tag alone.
async fn check_contest_window(state: &AppState, contest_id: &str) -> Result<(), AppError> {
    let contest_model = contest::Entity::find_by_id(contest_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Contest not found".into()))?;

    let now = Utc::now();
    if now < contest_model.start_time {
        return Err(AppError::Validation("Contest has not started yet".into()));
    }
    if now > contest_model.end_time {
        return Err(AppError::Validation("Contest has ended".into()));
    }

    Ok(())
}
