use std::collections::HashMap;

use chrono::Utc;
use sea_orm::sea_query::{Expr, LockType, OnConflict};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, ExprTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::entity::{
    contest_participant, contest_problem, problem, solved_record, submission, test_case_result,
};
use crate::error::AppError;
use crate::judge::verdict::{AggregatedVerdict, CaseResult};

/// Persist a submission's verdict and update solved/score state, all in one
/// transaction.
///
/// Reprocessing an already-recorded submission id is a no-op: existing
/// per-case rows short-circuit the write, which is what makes caller-side
/// retries with the same id safe.
#[instrument(skip(db, verdict), fields(status = %verdict.status))]
pub async fn record_result(
    db: &DatabaseConnection,
    submission_id: Uuid,
    verdict: &AggregatedVerdict,
) -> Result<submission::Model, AppError> {
    let txn = db.begin().await?;

    let sub = submission::Entity::find_by_id(submission_id)
        .lock(LockType::Update)
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::NotFound("Submission not found".into()))?;

    let existing = test_case_result::Entity::find()
        .filter(test_case_result::Column::SubmissionId.eq(submission_id))
        .count(&txn)
        .await?;

    if existing > 0 {
        info!(
            %submission_id,
            existing, "Submission already recorded, skipping"
        );
        txn.commit().await?;
        return Ok(sub);
    }

    let mut active: submission::ActiveModel = sub.into();
    active.status = Set(verdict.status);
    active.judged_at = Set(Some(Utc::now()));
    let updated = active.update(&txn).await?;

    let now = Utc::now();
    for case in &verdict.cases {
        let model = test_case_result::ActiveModel {
            submission_id: Set(submission_id),
            case_number: Set(case.number),
            passed: Set(case.passed),
            time_ms: Set(case.time_ms),
            memory_kb: Set(case.memory_kb),
            verdict: Set(case.verdict.clone()),
            created_at: Set(now),
            ..Default::default()
        };
        model.insert(&txn).await?;
    }

    if verdict.status.is_accepted() {
        mark_solved(&txn, &updated.problem_id, &updated.user_id).await?;
    }

    if let Some(contest_id) = updated.contest_id.clone() {
        recompute_contest_score(&txn, &contest_id, &updated.user_id).await?;
    }

    txn.commit().await?;

    info!(
        %submission_id,
        status = %updated.status,
        cases = verdict.cases.len(),
        "Recorded submission result"
    );

    Ok(updated)
}

/// Record the first solve of a problem by a user.
///
/// The insert-if-absent on `solved_record`'s composite key is the atomic
/// operation; the counter increment is conditioned on that insert actually
/// adding a row, so concurrent accepted submissions cannot double-increment.
async fn mark_solved<C: ConnectionTrait>(
    db: &C,
    problem_id: &str,
    user_id: &str,
) -> Result<(), AppError> {
    let record = solved_record::ActiveModel {
        problem_id: Set(problem_id.to_string()),
        user_id: Set(user_id.to_string()),
        solved_at: Set(Utc::now()),
        ..Default::default()
    };

    let inserted = solved_record::Entity::insert(record)
        .on_conflict(
            OnConflict::columns([
                solved_record::Column::ProblemId,
                solved_record::Column::UserId,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec_without_returning(db)
        .await?;

    if inserted > 0 {
        problem::Entity::update_many()
            .col_expr(
                problem::Column::SolvedCount,
                Expr::col(problem::Column::SolvedCount).add(1),
            )
            .filter(problem::Column::Id.eq(problem_id))
            .exec(db)
            .await?;

        info!(problem_id, user_id, "First solve recorded");
    }

    Ok(())
}

/// Recompute a participant's total contest score from the accepted
/// submission history and upsert the scoreboard row.
///
/// Always a full recomputation: the sum of point values of distinct contest
/// problems with at least one accepted submission tagged with this contest.
/// Resubmissions and replays therefore cannot inflate the total.
pub async fn recompute_contest_score<C: ConnectionTrait>(
    db: &C,
    contest_id: &str,
    user_id: &str,
) -> Result<i32, AppError> {
    let points_by_problem: HashMap<String, i32> = contest_problem::Entity::find()
        .filter(contest_problem::Column::ContestId.eq(contest_id))
        .all(db)
        .await?
        .into_iter()
        .map(|cp| (cp.problem_id, cp.points))
        .collect();

    let accepted_problems: Vec<String> = submission::Entity::find()
        .filter(submission::Column::ContestId.eq(Some(contest_id.to_string())))
        .filter(submission::Column::UserId.eq(user_id))
        .filter(submission::Column::Status.eq(common::SubmissionStatus::Accepted))
        .select_only()
        .column(submission::Column::ProblemId)
        .distinct()
        .into_tuple()
        .all(db)
        .await?;

    let total: i32 = accepted_problems
        .iter()
        .filter_map(|p| points_by_problem.get(p))
        .sum();

    let participant = contest_participant::ActiveModel {
        contest_id: Set(contest_id.to_string()),
        user_id: Set(user_id.to_string()),
        total_score: Set(total),
        registered_at: Set(Utc::now()),
        ..Default::default()
    };

    contest_participant::Entity::insert(participant)
        .on_conflict(
            OnConflict::columns([
                contest_participant::Column::ContestId,
                contest_participant::Column::UserId,
            ])
            .update_column(contest_participant::Column::TotalScore)
            .to_owned(),
        )
        .exec_without_returning(db)
        .await?;

    info!(contest_id, user_id, total, "Contest score recomputed");
    Ok(total)
}

/// Load the persisted per-case results for a submission, in case order.
pub async fn load_recorded_cases<C: ConnectionTrait>(
    db: &C,
    submission_id: Uuid,
) -> Result<Vec<CaseResult>, AppError> {
    let rows = test_case_result::Entity::find()
        .filter(test_case_result::Column::SubmissionId.eq(submission_id))
        .order_by_asc(test_case_result::Column::CaseNumber)
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .map(|row| CaseResult {
            number: row.case_number,
            passed: row.passed,
            time_ms: row.time_ms,
            memory_kb: row.memory_kb,
            verdict: row.verdict,
        })
        .collect())
}
