use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder};

use crate::entity::{problem, test_case};
use crate::error::AppError;

/// A test case loaded for judging, numbered 1-based in position order. The
/// same numbering is used for the execution batch and the persisted results,
/// so index k always refers to the same logical case end to end.
#[derive(Clone, Debug)]
pub struct LoadedCase {
    pub number: i32,
    pub input: String,
    pub expected_output: String,
}

/// Load the ordered test cases for a problem.
///
/// Fails with `NotFound` if the problem does not exist and `EmptyTestSet` if
/// it exists but has no test cases.
pub async fn load_for_problem<C: ConnectionTrait>(
    db: &C,
    problem_id: &str,
) -> Result<Vec<LoadedCase>, AppError> {
    problem::Entity::find_by_id(problem_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Problem not found".into()))?;

    let cases = test_case::Entity::find()
        .filter(test_case::Column::ProblemId.eq(problem_id))
        .order_by_asc(test_case::Column::Position)
        .all(db)
        .await?;

    if cases.is_empty() {
        return Err(AppError::EmptyTestSet(format!(
            "Problem '{}' has no test cases",
            problem_id
        )));
    }

    Ok(cases
        .into_iter()
        .enumerate()
        .map(|(i, tc)| LoadedCase {
            number: (i + 1) as i32,
            input: tc.input,
            expected_output: tc.expected_output,
        })
        .collect())
}
