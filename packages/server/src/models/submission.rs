use chrono::{DateTime, Utc};
use common::SubmissionStatus;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::judge::JudgeOutcome;
use crate::judge::verdict::CaseResult;

/// Request body for submitting a solution.
#[derive(Clone, Debug, Deserialize, utoipa::ToSchema)]
pub struct SubmitRequest {
    /// Caller-supplied submission identifier. Reusing an id replays the
    /// recorded result instead of judging again.
    pub submission_id: Uuid,
    /// Problem to judge against.
    #[schema(example = "two-sum")]
    pub problem_id: String,
    /// Opaque user identifier from the identity provider.
    #[schema(example = "u_8f3a2b")]
    pub user_id: String,
    /// Source code to judge.
    #[schema(example = "#include <iostream>\nint main() { return 0; }")]
    pub code: String,
    /// Programming language tag (e.g., "cpp", "python", "java").
    #[schema(example = "cpp")]
    pub language: String,
    /// Contest to score this submission under, if any.
    #[schema(example = "spring-round")]
    pub contest_id: Option<String>,
}

/// Outcome of a single test case.
#[derive(Serialize, utoipa::ToSchema)]
pub struct TestCaseResultDto {
    /// 1-based test case number.
    #[schema(example = 1)]
    pub number: i32,
    pub passed: bool,
    /// Execution time in milliseconds, if the backend reported one.
    #[schema(example = 12)]
    pub execution_time: Option<i32>,
    /// Memory used in kilobytes, if the backend reported it.
    #[schema(example = 1024)]
    pub memory_used: Option<i32>,
    /// Backend verdict label.
    #[schema(example = "Accepted")]
    pub verdict: String,
}

impl From<CaseResult> for TestCaseResultDto {
    fn from(case: CaseResult) -> Self {
        Self {
            number: case.number,
            passed: case.passed,
            execution_time: case.time_ms,
            memory_used: case.memory_kb,
            verdict: case.verdict,
        }
    }
}

/// Aggregated result returned to the submitter.
#[derive(Serialize, utoipa::ToSchema)]
pub struct SubmitResponse {
    pub submission_id: Uuid,
    /// `Accepted` iff every test case passed.
    pub status: SubmissionStatus,
    #[schema(example = 2)]
    pub test_cases_passed: i32,
    #[schema(example = 2)]
    pub total_test_cases: i32,
    pub test_cases: Vec<TestCaseResultDto>,
}

impl From<JudgeOutcome> for SubmitResponse {
    fn from(outcome: JudgeOutcome) -> Self {
        Self {
            submission_id: outcome.submission.id,
            status: outcome.verdict.status,
            test_cases_passed: outcome.verdict.passed_count() as i32,
            total_test_cases: outcome.verdict.cases.len() as i32,
            test_cases: outcome
                .verdict
                .cases
                .into_iter()
                .map(TestCaseResultDto::from)
                .collect(),
        }
    }
}

/// Stored submission details.
#[derive(Serialize, utoipa::ToSchema)]
pub struct SubmissionDetailResponse {
    pub submission_id: Uuid,
    #[schema(example = "two-sum")]
    pub problem_id: String,
    #[schema(example = "u_8f3a2b")]
    pub user_id: String,
    #[schema(example = "cpp")]
    pub language: String,
    pub code: String,
    pub status: SubmissionStatus,
    pub contest_id: Option<String>,
    #[schema(example = "2025-10-01T14:30:00Z")]
    pub created_at: DateTime<Utc>,
    pub judged_at: Option<DateTime<Utc>>,
    pub test_cases: Vec<TestCaseResultDto>,
}

/// Validate a submission request.
///
/// Field presence is enforced by deserialization; this checks the fields are
/// usable before any external call is made.
pub fn validate_submit(req: &SubmitRequest, max_size: usize) -> Result<(), AppError> {
    fn required(value: &str, name: &str) -> Result<(), AppError> {
        if value.trim().is_empty() {
            return Err(AppError::Validation(format!(
                "Missing required field: {name}"
            )));
        }
        Ok(())
    }

    required(&req.problem_id, "problem_id")?;
    required(&req.user_id, "user_id")?;
    required(&req.language, "language")?;

    if req.code.trim().is_empty() {
        return Err(AppError::Validation("Missing required field: code".into()));
    }
    if req.code.len() > max_size {
        return Err(AppError::Validation(format!(
            "Source code size ({} bytes) exceeds maximum ({} bytes)",
            req.code.len(),
            max_size
        )));
    }

    if let Some(ref contest_id) = req.contest_id
        && contest_id.trim().is_empty()
    {
        return Err(AppError::Validation(
            "contest_id must not be empty when present".into(),
        ));
    }

    Ok(())
}
