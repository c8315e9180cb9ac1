use common::SubmissionStatus;
use common::config::StatusMapConfig;
use common::execution::ExecutionOutcome;
use tracing::warn;

use crate::judge::test_cases::LoadedCase;

/// Classified outcome of one test case.
#[derive(Clone, Debug)]
pub struct CaseResult {
    pub number: i32,
    pub passed: bool,
    pub time_ms: Option<i32>,
    pub memory_kb: Option<i32>,
    /// Backend verdict label, surfaced to the caller as-is.
    pub verdict: String,
}

/// Final verdict of a submission with its per-case breakdown.
#[derive(Clone, Debug)]
pub struct AggregatedVerdict {
    pub status: SubmissionStatus,
    pub cases: Vec<CaseResult>,
}

impl AggregatedVerdict {
    pub fn passed_count(&self) -> usize {
        self.cases.iter().filter(|c| c.passed).count()
    }
}

/// Convert the backend's fractional-second time string to milliseconds.
fn time_to_ms(time: Option<&str>) -> Option<i32> {
    time.and_then(|t| t.trim().parse::<f64>().ok())
        .map(|seconds| (seconds * 1000.0).round() as i32)
}

/// Map every terminal outcome to exactly one of passed/failed and fold them
/// into a submission verdict: accepted iff every case passed. Ids outside the
/// configured vocabulary count as failed and are logged, never silently
/// passed. An empty case list aggregates to rejected.
pub fn aggregate(
    statuses: &StatusMapConfig,
    cases: &[LoadedCase],
    outcomes: &[ExecutionOutcome],
) -> AggregatedVerdict {
    let mut results = Vec::with_capacity(cases.len());

    for (case, outcome) in cases.iter().zip(outcomes) {
        let passed = statuses.is_accepted(outcome.status.id);
        if !passed && !statuses.is_known(outcome.status.id) {
            warn!(
                status_id = outcome.status.id,
                description = %outcome.status.description,
                case = case.number,
                "Unrecognized execution backend status, counting as failed"
            );
        }

        results.push(CaseResult {
            number: case.number,
            passed,
            time_ms: time_to_ms(outcome.time.as_deref()),
            memory_kb: outcome.memory,
            verdict: outcome.status.description.clone(),
        });
    }

    let status = if !results.is_empty() && results.iter().all(|r| r.passed) {
        SubmissionStatus::Accepted
    } else {
        SubmissionStatus::Rejected
    };

    AggregatedVerdict {
        status,
        cases: results,
    }
}
