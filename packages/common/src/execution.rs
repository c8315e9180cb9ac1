use serde::{Deserialize, Serialize};

/// One execution request sent to the backend. One item is produced per test
/// case: the program runs with `stdin` and the backend compares its output
/// against `expected_output`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExecutionItem {
    /// Backend-specific language identifier.
    pub language_id: i32,
    /// Source code to compile and run.
    pub source_code: String,
    /// Input fed to the program.
    pub stdin: String,
    /// Output the backend compares against.
    pub expected_output: String,
    /// CPU time limit in seconds.
    pub cpu_time_limit: f64,
    /// Memory limit in kilobytes.
    pub memory_limit: i32,
}

/// Request body for the batch submission endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExecutionBatch {
    pub submissions: Vec<ExecutionItem>,
}

/// Opaque handle the backend returns for each submitted item, used to poll
/// for its result. Returned in request order.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SubmissionToken {
    pub token: String,
}

/// Status descriptor attached to every polled item.
///
/// The `id` vocabulary belongs to the backend, not to this system; which ids
/// are non-terminal, accepted, or failed is configuration (`StatusMapConfig`).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BackendStatus {
    pub id: i32,
    pub description: String,
}

/// Polled state of a single execution item.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExecutionOutcome {
    pub token: String,
    pub status: BackendStatus,
    /// Wall-clock run time in fractional seconds, as the backend reports it.
    pub time: Option<String>,
    /// Memory used in kilobytes.
    pub memory: Option<i32>,
}

/// Response body for the batch status endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExecutionBatchStatus {
    pub submissions: Vec<ExecutionOutcome>,
}
