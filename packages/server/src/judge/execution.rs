use std::collections::HashMap;
use std::time::Duration;

use common::config::ExecutorConfig;
use common::execution::{
    ExecutionBatch, ExecutionBatchStatus, ExecutionItem, ExecutionOutcome, SubmissionToken,
};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::judge::test_cases::LoadedCase;

#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("execution backend request failed: {0}")]
    Backend(#[from] reqwest::Error),

    #[error("execution backend returned {got} tokens for {expected} submissions")]
    TokenMismatch { expected: usize, got: usize },

    #[error("execution did not reach a terminal state after {attempts} poll attempts")]
    Timeout { attempts: u32 },
}

/// Client for the external execution backend.
///
/// All test cases of a submission go out as one batch; results come back by
/// polling the batch status endpoint at a fixed interval until every item is
/// terminal or the attempt bound is hit. Transport errors are not retried
/// here: a partial result would misrepresent correctness, so the whole
/// submission fails instead.
#[derive(Clone)]
pub struct ExecutionClient {
    http: reqwest::Client,
    config: ExecutorConfig,
}

impl ExecutionClient {
    pub fn new(config: ExecutorConfig) -> Result<Self, ExecutionError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()?;
        Ok(Self { http, config })
    }

    fn batch_url(&self) -> String {
        format!(
            "{}/submissions/batch",
            self.config.base_url.trim_end_matches('/')
        )
    }

    /// Run `source_code` against every test case and return one terminal
    /// outcome per case, in case order.
    #[instrument(skip(self, source_code, cases), fields(cases = cases.len()))]
    pub async fn run_batch(
        &self,
        language_id: i32,
        source_code: &str,
        cases: &[LoadedCase],
    ) -> Result<Vec<ExecutionOutcome>, ExecutionError> {
        let items: Vec<ExecutionItem> = cases
            .iter()
            .map(|case| ExecutionItem {
                language_id,
                source_code: source_code.to_string(),
                stdin: case.input.trim().to_string(),
                expected_output: case.expected_output.trim().to_string(),
                cpu_time_limit: self.config.cpu_time_limit,
                memory_limit: self.config.memory_limit_kb,
            })
            .collect();

        let tokens = self.submit(items).await?;
        self.poll_until_terminal(&tokens).await
    }

    async fn submit(&self, items: Vec<ExecutionItem>) -> Result<Vec<SubmissionToken>, ExecutionError> {
        let expected = items.len();
        let tokens: Vec<SubmissionToken> = self
            .http
            .post(self.batch_url())
            .json(&ExecutionBatch { submissions: items })
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if tokens.len() != expected {
            return Err(ExecutionError::TokenMismatch {
                expected,
                got: tokens.len(),
            });
        }

        debug!(tokens = tokens.len(), "Execution batch submitted");
        Ok(tokens)
    }

    /// Poll the outstanding items until all are terminal. Results are slotted
    /// back into submission order regardless of backend completion order.
    async fn poll_until_terminal(
        &self,
        tokens: &[SubmissionToken],
    ) -> Result<Vec<ExecutionOutcome>, ExecutionError> {
        let slot_by_token: HashMap<&str, usize> = tokens
            .iter()
            .enumerate()
            .map(|(i, t)| (t.token.as_str(), i))
            .collect();
        let mut results: Vec<Option<ExecutionOutcome>> = vec![None; tokens.len()];

        for attempt in 1..=self.config.max_poll_attempts {
            let outstanding: Vec<&str> = results
                .iter()
                .enumerate()
                .filter(|(_, r)| r.is_none())
                .map(|(i, _)| tokens[i].token.as_str())
                .collect();

            let status: ExecutionBatchStatus = self
                .http
                .get(self.batch_url())
                .query(&[
                    ("tokens", outstanding.join(",").as_str()),
                    ("fields", "token,status,time,memory"),
                ])
                .send()
                .await?
                .error_for_status()?
                .json()
                .await?;

            for outcome in status.submissions {
                if !self.config.statuses.is_terminal(outcome.status.id) {
                    continue;
                }
                if let Some(&slot) = slot_by_token.get(outcome.token.as_str()) {
                    results[slot] = Some(outcome);
                }
            }

            let remaining = results.iter().filter(|r| r.is_none()).count();
            if remaining == 0 {
                return Ok(results.into_iter().flatten().collect());
            }

            debug!(attempt, remaining, "Execution batch still running");
            if attempt < self.config.max_poll_attempts {
                tokio::time::sleep(Duration::from_millis(self.config.poll_interval_ms)).await;
            }
        }

        Err(ExecutionError::Timeout {
            attempts: self.config.max_poll_attempts,
        })
    }
}
