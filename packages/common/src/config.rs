use std::collections::HashMap;

use serde::Deserialize;

/// Classification of the execution backend's status ids.
///
/// The backend's status vocabulary is deployment-specific, so the partition
/// into non-terminal / accepted / failed ids is configuration rather than a
/// constant. Ids appearing in none of the sets are treated as terminal
/// failures by the aggregator.
#[derive(Debug, Deserialize, Clone)]
pub struct StatusMapConfig {
    /// Non-terminal ids (still queued or running). Default: [1, 2].
    #[serde(default = "default_queued_ids")]
    pub queued_ids: Vec<i32>,
    /// Ids meaning the output matched. Default: [3].
    #[serde(default = "default_accepted_ids")]
    pub accepted_ids: Vec<i32>,
    /// Known failure ids (wrong answer, limits, runtime errors...).
    /// Default: [4..=14].
    #[serde(default = "default_failure_ids")]
    pub failure_ids: Vec<i32>,
}

fn default_queued_ids() -> Vec<i32> {
    vec![1, 2]
}
fn default_accepted_ids() -> Vec<i32> {
    vec![3]
}
fn default_failure_ids() -> Vec<i32> {
    (4..=14).collect()
}

impl StatusMapConfig {
    /// An item is terminal once it is no longer queued or running.
    pub fn is_terminal(&self, id: i32) -> bool {
        !self.queued_ids.contains(&id)
    }

    pub fn is_accepted(&self, id: i32) -> bool {
        self.accepted_ids.contains(&id)
    }

    /// True if the id appears in any configured set.
    pub fn is_known(&self, id: i32) -> bool {
        self.queued_ids.contains(&id)
            || self.accepted_ids.contains(&id)
            || self.failure_ids.contains(&id)
    }
}

impl Default for StatusMapConfig {
    fn default() -> Self {
        Self {
            queued_ids: default_queued_ids(),
            accepted_ids: default_accepted_ids(),
            failure_ids: default_failure_ids(),
        }
    }
}

/// Execution backend client configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct ExecutorConfig {
    /// Base URL of the execution backend. Default: "http://localhost:2358".
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request HTTP timeout in milliseconds. Default: 10000.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    /// Delay between status polls in milliseconds. Default: 1000.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Maximum number of status polls before the batch is abandoned.
    /// Default: 10.
    #[serde(default = "default_max_poll_attempts")]
    pub max_poll_attempts: u32,
    /// CPU time limit per test case in seconds. Default: 2.0.
    #[serde(default = "default_cpu_time_limit")]
    pub cpu_time_limit: f64,
    /// Memory limit per test case in kilobytes. Default: 128000.
    #[serde(default = "default_memory_limit_kb")]
    pub memory_limit_kb: i32,
    /// Status id classification.
    #[serde(default)]
    pub statuses: StatusMapConfig,
    /// Language tag to backend language id.
    #[serde(default = "default_languages")]
    pub languages: HashMap<String, i32>,
}

fn default_base_url() -> String {
    "http://localhost:2358".into()
}
fn default_request_timeout_ms() -> u64 {
    10_000
}
fn default_poll_interval_ms() -> u64 {
    1_000
}
fn default_max_poll_attempts() -> u32 {
    10
}
fn default_cpu_time_limit() -> f64 {
    2.0
}
fn default_memory_limit_kb() -> i32 {
    128_000
}
fn default_languages() -> HashMap<String, i32> {
    HashMap::from([
        ("cpp".to_string(), 54),
        ("c".to_string(), 50),
        ("python".to_string(), 71),
        ("java".to_string(), 62),
    ])
}

impl ExecutorConfig {
    /// Resolve a language tag to the backend's language id.
    pub fn language_id(&self, language: &str) -> Option<i32> {
        self.languages.get(language.trim()).copied()
    }
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_ms: default_request_timeout_ms(),
            poll_interval_ms: default_poll_interval_ms(),
            max_poll_attempts: default_max_poll_attempts(),
            cpu_time_limit: default_cpu_time_limit(),
            memory_limit_kb: default_memory_limit_kb(),
            statuses: StatusMapConfig::default(),
            languages: default_languages(),
        }
    }
}
