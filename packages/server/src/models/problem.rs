use serde::Serialize;

use crate::entity::problem;

/// Problem metadata as shown to users.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ProblemResponse {
    #[schema(example = "two-sum")]
    pub id: String,
    #[schema(example = "Two Sum")]
    pub title: String,
    #[schema(example = "Easy")]
    pub difficulty: String,
    /// Number of distinct users who solved this problem.
    #[schema(example = 42)]
    pub solved_count: i32,
}

impl From<problem::Model> for ProblemResponse {
    fn from(m: problem::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            difficulty: m.difficulty,
            solved_count: m.solved_count,
        }
    }
}
