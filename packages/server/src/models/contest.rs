use serde::Serialize;

/// One scoreboard row.
#[derive(Serialize, utoipa::ToSchema)]
pub struct StandingRow {
    /// 1-based rank by total score.
    #[schema(example = 1)]
    pub rank: i32,
    #[schema(example = "u_8f3a2b")]
    pub user_id: String,
    #[schema(example = 300)]
    pub total_score: i32,
}

/// Contest scoreboard, ordered by total score descending.
#[derive(Serialize, utoipa::ToSchema)]
pub struct StandingsResponse {
    #[schema(example = "spring-round")]
    pub contest_id: String,
    #[schema(example = "Spring Round")]
    pub title: String,
    pub standings: Vec<StandingRow>,
}
