use common::SubmissionStatus;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "submission")]
pub struct Model {
    /// Caller-supplied identifier, also the idempotency key: retrying a
    /// submission with the same id never creates a second row.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub problem_id: String,
    #[sea_orm(belongs_to, from = "problem_id", to = "id")]
    pub problem: HasOne<super::problem::Entity>,

    /// Opaque identifier issued by the external identity provider.
    pub user_id: String,

    #[sea_orm(column_type = "Text")]
    pub code: String,
    pub language: String,

    /// Pending until aggregation completes; a failed pipeline leaves it
    /// Pending rather than recording a verdict it cannot back.
    pub status: SubmissionStatus,

    /// NULL for standalone submissions.
    pub contest_id: Option<String>,
    #[sea_orm(belongs_to, from = "contest_id", to = "id")]
    pub contest: Option<super::contest::Entity>,

    #[sea_orm(has_many)]
    pub test_case_results: HasMany<super::test_case_result::Entity>,

    pub created_at: DateTimeUtc,
    pub judged_at: Option<DateTimeUtc>,
}

impl ActiveModelBehavior for ActiveModel {}
