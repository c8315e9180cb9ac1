use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "test_case_result")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique_key = "submission_case")]
    pub submission_id: Uuid,
    /// 1-based, matching the test case ordering of the problem at judge time.
    #[sea_orm(unique_key = "submission_case")]
    pub case_number: i32,

    pub passed: bool,

    pub time_ms: Option<i32>,
    pub memory_kb: Option<i32>,

    /// Backend verdict label (e.g. "Accepted", "Wrong Answer").
    pub verdict: String,

    #[sea_orm(belongs_to, from = "submission_id", to = "id")]
    pub submission: HasOne<super::submission::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
