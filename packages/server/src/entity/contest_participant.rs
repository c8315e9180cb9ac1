use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Scoreboard row for a user in a contest. `total_score` is always the
/// result of a full recomputation over the accepted contest-tagged
/// submissions, never a running increment, so resubmissions and concurrent
/// updates cannot double-count.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "contest_participant")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub contest_id: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: String,
    #[sea_orm(belongs_to, from = "contest_id", to = "id")]
    pub contest: Option<super::contest::Entity>,

    #[sea_orm(default_value = 0)]
    pub total_score: i32,

    pub registered_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
