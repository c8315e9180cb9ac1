use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// The durable fact "this user has at least one accepted submission for this
/// problem". The composite primary key is the deduplication gate for the
/// problem's solved counter: the counter increments only when inserting here
/// actually adds a row.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "solved_record")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub problem_id: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: String,
    #[sea_orm(belongs_to, from = "problem_id", to = "id")]
    pub problem: Option<super::problem::Entity>,

    pub solved_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
