use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "problem")]
pub struct Model {
    /// Problem slug (e.g. "two-sum").
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub title: String,
    pub difficulty: String,

    /// Number of distinct users with an accepted submission. Incremented at
    /// most once per user, gated by `solved_record`.
    #[sea_orm(default_value = 0)]
    pub solved_count: i32,

    /// Hidden problems are excluded from listings but remain submittable.
    #[sea_orm(default_value = false)]
    pub hidden: bool,

    #[sea_orm(has_many)]
    pub test_cases: HasMany<super::test_case::Entity>,

    #[sea_orm(has_many)]
    pub submissions: HasMany<super::submission::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
