use std::time::Duration;

use sea_orm::sea_query::{Index, PostgresQueryBuilder};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr};
use tracing::info;

use crate::entity::{submission, test_case};

pub async fn init_db(db_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(db_url.to_owned());

    // Set connection pool options
    opt.max_connections(100)
        .min_connections(5)
        .connect_timeout(Duration::from_secs(8))
        .acquire_timeout(Duration::from_secs(8))
        .idle_timeout(Duration::from_secs(8))
        .max_lifetime(Duration::from_secs(8))
        .sqlx_logging(true);

    let db = Database::connect(opt).await?;
    db.get_schema_registry("server::entity::*")
        .sync(&db)
        .await?;

    Ok(db)
}

pub async fn ensure_indexes(db: &DatabaseConnection) -> Result<(), DbErr> {
    // Composite index for the contest score recomputation:
    // SELECT DISTINCT problem_id FROM submission
    //   WHERE contest_id = ? AND user_id = ? AND status = 'Accepted'
    let stmt = Index::create()
        .if_not_exists()
        .name("idx_submission_contest_user_status")
        .table(submission::Entity)
        .col(submission::Column::ContestId)
        .col(submission::Column::UserId)
        .col(submission::Column::Status)
        .to_string(PostgresQueryBuilder);

    match db.execute_unprepared(&stmt).await {
        Ok(_) => {
            info!("Ensured index idx_submission_contest_user_status exists");
        }
        Err(e) => {
            tracing::warn!(
                "Failed to create index idx_submission_contest_user_status: {}",
                e
            );
        }
    }

    // Ordered test case loads: WHERE problem_id = ? ORDER BY position
    let stmt = Index::create()
        .if_not_exists()
        .name("idx_test_case_problem_position")
        .table(test_case::Entity)
        .col(test_case::Column::ProblemId)
        .col(test_case::Column::Position)
        .to_string(PostgresQueryBuilder);

    match db.execute_unprepared(&stmt).await {
        Ok(_) => {
            info!("Ensured index idx_test_case_problem_position exists");
        }
        Err(e) => {
            tracing::warn!(
                "Failed to create index idx_test_case_problem_position: {}",
                e
            );
        }
    }

    Ok(())
}
