use sea_orm::DatabaseConnection;

use crate::config::AppConfig;
use crate::judge::execution::ExecutionClient;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub executor: ExecutionClient,
    pub config: AppConfig,
}
