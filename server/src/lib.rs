pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;

use crate::config::Config;
use crate::db::Database;
use storage_utils::StorageClient;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub storage: StorageClient,
    pub config: Config,
}
