//! Server state - shared handle over configuration and storage
//!
//! `ServerState` is cheap to clone (the database handle is internally
//! reference-counted) and is the axum state for every handler.

use std::path::PathBuf;

use surrealdb::engine::local::Db;
use surrealdb::Surreal;

use crate::core::Config;
use crate::db::DbService;
use crate::promotions::PromotionEngine;
use crate::utils::AppResult;

#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    pub db: Surreal<Db>,
}

impl ServerState {
    pub fn new(config: Config, db: Surreal<Db>) -> Self {
        Self { config, db }
    }

    /// Initialize state against the on-disk datastore under `work_dir`
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        let work_dir = PathBuf::from(&config.work_dir);
        if !work_dir.exists() {
            std::fs::create_dir_all(&work_dir).map_err(|e| {
                crate::utils::AppError::internal(format!(
                    "Failed to create work dir {}: {e}",
                    work_dir.display()
                ))
            })?;
        }

        let db_path = work_dir.join("lodge.db");
        let db_service = DbService::new(&db_path.to_string_lossy()).await?;

        Ok(Self::new(config.clone(), db_service.db))
    }

    /// Initialize state against an in-memory datastore (tests, tooling)
    pub async fn in_memory(config: Config) -> AppResult<Self> {
        let db_service = DbService::memory().await?;
        Ok(Self::new(config, db_service.db))
    }

    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    /// Promotion engine over the shared database handle
    pub fn promotion_engine(&self) -> PromotionEngine {
        PromotionEngine::new(self.db.clone())
    }
}
