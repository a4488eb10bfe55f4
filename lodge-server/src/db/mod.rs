//! Database Module
//!
//! Embedded SurrealDB storage. `DbService` opens the datastore, selects the
//! namespace, and applies the index definitions the repositories rely on.

pub mod models;
pub mod repository;

use surrealdb::engine::local::{Db, RocksDb};
use surrealdb::Surreal;

use crate::utils::AppError;

const NAMESPACE: &str = "akwa";
const DATABASE: &str = "lodge";

/// Index definitions, applied at startup. `IF NOT EXISTS` keeps restarts
/// idempotent.
const SCHEMA: &str = "\
    DEFINE INDEX IF NOT EXISTS room_slug ON TABLE room COLUMNS slug UNIQUE;\
    DEFINE INDEX IF NOT EXISTS hotel_service_slug ON TABLE hotel_service COLUMNS slug UNIQUE;\
    DEFINE INDEX IF NOT EXISTS promotion_code ON TABLE promotion COLUMNS code;\
    DEFINE INDEX IF NOT EXISTS announcement_promotion ON TABLE announcement COLUMNS promotion;\
";

/// Database service - owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the on-disk datastore at `db_path`
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        let db = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;
        Self::prepare(db).await
    }

    /// Open an in-memory datastore (tests and local tooling)
    pub async fn memory() -> Result<Self, AppError> {
        let db = Surreal::new::<surrealdb::engine::local::Mem>(())
            .await
            .map_err(|e| AppError::database(format!("Failed to open in-memory database: {e}")))?;
        Self::prepare(db).await
    }

    async fn prepare(db: Surreal<Db>) -> Result<Self, AppError> {
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        db.query(SCHEMA)
            .await
            .map_err(|e| AppError::database(format!("Failed to apply schema: {e}")))?;

        tracing::info!("Database ready (ns={NAMESPACE}, db={DATABASE})");
        Ok(Self { db })
    }
}
