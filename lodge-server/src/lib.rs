//! Akwa Lodge Server - marketing site and admin backend for the
//! Akwa Luxury Lodge
//!
//! # Module structure
//!
//! ```text
//! lodge-server/src/
//! ├── core/          # configuration, state, server lifecycle
//! ├── api/           # HTTP routes and handlers
//! ├── routes/        # router assembly and middleware
//! ├── promotions/    # promotion engine: eligibility, pricing, redemption
//! ├── db/            # embedded SurrealDB storage and repositories
//! └── utils/         # errors, logging, slugs, validation
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod promotions;
pub mod routes;
pub mod utils;

// Re-export public types
pub use crate::core::{Config, Server, ServerState};
pub use promotions::{CodeVerification, PromotionEngine, RedeemOutcome};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};
