//! Cafe Server - REST backend for a small cafe ordering system
//!
//! # Overview
//!
//! - **Auth** (`auth`): identity provider (Argon2 + JWT), auth middleware
//! - **Store** (`db`): key-value store over redb, typed repositories
//! - **Services** (`services`): order workflow, analytics, sample menu
//! - **HTTP API** (`api`): axum routes and handlers
//!
//! # Layout
//!
//! ```text
//! cafe-server/src/
//! ├── core/          # config, state, errors, server
//! ├── auth/          # identity provider, JWT, CurrentUser, middleware
//! ├── db/            # KvStore, redb backend, repositories
//! ├── services/      # orders, analytics, sample data
//! ├── api/           # routes and handlers
//! ├── middleware/    # request logging
//! └── utils/         # logger, validation
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod middleware;
pub mod services;
pub mod utils;

pub use auth::{CurrentUser, IdentityProvider, JwtService, LocalIdentityProvider};
pub use core::{Config, Server, ServerError, ServerState};
pub use db::{KvStore, RedbStore};
pub use shared::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use utils::logger::init_logger_with_file;

// Security logging macro
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// Load `.env` and install the tracing subscriber
///
/// Runs before [`Config::from_env`] so configuration warnings are logged.
/// Reads `LOG_LEVEL`, `LOG_DIR` and `ENVIRONMENT` (JSON logs in production).
pub fn setup_environment() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let log_dir = std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty());
    let json = std::env::var("ENVIRONMENT").is_ok_and(|e| e == "production");

    init_logger_with_file(&level, json, log_dir.as_deref())
}

pub fn print_banner() {
    println!(
        r#"
   ______       ____
  / ____/___ _ / __/__
 / /   / __ `// /_/ _ \
/ /___/ /_/ // __/  __/
\____/\__,_//_/  \___/
        cafe-server v{}
    "#,
        env!("CARGO_PKG_VERSION")
    );
}
