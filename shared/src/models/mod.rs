//! Data models
//!
//! Shared between cafe-server and cafe-client (via API).
//! Records are stored as JSON documents keyed by `user:`, `menu:` and `order:`.

pub mod analytics;
pub mod menu_item;
pub mod order;
pub mod user;

// Re-exports
pub use analytics::*;
pub use menu_item::*;
pub use order::*;
pub use user::*;
