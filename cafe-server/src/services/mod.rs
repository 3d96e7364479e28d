//! Business services
//!
//! - [`OrderService`] - order placement, visibility and status changes
//! - [`analytics`] - dashboard report
//! - [`sample_data`] - sample menu seeding

pub mod analytics;
pub mod order_service;
pub mod sample_data;

pub use order_service::OrderService;
pub use sample_data::{SeedOutcome, seed_sample_menu};
