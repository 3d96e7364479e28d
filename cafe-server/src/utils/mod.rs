//! Utilities
//!
//! - [`logger`] - tracing subscriber setup
//! - [`validation`] - text length limits for request payloads

pub mod logger;
pub mod validation;
