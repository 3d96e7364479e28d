//! HTTP middleware not tied to authentication

pub mod logging;

pub use logging::logging_middleware;
