//! Input validation helpers
//!
//! Centralized text length constants and validation functions.

use shared::error::{AppError, AppResult, ErrorCode};
use shared::money::{self, MAX_PRICE, MAX_QUANTITY};

// ── Text length limits ──────────────────────────────────────────────

/// Names: menu item, category, user display name
pub const MAX_NAME_LEN: usize = 200;

/// Order notes and menu descriptions
pub const MAX_NOTE_LEN: usize = 500;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Passwords (before hashing)
pub const MAX_PASSWORD_LEN: usize = 128;

/// Image URLs
pub const MAX_URL_LEN: usize = 2048;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    check_len(value, field, max_len)
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(value: &Option<String>, field: &str, max_len: usize) -> AppResult<()> {
    match value {
        Some(v) => check_len(v, field, max_len),
        None => Ok(()),
    }
}

/// Prices must be finite, non-negative and at most [`MAX_PRICE`]
pub fn validate_price(price: f64) -> AppResult<()> {
    if money::is_valid_price(price) {
        return Ok(());
    }
    Err(AppError::new(ErrorCode::MenuItemInvalidPrice)
        .with_detail("price", price)
        .with_detail("max", MAX_PRICE))
}

/// Line quantities must be within `1..=MAX_QUANTITY`
pub fn validate_quantity(quantity: u32, menu_item_id: &str) -> AppResult<()> {
    if money::is_valid_quantity(quantity) {
        return Ok(());
    }
    Err(AppError::new(ErrorCode::InvalidQuantity)
        .with_detail("menuItemId", menu_item_id)
        .with_detail("max", MAX_QUANTITY))
}

fn check_len(value: &str, field: &str, max_len: usize) -> AppResult<()> {
    let len = value.chars().count();
    if len > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({len} chars, max {max_len})"
        )));
    }
    Ok(())
}
