//! Validation utilities shared by the backend input DTOs

use rust_decimal::Decimal;

/// Validate a material or procurement quantity (fractional, strictly positive)
pub fn validate_quantity(jumlah: Decimal) -> Result<(), &'static str> {
    if jumlah <= Decimal::ZERO {
        return Err("Quantity must be greater than zero");
    }
    Ok(())
}

/// Validate a non-negative stock level
pub fn validate_stock_level(stok: Decimal) -> Result<(), &'static str> {
    if stok < Decimal::ZERO {
        return Err("Stock cannot be negative");
    }
    Ok(())
}

/// Validate a sale/fulfillment line quantity (whole units, at least one)
pub fn validate_item_quantity(jumlah: i32) -> Result<(), &'static str> {
    if jumlah < 1 {
        return Err("Item quantity must be at least 1");
    }
    Ok(())
}

/// Validate that a request carries at least one line item
pub fn validate_line_items<T>(items: &[T]) -> Result<(), &'static str> {
    if items.is_empty() {
        return Err("At least one line item is required");
    }
    Ok(())
}

/// Validate a display name (non-empty, at most 100 characters)
pub fn validate_name(name: &str) -> Result<(), &'static str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Name is required");
    }
    if trimmed.chars().count() > 100 {
        return Err("Name must be at most 100 characters");
    }
    Ok(())
}
