//! Field checks shared by list and item constructors.

use super::ListingValidationError;

pub(super) fn require_field<T>(
    value: Option<T>,
    field: &'static str,
) -> Result<T, ListingValidationError> {
    value.ok_or(ListingValidationError::MissingField { field })
}

pub(super) fn ensure_non_blank(value: &str, field: &'static str) -> Result<(), ListingValidationError> {
    if value.trim().is_empty() {
        return Err(ListingValidationError::EmptyField { field });
    }
    Ok(())
}

pub(super) fn validate_non_empty_field(
    value: String,
    field: &'static str,
) -> Result<String, ListingValidationError> {
    ensure_non_blank(&value, field)?;
    Ok(value)
}

pub(super) fn ensure_valid_price(
    value: f64,
    field: &'static str,
) -> Result<f64, ListingValidationError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ListingValidationError::InvalidPrice { field, value });
    }
    Ok(value)
}
