use thiserror::Error;

/// Errors raised by the pricing core.
///
/// Every variant is caller-detectable before invocation: the core validates
/// preconditions and fails fast instead of coercing bad data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum PricingError {
    /// A precondition on an input value was violated (negative amount,
    /// missing or malformed country code, inconsistent range, ...).
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl PricingError {
    /// Shorthand for an [`PricingError::InvalidInput`] naming the offending field.
    pub(crate) fn invalid(field: &str, message: impl std::fmt::Display) -> Self {
        Self::InvalidInput(format!("{field}: {message}"))
    }
}

/// Reject a negative decimal for `field`.
pub(crate) fn ensure_non_negative(
    field: &str,
    value: rust_decimal::Decimal,
) -> Result<(), PricingError> {
    if value < rust_decimal::Decimal::ZERO {
        return Err(PricingError::invalid(
            field,
            format_args!("must not be negative, got {value}"),
        ));
    }
    Ok(())
}
