//! Boundary validation shared by the record drafts.

use rust_decimal::Decimal;

/// Reasons a draft or update is refused before it reaches a store.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{entity}.{field} must not be empty")]
    EmptyField {
        entity: &'static str,
        field: &'static str,
    },

    #[error("{entity}.{field} must not be negative, got {value}")]
    NegativeAmount {
        entity: &'static str,
        field: &'static str,
        value: Decimal,
    },

    #[error("{entity} status cannot change from {from} to {to}")]
    StatusTransition {
        entity: &'static str,
        from: String,
        to: String,
    },

    #[error("unknown {entity} value: {value}")]
    UnknownVariant {
        entity: &'static str,
        value: String,
    },
}

pub(crate) fn require_text(
    entity: &'static str,
    field: &'static str,
    value: &str,
) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField { entity, field });
    }
    Ok(())
}

pub(crate) fn require_non_negative(
    entity: &'static str,
    field: &'static str,
    value: Decimal,
) -> Result<(), ValidationError> {
    if value < Decimal::ZERO {
        return Err(ValidationError::NegativeAmount {
            entity,
            field,
            value,
        });
    }
    Ok(())
}
