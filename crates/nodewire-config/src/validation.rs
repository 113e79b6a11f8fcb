//! Binding validation.
//!
//! Ranges and skews are checked here, once, when a binding file is loaded or
//! compiled. The conversion stages in `nodewire-core` assume valid input and
//! never check it on the control path.
//!
//! # Example
//!
//! ```rust
//! use nodewire_config::{ParameterBinding, validate_binding};
//! use nodewire_core::ParameterRange;
//!
//! let ok = ParameterBinding::new("Cutoff").with_range(ParameterRange::new(20.0, 20_000.0));
//! assert!(validate_binding(&ok).is_ok());
//!
//! let bad = ParameterBinding::new("Cutoff").with_range(ParameterRange::new(1.0, 1.0));
//! assert!(validate_binding(&bad).is_err());
//! ```

use nodewire_core::ParameterRange;
use std::collections::HashSet;
use thiserror::Error;

use crate::binding::{BindingSet, ParameterBinding};

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// A binding has an empty parameter name.
    #[error("parameter name must not be empty")]
    EmptyName,

    /// Two bindings share a parameter name.
    #[error("duplicate parameter '{0}'")]
    DuplicateParameter(String),

    /// Range bounds are not finite or not increasing.
    #[error("parameter '{param}' has invalid range [{min}, {max}]")]
    InvalidRange {
        /// Name of the parameter.
        param: String,
        /// Configured minimum.
        min: f64,
        /// Configured maximum.
        max: f64,
    },

    /// Skew is not a positive finite number.
    #[error("parameter '{param}' has invalid skew {skew}")]
    InvalidSkew {
        /// Name of the parameter.
        param: String,
        /// Configured skew.
        skew: f64,
    },

    /// Multiple validation errors.
    #[error("multiple validation errors: {}", .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; "))]
    Multiple(Vec<ValidationError>),
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Checks that a range is finite, increasing and has a positive skew.
pub fn validate_range(param: &str, range: &ParameterRange) -> ValidationResult<()> {
    if !range.min.is_finite() || !range.max.is_finite() || range.min >= range.max {
        return Err(ValidationError::InvalidRange {
            param: param.to_string(),
            min: range.min,
            max: range.max,
        });
    }
    if !range.skew.is_finite() || range.skew <= 0.0 {
        return Err(ValidationError::InvalidSkew {
            param: param.to_string(),
            skew: range.skew,
        });
    }
    Ok(())
}

/// Validates a single binding.
///
/// An unknown converter id is not an error: it compiles to plain range
/// mapping.
pub fn validate_binding(binding: &ParameterBinding) -> ValidationResult<()> {
    if binding.name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    validate_range(&binding.name, &binding.parameter_range())
}

/// Validates every binding in a set and checks names are unique.
///
/// Returns the single error directly, or [`ValidationError::Multiple`] when
/// more than one binding is invalid.
pub fn validate_set(set: &BindingSet) -> ValidationResult<()> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for binding in set.iter() {
        if let Err(e) = validate_binding(binding) {
            errors.push(e);
        }
        if !binding.name.is_empty() && !seen.insert(binding.name.as_str()) {
            errors.push(ValidationError::DuplicateParameter(binding.name.clone()));
        }
    }

    match errors.len() {
        0 => Ok(()),
        1 => Err(errors.remove(0)),
        _ => Err(ValidationError::Multiple(errors)),
    }
}
