//! Parameter binding files for nodewire DSP nodes.
//!
//! A node's parameters are described declaratively: which converter turns the
//! incoming control value into the parameter's unit, over which range, and
//! whether the control is inverted. This crate loads those descriptions from
//! TOML, validates them once, and compiles them into the allocation-free
//! [`ConversionStage`](nodewire_core::ConversionStage)s that run on the
//! control path.
//!
//! # Features
//!
//! - **Binding files**: Load and save [`BindingSet`]s as TOML
//! - **Validation**: Reject empty names, duplicate names, bad ranges and skews
//! - **Compilation**: Resolve converter ids, falling back to range mapping
//!
//! # Example
//!
//! ```rust
//! use nodewire_config::BindingSet;
//!
//! let set = BindingSet::from_toml(r#"
//!     name = "Reverb"
//!
//!     [[parameters]]
//!     name = "Mix"
//!     converter = "DryAmount"
//!
//!     [[parameters]]
//!     name = "Size"
//!     range = { min = 0.5, max = 10.0 }
//! "#).unwrap();
//!
//! let mut size = 0.0;
//! let mut callback = set.get("Size").unwrap().bind(|v| size = v).unwrap();
//! callback.call(1.0);
//! drop(callback);
//! assert_eq!(size, 10.0);
//! ```

mod binding;
mod error;

/// Binding validation.
pub mod validation;

pub use binding::{BindingSet, ParameterBinding, RangeConfig};
pub use error::ConfigError;
pub use validation::{
    ValidationError, ValidationResult, validate_binding, validate_range, validate_set,
};
