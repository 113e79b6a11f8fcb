//! Parameter pipelines: a compiled conversion stage feeding a setter.
//!
//! [`build`] is called once when a control is connected to a node parameter.
//! The returned [`ParameterCallback`] is then invoked for every control change
//! (UI drag, automation point, MIDI CC) and costs one stage dispatch plus the
//! setter call.
//!
//! The setter is any `FnMut(f64)`. To leave the destination owned by its
//! node, capture it by mutable reference; the borrow checker then keeps the
//! node alive for as long as the callback exists.
//!
//! # Example
//!
//! ```rust
//! use nodewire_core::{ConverterKind, ParameterRange, pipeline};
//!
//! struct Mixer {
//!     dry_db: f64,
//! }
//!
//! let mut mixer = Mixer { dry_db: 0.0 };
//! let mut dry = pipeline::build(
//!     ConverterKind::DryAmount,
//!     ParameterRange::IDENTITY,
//!     false,
//!     |db| mixer.dry_db = db,
//! );
//! dry.call(0.5);
//! drop(dry);
//! assert!((mixer.dry_db - (-6.0206)).abs() < 1e-3);
//! ```

use core::fmt;

use crate::converter::{ConversionStage, ConverterKind};
use crate::range::ParameterRange;

/// A conversion stage bound to a destination setter.
pub struct ParameterCallback<F> {
    stage: ConversionStage,
    setter: F,
}

impl<F: FnMut(f64)> ParameterCallback<F> {
    /// Pairs an already-built stage with a setter.
    pub fn new(stage: ConversionStage, setter: F) -> Self {
        Self { stage, setter }
    }

    /// Converts `value` and forwards the result to the setter.
    ///
    /// `value` is not clamped here; only the stages that define clamping
    /// apply it.
    #[inline]
    pub fn call(&mut self, value: f64) {
        let converted = self.stage.convert(value);
        (self.setter)(converted);
    }

    /// Returns the compiled stage.
    #[inline]
    pub fn stage(&self) -> &ConversionStage {
        &self.stage
    }

    /// Releases the setter.
    pub fn into_setter(self) -> F {
        self.setter
    }
}

impl<F> fmt::Debug for ParameterCallback<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParameterCallback")
            .field("stage", &self.stage)
            .finish_non_exhaustive()
    }
}

/// Compiles a converter, range and invert flag into a callback around
/// `setter`.
///
/// See [`ConversionStage::build`] for how each converter treats `range` and
/// `inverted`.
pub fn build<F: FnMut(f64)>(
    kind: ConverterKind,
    range: ParameterRange,
    inverted: bool,
    setter: F,
) -> ParameterCallback<F> {
    ParameterCallback::new(ConversionStage::build(kind, range, inverted), setter)
}

/// Like [`build`], but resolves the converter from its identifier.
///
/// Unknown identifiers fall back to plain range mapping.
pub fn build_from_id<F: FnMut(f64)>(
    converter_id: &str,
    range: ParameterRange,
    inverted: bool,
    setter: F,
) -> ParameterCallback<F> {
    ParameterCallback::new(ConversionStage::from_id(converter_id, range, inverted), setter)
}
