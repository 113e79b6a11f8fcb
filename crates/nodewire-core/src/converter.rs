//! Converter kinds and their compiled stages.
//!
//! A parameter binding names a [`ConverterKind`] plus a [`ParameterRange`] and
//! an invert flag. [`ConversionStage::build`] resolves that description once,
//! at bind time, into a small `Copy` value. Converting a control value is then
//! a single `match` on the stage with no allocation and no further branching
//! on the binding description.
//!
//! # Converters
//!
//! | Kind | Input | Output |
//! |------|-------|--------|
//! | `Identity` | normalized | value on `range` (optionally inverted) |
//! | `Decibel2Gain` | dB | linear gain |
//! | `Gain2Decibel` | linear gain | dB |
//! | `SubtractFromOne` | normalized | `range` value of `clamp(1 - x)` |
//! | `DryAmount` | linear wet amount | dB of `clamp(1 - x)` |
//! | `WetAmount` | linear wet amount | dB of `x` |

use crate::math::{decibels_to_gain, gain_to_decibels};
use crate::range::ParameterRange;

/// Named value conversion applied before a parameter setter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ConverterKind {
    /// Map a normalized value onto the parameter range.
    #[default]
    Identity,
    /// Decibels in, linear gain out.
    Decibel2Gain,
    /// Linear gain in, decibels out.
    Gain2Decibel,
    /// Invert a normalized value, then map it onto the range.
    SubtractFromOne,
    /// Wet amount in, dry level in decibels out.
    DryAmount,
    /// Wet amount in, wet level in decibels out.
    WetAmount,
}

impl ConverterKind {
    /// All converter kinds, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Identity,
        Self::Decibel2Gain,
        Self::Gain2Decibel,
        Self::SubtractFromOne,
        Self::DryAmount,
        Self::WetAmount,
    ];

    /// Returns the stable textual identifier used in binding descriptions.
    pub const fn id(self) -> &'static str {
        match self {
            Self::Identity => "Identity",
            Self::Decibel2Gain => "Decibel2Gain",
            Self::Gain2Decibel => "Gain2Decibel",
            Self::SubtractFromOne => "SubtractFromOne",
            Self::DryAmount => "DryAmount",
            Self::WetAmount => "WetAmount",
        }
    }

    /// Looks up a converter by identifier (exact match).
    ///
    /// # Example
    ///
    /// ```rust
    /// use nodewire_core::ConverterKind;
    ///
    /// assert_eq!(ConverterKind::from_id("DryAmount"), Some(ConverterKind::DryAmount));
    /// assert_eq!(ConverterKind::from_id("Frequency2Time"), None);
    /// ```
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.id() == id)
    }
}

/// The range-mapping part of a conversion, resolved at build time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RangeStage {
    /// Identity range, not inverted: the input passes through unchanged.
    Passthrough,
    /// Identity range, inverted: `1 - x`.
    Inverted,
    /// Any other range.
    Mapped {
        /// Target range.
        range: ParameterRange,
        /// Replace `x` with `1 - x` before mapping.
        inverted: bool,
    },
}

impl RangeStage {
    /// Resolves a range and invert flag, detecting the identity fast path.
    pub fn new(range: ParameterRange, inverted: bool) -> Self {
        match (range.is_identity(), inverted) {
            (true, false) => Self::Passthrough,
            (true, true) => Self::Inverted,
            (false, _) => Self::Mapped { range, inverted },
        }
    }

    /// Applies the stage to a normalized value.
    #[inline]
    pub fn apply(&self, normalized: f64) -> f64 {
        match *self {
            Self::Passthrough => normalized,
            Self::Inverted => 1.0 - normalized,
            Self::Mapped { range, inverted } => {
                let p = if inverted { 1.0 - normalized } else { normalized };
                range.convert_from_0_to_1(p)
            }
        }
    }
}

/// Maps a normalized value onto `range`, optionally inverting it first.
///
/// The identity range skips the range math entirely: the input (or `1 - x`)
/// is returned unchanged, without clamping.
///
/// # Example
///
/// ```rust
/// use nodewire_core::{ParameterRange, map_normalized};
///
/// assert_eq!(map_normalized(ParameterRange::IDENTITY, false, 0.3), 0.3);
/// assert_eq!(map_normalized(ParameterRange::IDENTITY, true, 0.25), 0.75);
/// assert_eq!(map_normalized(ParameterRange::new(0.0, 10.0), true, 0.25), 7.5);
/// ```
#[inline]
pub fn map_normalized(range: ParameterRange, inverted: bool, normalized: f64) -> f64 {
    RangeStage::new(range, inverted).apply(normalized)
}

/// A converter resolved once at bind time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConversionStage {
    /// Plain range mapping.
    Range(RangeStage),
    /// `10^(x / 20)`.
    DecibelToGain,
    /// `20 * log10(x)`.
    GainToDecibel,
    /// `clamp(1 - x, 0, 1)` through a non-inverted range stage.
    SubtractFromOne(RangeStage),
    /// `gain_to_decibels(clamp(1 - x, 0, 1))`.
    DryAmount,
    /// `gain_to_decibels(x)`.
    WetAmount,
}

impl ConversionStage {
    /// Resolves a converter kind with its range and invert flag.
    ///
    /// Gain/decibel and amount converters ignore `range` and `inverted`.
    /// `SubtractFromOne` ignores `inverted`: the subtraction is the inversion.
    pub fn build(kind: ConverterKind, range: ParameterRange, inverted: bool) -> Self {
        match kind {
            ConverterKind::Identity => Self::Range(RangeStage::new(range, inverted)),
            ConverterKind::Decibel2Gain => Self::DecibelToGain,
            ConverterKind::Gain2Decibel => Self::GainToDecibel,
            ConverterKind::SubtractFromOne => Self::SubtractFromOne(RangeStage::new(range, false)),
            ConverterKind::DryAmount => Self::DryAmount,
            ConverterKind::WetAmount => Self::WetAmount,
        }
    }

    /// Resolves a converter by identifier.
    ///
    /// Unknown identifiers fall back to plain range mapping; this never fails.
    pub fn from_id(id: &str, range: ParameterRange, inverted: bool) -> Self {
        match ConverterKind::from_id(id) {
            Some(kind) => Self::build(kind, range, inverted),
            None => {
                #[cfg(feature = "tracing")]
                tracing::debug!("converter: unknown id '{id}', using range mapping");
                Self::Range(RangeStage::new(range, inverted))
            }
        }
    }

    /// Converts a control value.
    #[inline]
    pub fn convert(&self, value: f64) -> f64 {
        match self {
            Self::Range(stage) => stage.apply(value),
            Self::DecibelToGain => decibels_to_gain(value),
            Self::GainToDecibel => gain_to_decibels(value),
            Self::SubtractFromOne(stage) => stage.apply((1.0 - value).clamp(0.0, 1.0)),
            Self::DryAmount => gain_to_decibels((1.0 - value).clamp(0.0, 1.0)),
            Self::WetAmount => gain_to_decibels(value),
        }
    }

    /// Returns true if the stage forwards its input untouched.
    #[inline]
    pub fn is_passthrough(&self) -> bool {
        matches!(self, Self::Range(RangeStage::Passthrough))
    }
}

impl Default for ConversionStage {
    fn default() -> Self {
        Self::Range(RangeStage::Passthrough)
    }
}
