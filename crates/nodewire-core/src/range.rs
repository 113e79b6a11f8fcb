//! Normalized ↔ physical range mapping.
//!
//! A [`ParameterRange`] maps a normalized control position in \[0.0, 1.0\] onto
//! `[min, max]`. The `skew` factor shapes the response:
//!
//! - `skew == 1.0` → linear
//! - `skew < 1.0` → more resolution at the low end (frequencies, times)
//! - `skew > 1.0` → more resolution at the high end
//!
//! With `symmetric_skew` the curve is applied outward from the centre of the
//! range instead of from `min`, which suits bipolar controls such as pan.
//!
//! # Formulas
//!
//! - **From 0..1**: `min + (max - min) * p^(1 / skew)`
//! - **To 0..1**: `((v - min) / (max - min))^skew`
//!
//! Reference: JUCE `NormalisableRange`.

/// A physical parameter range with skew.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterRange {
    /// Value produced by normalized `0.0`.
    pub min: f64,
    /// Value produced by normalized `1.0`.
    pub max: f64,
    /// Shaping exponent. Must be positive; `1.0` is linear.
    pub skew: f64,
    /// Apply the skew outward from the centre of the range.
    pub symmetric_skew: bool,
}

impl ParameterRange {
    /// The identity range: `[0, 1]`, linear.
    pub const IDENTITY: Self = Self {
        min: 0.0,
        max: 1.0,
        skew: 1.0,
        symmetric_skew: false,
    };

    /// Creates a linear range.
    pub const fn new(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            skew: 1.0,
            symmetric_skew: false,
        }
    }

    /// Sets the skew factor.
    pub const fn with_skew(mut self, skew: f64) -> Self {
        self.skew = skew;
        self
    }

    /// Enables or disables symmetric skew.
    pub const fn with_symmetric_skew(mut self, symmetric: bool) -> Self {
        self.symmetric_skew = symmetric;
        self
    }

    /// Creates a range whose normalized midpoint maps to `centre`.
    ///
    /// `centre` must lie strictly between `min` and `max`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use nodewire_core::ParameterRange;
    ///
    /// let cutoff = ParameterRange::with_centre_skew(20.0, 20_000.0, 1_000.0);
    /// assert!((cutoff.convert_from_0_to_1(0.5) - 1_000.0).abs() < 1e-6);
    /// ```
    pub fn with_centre_skew(min: f64, max: f64, centre: f64) -> Self {
        let skew = libm::log(0.5) / libm::log((centre - min) / (max - min));
        Self::new(min, max).with_skew(skew)
    }

    /// Returns true for the `[0, 1]` linear range, which maps every value to
    /// itself.
    #[inline]
    pub fn is_identity(&self) -> bool {
        self.min == 0.0 && self.max == 1.0 && self.skew == 1.0 && !self.symmetric_skew
    }

    /// Returns `max - min`.
    #[inline]
    pub fn length(&self) -> f64 {
        self.max - self.min
    }

    /// Maps a normalized value onto the range.
    ///
    /// The input is clamped to \[0.0, 1.0\] first.
    ///
    /// # Example
    ///
    /// ```rust
    /// use nodewire_core::ParameterRange;
    ///
    /// let range = ParameterRange::new(-60.0, 12.0);
    /// assert_eq!(range.convert_from_0_to_1(0.0), -60.0);
    /// assert_eq!(range.convert_from_0_to_1(1.0), 12.0);
    /// assert_eq!(range.convert_from_0_to_1(2.0), 12.0);
    /// ```
    #[inline]
    pub fn convert_from_0_to_1(&self, proportion: f64) -> f64 {
        let mut proportion = proportion.clamp(0.0, 1.0);

        if !self.symmetric_skew {
            if self.skew != 1.0 && proportion > 0.0 {
                proportion = libm::exp(libm::log(proportion) / self.skew);
            }
            return self.min + self.length() * proportion;
        }

        let mut distance = 2.0 * proportion - 1.0;
        if self.skew != 1.0 && distance != 0.0 {
            let magnitude = libm::exp(libm::log(distance.abs()) / self.skew);
            distance = if distance < 0.0 { -magnitude } else { magnitude };
        }
        self.min + self.length() / 2.0 * (1.0 + distance)
    }

    /// Maps a value in the range back to \[0.0, 1.0\].
    ///
    /// Inverse of [`convert_from_0_to_1`](Self::convert_from_0_to_1). Values
    /// outside the range clamp; a zero-width range returns `0.0`.
    #[inline]
    pub fn convert_to_0_to_1(&self, value: f64) -> f64 {
        let length = self.length();
        if length == 0.0 {
            return 0.0;
        }
        let proportion = ((value - self.min) / length).clamp(0.0, 1.0);

        if self.skew == 1.0 {
            return proportion;
        }
        if !self.symmetric_skew {
            return libm::pow(proportion, self.skew);
        }

        let distance = 2.0 * proportion - 1.0;
        let shaped = libm::pow(distance.abs(), self.skew);
        let signed = if distance < 0.0 { -shaped } else { shaped };
        (1.0 + signed) / 2.0
    }
}

impl Default for ParameterRange {
    fn default() -> Self {
        Self::IDENTITY
    }
}
