//! Level conversions and metering helpers.
//!
//! # Level Conversions
//!
//! - [`decibels_to_gain`] / [`gain_to_decibels`] - Convert between dB and linear gain
//!
//! Both conversions treat [`MINUS_INFINITY_DB`] as silence, so every value they
//! return is finite. That keeps converter outputs safe to hand straight to a
//! smoothed parameter or a multiplication in the audio path.
//!
//! # Metering
//!
//! - [`channel_peak`] - Largest absolute sample of one channel
//! - [`channel_rms`] - Root-mean-square level of one channel

/// Level treated as silence, in decibels.
pub const MINUS_INFINITY_DB: f64 = -100.0;

/// Convert decibels to linear gain.
///
/// Values at or below [`MINUS_INFINITY_DB`] return `0.0`.
///
/// # Example
/// ```rust
/// use nodewire_core::decibels_to_gain;
///
/// assert!((decibels_to_gain(0.0) - 1.0).abs() < 1e-12);
/// assert!((decibels_to_gain(-6.0206) - 0.5).abs() < 1e-4);
/// assert_eq!(decibels_to_gain(-120.0), 0.0);
/// ```
#[inline]
pub fn decibels_to_gain(db: f64) -> f64 {
    if db > MINUS_INFINITY_DB {
        // 10^(dB/20)
        libm::pow(10.0, db * 0.05)
    } else {
        0.0
    }
}

/// Convert linear gain to decibels.
///
/// Non-positive gains return [`MINUS_INFINITY_DB`], and the result never drops
/// below it.
///
/// # Example
/// ```rust
/// use nodewire_core::{gain_to_decibels, MINUS_INFINITY_DB};
///
/// assert!(gain_to_decibels(1.0).abs() < 1e-12);
/// assert!((gain_to_decibels(0.5) - (-6.0206)).abs() < 1e-4);
/// assert_eq!(gain_to_decibels(0.0), MINUS_INFINITY_DB);
/// ```
#[inline]
pub fn gain_to_decibels(gain: f64) -> f64 {
    if gain > 0.0 {
        (20.0 * libm::log10(gain)).max(MINUS_INFINITY_DB)
    } else {
        MINUS_INFINITY_DB
    }
}

/// Largest absolute sample value of a channel.
///
/// Finds the minimum and maximum sample and returns the larger of their
/// magnitudes. An empty slice returns `0.0`.
///
/// # Example
/// ```rust
/// use nodewire_core::channel_peak;
///
/// assert_eq!(channel_peak(&[-0.5, 0.3, 0.9, -0.95]), 0.95);
/// assert_eq!(channel_peak(&[]), 0.0);
/// ```
#[inline]
pub fn channel_peak(samples: &[f32]) -> f32 {
    let Some((&first, rest)) = samples.split_first() else {
        return 0.0;
    };
    let (min, max) = rest
        .iter()
        .fold((first, first), |(lo, hi), &s| (lo.min(s), hi.max(s)));
    min.abs().max(max.abs())
}

/// Root-mean-square level of a channel. An empty slice returns `0.0`.
#[inline]
pub fn channel_rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum_sq: f32 = samples.iter().map(|&s| s * s).sum();
    libm::sqrtf(sum_sq / samples.len() as f32)
}
