//! Nodewire Core - buffer views and parameter conversion for DSP graphs
//!
//! This crate provides the two primitives every node in a nodewire processing
//! graph depends on. Both are designed for real-time audio: nothing in the
//! per-block path allocates, locks, or returns an error.
//!
//! # Core Abstractions
//!
//! ## Buffer Views
//!
//! - [`SampleStore`] - Host-owned, resizable multichannel sample storage
//! - [`BufferView`] - Non-owning window over a channel/sample range of a store
//! - [`ensure_capacity`] - Grow a store ahead of processing (never shrinks)
//!
//! ## Parameter Conversion
//!
//! - [`ParameterRange`] - Normalized ↔ physical range mapping with skew
//! - [`ConverterKind`] - Named conversion (`Identity`, `Decibel2Gain`, ...)
//! - [`ConversionStage`] - A converter resolved once at bind time
//! - [`ParameterCallback`] - A stage paired with the destination setter
//!
//! ## Utilities
//!
//! - Level conversions: [`decibels_to_gain`], [`gain_to_decibels`]
//! - Metering: [`channel_peak`], [`channel_rms`]
//!
//! # Example
//!
//! ```rust
//! use nodewire_core::{ConverterKind, ParameterRange, SampleStore, pipeline};
//!
//! // The host owns the storage and sizes it outside the audio thread.
//! let mut store = SampleStore::new(2, 64);
//! store.ensure_capacity(2, 256);
//!
//! // Each block, nodes receive a view instead of the store itself.
//! let mut view = store.view();
//! view.apply_gain(0.5);
//! assert_eq!(view.peak_magnitude(), 0.0);
//!
//! // Parameters are compiled once, then called on every control change.
//! let mut cutoff = 0.0;
//! let mut callback = pipeline::build(
//!     ConverterKind::Identity,
//!     ParameterRange::new(20.0, 20_000.0),
//!     false,
//!     |hz| cutoff = hz,
//! );
//! callback.call(1.0);
//! drop(callback);
//! assert_eq!(cutoff, 20_000.0);
//! ```
//!
//! # no_std Support
//!
//! Disable the default `std` feature to use the crate on embedded targets.
//! [`SampleStore`] needs `alloc`; everything else is allocation-free.
//!
//! # Design Principles
//!
//! - **Real-time safe**: only [`ensure_capacity`] may allocate
//! - **Clamp, don't fail**: out-of-range views and amounts are truncated
//! - **Build once, call many**: converter dispatch is a single `match`

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod buffer;
pub mod converter;
pub mod math;
pub mod pipeline;
pub mod range;

pub use buffer::{BufferView, SampleStore, ensure_capacity};
pub use converter::{ConversionStage, ConverterKind, RangeStage, map_normalized};
pub use math::{MINUS_INFINITY_DB, channel_peak, channel_rms, decibels_to_gain, gain_to_decibels};
pub use pipeline::ParameterCallback;
pub use range::ParameterRange;
