//! Multichannel sample storage and non-owning views into it.
//!
//! The host owns a [`SampleStore`] and sizes it during setup with
//! [`ensure_capacity`]. For every audio block it hands nodes a [`BufferView`]:
//! a borrowed window over some channels and samples of that store. Views never
//! own or copy samples, so a fixed-shape node can process into a larger or
//! smaller host buffer without knowing its layout.
//!
//! # Clamping
//!
//! [`BufferView::refer_to`], [`BufferView::copy_into`] and
//! [`SampleStore::view_range`] truncate the requested shape to what the store
//! actually has. They never fail.
//!
//! # Aliasing
//!
//! In-place processing hands a child node a shorter-lived view of the same
//! region via [`BufferView::reborrow`]. The borrow checker guarantees that only
//! one writer touches a region at a time and that no view outlives its store.

#[cfg(not(feature = "std"))]
use alloc::vec;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use core::fmt;
use core::ops::AddAssign;

use crate::math::channel_peak;

/// Host-owned multichannel sample storage.
///
/// Every channel holds exactly [`num_samples`](Self::num_samples) samples.
/// Capacity only grows implicitly; see [`ensure_capacity`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleStore {
    channels: Vec<Vec<f32>>,
    num_samples: usize,
}

impl SampleStore {
    /// Creates a zeroed store with the given shape.
    pub fn new(num_channels: usize, num_samples: usize) -> Self {
        Self {
            channels: vec![vec![0.0; num_samples]; num_channels],
            num_samples,
        }
    }

    /// Returns the number of channels.
    #[inline]
    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    /// Returns the number of samples per channel.
    #[inline]
    pub fn num_samples(&self) -> usize {
        self.num_samples
    }

    /// Returns the samples of channel `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= num_channels()`.
    #[inline]
    pub fn channel(&self, index: usize) -> &[f32] {
        &self.channels[index]
    }

    /// Returns the samples of channel `index` mutably.
    ///
    /// # Panics
    ///
    /// Panics if `index >= num_channels()`.
    #[inline]
    pub fn channel_mut(&mut self, index: usize) -> &mut [f32] {
        &mut self.channels[index]
    }

    /// Fills every channel with zeros.
    pub fn clear(&mut self) {
        for channel in &mut self.channels {
            channel.fill(0.0);
        }
    }

    /// Grows the store to at least `num_channels` × `num_samples`.
    ///
    /// See [`ensure_capacity`].
    pub fn ensure_capacity(&mut self, num_channels: usize, num_samples: usize) {
        let target_samples = self.num_samples.max(num_samples);
        let target_channels = self.channels.len().max(num_channels);

        if target_samples == self.num_samples && target_channels == self.channels.len() {
            return;
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            "sample_store grow: {}x{} -> {}x{}",
            self.channels.len(),
            self.num_samples,
            target_channels,
            target_samples
        );

        if target_samples > self.num_samples {
            for channel in &mut self.channels {
                channel.resize(target_samples, 0.0);
            }
            self.num_samples = target_samples;
        }
        self.channels
            .resize_with(target_channels, || vec![0.0; target_samples]);
    }

    /// Returns a view over the whole store.
    pub fn view(&mut self) -> BufferView<'_> {
        BufferView {
            num_samples: self.num_samples,
            channels: &mut self.channels,
        }
    }

    /// Returns a view over `num_channels` channels starting at `channel_offset`.
    ///
    /// Channel and sample counts are clamped to what the store holds. An offset
    /// past the last channel is a caller bug (debug-asserted) and yields a
    /// view with zero channels in release builds.
    pub fn view_range(
        &mut self,
        channel_offset: usize,
        num_channels: usize,
        num_samples: usize,
    ) -> BufferView<'_> {
        debug_assert!(
            channel_offset <= self.channels.len(),
            "channel offset {channel_offset} past {} channels",
            self.channels.len()
        );
        let start = channel_offset.min(self.channels.len());
        let count = num_channels.min(self.channels.len() - start);
        BufferView {
            num_samples: num_samples.min(self.num_samples),
            channels: &mut self.channels[start..start + count],
        }
    }
}

/// Grows `store` so it holds at least `num_channels` channels of at least
/// `num_samples` samples each.
///
/// Never shrinks; a no-op when the store is already large enough. New samples
/// are zeroed.
///
/// This may reallocate. Call it from setup or resize handlers, never from the
/// audio callback.
///
/// # Example
///
/// ```rust
/// use nodewire_core::{SampleStore, ensure_capacity};
///
/// let mut store = SampleStore::new(2, 128);
/// ensure_capacity(&mut store, 4, 64);
/// assert_eq!(store.num_channels(), 4);
/// assert_eq!(store.num_samples(), 128);
/// ```
pub fn ensure_capacity(store: &mut SampleStore, num_channels: usize, num_samples: usize) {
    store.ensure_capacity(num_channels, num_samples);
}

/// Non-owning read/write window over multichannel samples.
///
/// A view covers a contiguous run of channels and the first
/// [`num_samples`](Self::num_samples) samples of each. It is created per block,
/// passed to a node's process call, and dropped when the call returns.
pub struct BufferView<'a> {
    channels: &'a mut [Vec<f32>],
    num_samples: usize,
}

impl<'a> BufferView<'a> {
    /// Creates a view over raw channel storage.
    ///
    /// `num_samples` is clamped to the shortest channel.
    pub fn from_channels(channels: &'a mut [Vec<f32>], num_samples: usize) -> Self {
        let shortest = channels.iter().map(Vec::len).min().unwrap_or(0);
        Self {
            num_samples: num_samples.min(shortest),
            channels,
        }
    }

    /// Returns the number of channels.
    #[inline]
    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    /// Returns the number of samples per channel.
    #[inline]
    pub fn num_samples(&self) -> usize {
        self.num_samples
    }

    /// Returns true if the view covers no samples.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty() || self.num_samples == 0
    }

    /// Returns the samples of channel `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= num_channels()`.
    #[inline]
    pub fn channel(&self, index: usize) -> &[f32] {
        &self.channels[index][..self.num_samples]
    }

    /// Returns the samples of channel `index` mutably.
    ///
    /// # Panics
    ///
    /// Panics if `index >= num_channels()`.
    #[inline]
    pub fn channel_mut(&mut self, index: usize) -> &mut [f32] {
        &mut self.channels[index][..self.num_samples]
    }

    /// Iterates over the channels of the view.
    pub fn channels(&self) -> impl Iterator<Item = &[f32]> {
        let n = self.num_samples;
        self.channels.iter().map(move |c| &c[..n])
    }

    /// Iterates mutably over the channels of the view.
    pub fn channels_mut(&mut self) -> impl Iterator<Item = &mut [f32]> {
        let n = self.num_samples;
        self.channels.iter_mut().map(move |c| &mut c[..n])
    }

    /// Returns a shorter-lived view of the same region.
    ///
    /// Used for in-place processing: the child view aliases this one's
    /// samples, and this view is usable again once the child is dropped.
    #[inline]
    pub fn reborrow(&mut self) -> BufferView<'_> {
        BufferView {
            channels: &mut *self.channels,
            num_samples: self.num_samples,
        }
    }

    /// Returns a view into `store` with this view's shape, starting at
    /// `channel_offset`.
    ///
    /// The result covers `min(store channels - offset, self channels)` channels
    /// and `min(store samples, self samples)` samples. No samples are copied.
    pub fn refer_to<'b>(
        &self,
        store: &'b mut SampleStore,
        channel_offset: usize,
    ) -> BufferView<'b> {
        store.view_range(channel_offset, self.num_channels(), self.num_samples)
    }

    /// Copies this view's samples into `store` at `channel_offset`, then
    /// returns a view over the destination region.
    ///
    /// Each copied channel receives `min(store samples, self samples)` samples.
    /// Destination channels past the copied range are left untouched.
    pub fn copy_into<'b>(
        &self,
        store: &'b mut SampleStore,
        channel_offset: usize,
    ) -> BufferView<'b> {
        let start = channel_offset.min(store.num_channels());
        let len = store.num_samples().min(self.num_samples);
        for (dst, src) in store.channels[start..].iter_mut().zip(self.channels()) {
            dst[..len].copy_from_slice(&src[..len]);
        }
        self.refer_to(store, channel_offset)
    }

    /// Adds `other` into this view, sample by sample.
    ///
    /// Both views must have the same shape. A mismatch is a caller bug; debug
    /// builds assert, release builds only touch the overlapping region.
    pub fn accumulate(&mut self, other: &BufferView<'_>) {
        debug_assert_eq!(
            self.num_channels(),
            other.num_channels(),
            "accumulate: channel count mismatch"
        );
        debug_assert_eq!(
            self.num_samples, other.num_samples,
            "accumulate: sample count mismatch"
        );
        for (dst, src) in self.channels_mut().zip(other.channels()) {
            for (d, s) in dst.iter_mut().zip(src) {
                *d += *s;
            }
        }
    }

    /// Largest absolute sample value across all channels.
    ///
    /// Returns `0.0` for a view with no channels or no samples.
    pub fn peak_magnitude(&self) -> f32 {
        self.channels().map(channel_peak).fold(0.0, f32::max)
    }

    /// Fills the view with zeros.
    pub fn clear(&mut self) {
        for channel in self.channels_mut() {
            channel.fill(0.0);
        }
    }

    /// Multiplies every sample by `gain`.
    pub fn apply_gain(&mut self, gain: f32) {
        for channel in self.channels_mut() {
            for s in channel.iter_mut() {
                *s *= gain;
            }
        }
    }
}

impl AddAssign<&BufferView<'_>> for BufferView<'_> {
    #[inline]
    fn add_assign(&mut self, other: &BufferView<'_>) {
        self.accumulate(other);
    }
}

impl fmt::Debug for BufferView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BufferView")
            .field("num_channels", &self.num_channels())
            .field("num_samples", &self.num_samples)
            .finish()
    }
}
