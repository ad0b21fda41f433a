//! Circular delay buffer with fractional reads.
//!
//! [`DelayLine`] stores the recent input history of one channel. The write
//! cursor always points at the *next* slot to be written, so a read
//! `d` samples back resolves to `write_index - d (mod capacity)` and lands
//! strictly in the past for any `d >= 1`.
//!
//! # Sizing
//!
//! | Sample rate | 100 ms history | Capacity (with guard) |
//! |-------------|----------------|-----------------------|
//! | 44.1 kHz    | 4410 samples   | ~4415 |
//! | 48 kHz      | 4800 samples   | ~4805 |
//! | 96 kHz      | 9600 samples   | ~9605 |
//!
//! The buffer is allocated once in [`DelayLine::new`]; reads and writes never
//! allocate.

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

use alloc::vec;
use alloc::vec::Vec;
use libm::ceilf;

use crate::interpolation::{Interpolation, ReadPosition, interpolate};
use crate::math::floored_mod;

/// Extra slots beyond the longest requested delay.
///
/// The cubic kernel reads one tap before and two taps after its base index;
/// the guard keeps every tap of the longest delay clear of the slot about to
/// be overwritten.
pub const GUARD_SAMPLES: usize = 4;

/// Per-channel circular delay buffer.
///
/// # Example
///
/// ```rust
/// use sweep_core::{DelayLine, Interpolation};
///
/// let mut line = DelayLine::new(16);
/// line.write(1.0);
/// for _ in 0..3 {
///     line.write(0.0);
/// }
/// // The impulse was written 4 slots before the write cursor.
/// assert_eq!(line.read(4.0, Interpolation::Linear), 1.0);
/// assert_eq!(line.read(4.5, Interpolation::Linear), 0.5);
/// ```
#[derive(Debug, Clone)]
pub struct DelayLine {
    samples: Vec<f32>,
    write_index: usize,
}

impl DelayLine {
    /// Creates a silent delay line holding `capacity` samples.
    ///
    /// A zero capacity is clamped to one slot; circular indexing is undefined
    /// on an empty buffer.
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: vec![0.0; capacity.max(1)],
            write_index: 0,
        }
    }

    /// Creates a delay line long enough for `max_seconds` at `sample_rate`,
    /// plus [`GUARD_SAMPLES`].
    pub fn from_time(sample_rate: f32, max_seconds: f32) -> Self {
        Self::new(capacity_for(sample_rate, max_seconds))
    }

    /// Number of slots in the buffer.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.samples.len()
    }

    /// Slot that the next [`write`](Self::write) fills.
    #[inline]
    pub fn write_index(&self) -> usize {
        self.write_index
    }

    /// Moves the write cursor, wrapping into range.
    #[inline]
    pub fn set_write_index(&mut self, index: usize) {
        self.write_index = index % self.samples.len();
    }

    /// Resolves a delay in samples to a fractional read position.
    ///
    /// Uses floored modulo so that `write_index - delay` wraps to the top of
    /// the buffer when it goes negative.
    #[inline]
    pub fn read_position(&self, delay_samples: f32) -> ReadPosition {
        let capacity = self.samples.len();
        let position = floored_mod(self.write_index as f32 - delay_samples, capacity as f32);
        ReadPosition::split(position, capacity)
    }

    /// Reads `delay_samples` behind the write cursor with the given kernel.
    #[inline]
    pub fn read(&self, delay_samples: f32, mode: Interpolation) -> f32 {
        interpolate(&self.samples, self.read_position(delay_samples), mode)
    }

    /// Stores `sample` at the write cursor and advances it by one slot.
    #[inline]
    pub fn write(&mut self, sample: f32) {
        self.samples[self.write_index] = sample;
        self.write_index += 1;
        if self.write_index >= self.samples.len() {
            self.write_index = 0;
        }
    }

    /// Sample written `samples_ago + 1` writes back (0 = most recent write).
    pub fn recent(&self, samples_ago: usize) -> f32 {
        let capacity = self.samples.len();
        let back = samples_ago % capacity + 1;
        self.samples[(self.write_index + capacity - back) % capacity]
    }

    /// Raw buffer contents in slot order.
    pub fn as_slice(&self) -> &[f32] {
        &self.samples
    }

    /// Fills the buffer with silence and rewinds the write cursor.
    pub fn clear(&mut self) {
        self.samples.fill(0.0);
        self.write_index = 0;
    }
}

/// Buffer capacity required to hold `max_seconds` of history at
/// `sample_rate`, including [`GUARD_SAMPLES`]. Never less than one.
pub fn capacity_for(sample_rate: f32, max_seconds: f32) -> usize {
    let span = ceilf(sample_rate * max_seconds);
    let span = if span.is_finite() && span > 0.0 {
        span as usize
    } else {
        0
    };
    span.saturating_add(GUARD_SAMPLES).max(1)
}
