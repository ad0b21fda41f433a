//! Lock-free parameter store shared between a control thread and the audio
//! thread.
//!
//! [`SharedParams`] keeps one `AtomicU32` per [`FlangerParam`], holding the
//! `f32` bit pattern of the value in natural units. The control side calls
//! [`set`](SharedParams::set); the audio side calls
//! [`snapshot`](SharedParams::snapshot) once per block and hands the result to
//! [`ModulatedDelayEngine::set_params`](crate::ModulatedDelayEngine::set_params).
//!
//! Every access uses `Ordering::Relaxed`. Each parameter is a single word, so a
//! reader sees either the old or the new value of any one parameter; a block
//! may pick up a mix of old and new values across parameters, which settles
//! on the next block.

use core::sync::atomic::{AtomicU32, Ordering};

use crate::param_info::ParameterInfo;
use crate::params::{FlangerParam, FlangerParams};

/// Atomic per-parameter mirror of a [`FlangerParams`].
///
/// # Example
///
/// ```rust
/// use sweep_core::{FlangerParam, SharedParams};
///
/// let shared = SharedParams::default();
/// shared.set(FlangerParam::Feedback.index(), 0.5);
/// let params = shared.snapshot();
/// assert_eq!(params.feedback(), 0.5);
/// ```
#[derive(Debug)]
pub struct SharedParams {
    values: [AtomicU32; FlangerParam::COUNT],
}

impl Default for SharedParams {
    fn default() -> Self {
        Self::new(&FlangerParams::default())
    }
}

impl SharedParams {
    /// Creates a store initialized from `params`.
    pub fn new(params: &FlangerParams) -> Self {
        Self {
            values: core::array::from_fn(|i| AtomicU32::new(params.get_param(i).to_bits())),
        }
    }

    /// Stores a value in natural units. Unknown indices are ignored.
    ///
    /// The value is kept as given; clamping happens when a snapshot is taken.
    pub fn set(&self, index: usize, value: f32) {
        if let Some(slot) = self.values.get(index) {
            slot.store(value.to_bits(), Ordering::Relaxed);
        }
    }

    /// Last stored value, `0.0` for unknown indices.
    pub fn get(&self, index: usize) -> f32 {
        self.values
            .get(index)
            .map_or(0.0, |slot| f32::from_bits(slot.load(Ordering::Relaxed)))
    }

    /// Publishes every field of `params`.
    pub fn store(&self, params: &FlangerParams) {
        for (i, slot) in self.values.iter().enumerate() {
            slot.store(params.get_param(i).to_bits(), Ordering::Relaxed);
        }
    }

    /// Reads every parameter into `params`, clamping through its setters.
    pub fn load_into(&self, params: &mut FlangerParams) {
        for (i, slot) in self.values.iter().enumerate() {
            params.set_param(i, f32::from_bits(slot.load(Ordering::Relaxed)));
        }
    }

    /// Builds a fresh, clamped parameter record from the stored values.
    pub fn snapshot(&self) -> FlangerParams {
        let mut params = FlangerParams::default();
        self.load_into(&mut params);
        params
    }
}
