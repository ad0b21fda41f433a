//! Sweep Core - modulated delay-line DSP for flanger and chorus effects
//!
//! This crate holds the real-time half of sweep: a circular delay buffer read
//! at a position swept by a low-frequency oscillator, reconstructed with one of
//! three interpolation kernels and fed back into itself.
//!
//! # Building Blocks
//!
//! - [`DelayLine`] - per-channel circular history with fractional reads
//! - [`Interpolation`] - linear, quadratic and Catmull-Rom cubic kernels
//! - [`Lfo`] / [`LfoWaveform`] - phase accumulator and unipolar waveforms
//! - [`FlangerParams`] - clamped, strongly-typed control record
//! - [`ParameterInfo`] - index-based parameter access for control surfaces
//! - [`SharedParams`] - lock-free parameter store for a control thread
//! - [`ModulatedDelayEngine`] - the multi-channel processor
//!
//! # no_std Support
//!
//! Disable the default `std` feature for embedded targets:
//!
//! ```toml
//! [dependencies]
//! sweep-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Example
//!
//! ```rust
//! use sweep_core::{FlangerParams, Interpolation, LfoWaveform, ModulatedDelayEngine};
//!
//! let params = FlangerParams::default()
//!     .with_rate(0.5)
//!     .with_feedback(0.7)
//!     .with_waveform(LfoWaveform::Triangle)
//!     .with_interpolation(Interpolation::Cubic);
//!
//! let mut engine = ModulatedDelayEngine::with_params(48000.0, 1, params);
//! let mut block = vec![0.0f32; 512];
//! block[0] = 1.0;
//! engine.process_in_place(&mut [&mut block]);
//! ```
//!
//! # Design Principles
//!
//! - **Real-time safe**: no allocation, locking or logging while processing
//! - **Never fails**: out-of-range inputs are clamped, not reported
//! - **Block-size invariant**: output does not depend on how a stream is split

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod delay;
pub mod engine;
pub mod interpolation;
pub mod lfo;
pub mod math;
pub mod param_info;
pub mod params;
pub mod shared;

pub use delay::{DelayLine, GUARD_SAMPLES, capacity_for};
pub use engine::{
    DEFAULT_MAX_BLOCK_SIZE, MIN_DELAY_SAMPLES, ModulatedDelayEngine, STEREO_PHASE_OFFSET,
};
pub use interpolation::{Interpolation, QUADRATIC_EPSILON, ReadPosition, interpolate};
pub use lfo::{Lfo, LfoWaveform, MAX_PHASE_INCREMENT};
pub use math::{crossfade_gains, floored_mod, flush_denormal, wrap_phase};
pub use param_info::{ParamDescriptor, ParamFlags, ParamId, ParamScale, ParamUnit, ParameterInfo};
pub use params::{
    FlangerParam, FlangerParams, MAX_DELAY_SECONDS, MAX_FEEDBACK, MAX_RATE_HZ, MAX_SWEEP_SECONDS,
    MAX_TOTAL_DELAY_SECONDS, STEREO_LABELS,
};
pub use shared::SharedParams;
