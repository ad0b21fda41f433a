//! Small numeric helpers shared by the delay line, LFO and engine.
//!
//! All functions are allocation-free and `no_std` compatible.

use libm::floorf;

/// Flush denormal floats to zero.
///
/// Feedback paths decay towards zero forever; once a value drops into the
/// subnormal range some CPUs slow down dramatically. Anything below
/// `1e-20` is treated as silence.
///
/// # Example
/// ```rust
/// use sweep_core::flush_denormal;
///
/// assert_eq!(flush_denormal(1e-25), 0.0);
/// assert_eq!(flush_denormal(0.5), 0.5);
/// ```
#[inline]
pub fn flush_denormal(x: f32) -> f32 {
    if x.abs() < 1e-20 { 0.0 } else { x }
}

/// Floored modulo: wraps `x` into `[0, modulus)`.
///
/// Unlike `%`, negative inputs wrap to the top of the range
/// (`floored_mod(-0.25, 8.0) == 7.75`). `modulus` must be positive.
///
/// # Example
/// ```rust
/// use sweep_core::floored_mod;
///
/// assert_eq!(floored_mod(-0.25, 8.0), 7.75);
/// assert_eq!(floored_mod(9.5, 8.0), 1.5);
/// ```
#[inline]
pub fn floored_mod(x: f32, modulus: f32) -> f32 {
    let wrapped = x - modulus * floorf(x / modulus);
    // Rounding can land exactly on `modulus` for tiny negative inputs.
    if wrapped >= modulus { 0.0 } else { wrapped }
}

/// Wraps a phase that is known to be in `[0, 2)` back into `[0, 1)`.
///
/// Subtraction only; callers guarantee the increment that produced
/// `phase` was below one cycle.
#[inline]
pub fn wrap_phase(phase: f32) -> f32 {
    if phase >= 1.0 { phase - 1.0 } else { phase }
}

/// Dry and wet gains for a crossfade `mix` in `[0, 1]`.
///
/// The curve holds both gains at unity in the middle so that `mix = 0.5`
/// yields the classic flanger sum `dry + wet`:
///
/// | mix | dry | wet |
/// |-----|-----|-----|
/// | 0.0 | 1.0 | 0.0 |
/// | 0.5 | 1.0 | 1.0 |
/// | 1.0 | 0.0 | 1.0 |
///
/// # Example
/// ```rust
/// use sweep_core::crossfade_gains;
///
/// assert_eq!(crossfade_gains(0.5), (1.0, 1.0));
/// assert_eq!(crossfade_gains(0.0), (1.0, 0.0));
/// ```
#[inline]
pub fn crossfade_gains(mix: f32) -> (f32, f32) {
    let mix = mix.clamp(0.0, 1.0);
    let dry = (2.0 * (1.0 - mix)).min(1.0);
    let wet = (2.0 * mix).min(1.0);
    (dry, wet)
}
