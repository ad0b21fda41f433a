//! Fractional read kernels for circular buffers.
//!
//! Every kernel takes a [`ReadPosition`] (integer base index plus fraction)
//! and reads its neighbours with circular indexing, so the base index may sit
//! anywhere in the buffer including slot 0 (whose predecessor is the last
//! slot).
//!
//! | Mode | Taps | Character |
//! |------|------|-----------|
//! | [`Interpolation::Linear`] | base, base+1 | Cheapest, mild HF loss |
//! | [`Interpolation::Quadratic`] | base-1 .. base+1 | Parabolic fit, range-limited |
//! | [`Interpolation::Cubic`] | base-1 .. base+2 | Catmull-Rom, smoothest |

use libm::floorf;

/// Below this magnitude the quadratic kernel's curvature term is treated as
/// zero and the read falls back to linear interpolation.
pub const QUADRATIC_EPSILON: f32 = 1e-6;

/// Interpolation kernel used for fractional delay reads.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Interpolation {
    /// Two-point linear interpolation.
    #[default]
    Linear,
    /// Three-point parabolic fit.
    Quadratic,
    /// Four-point Catmull-Rom spline.
    Cubic,
}

impl Interpolation {
    /// All modes in selector order.
    pub const ALL: [Interpolation; 3] = [
        Interpolation::Linear,
        Interpolation::Quadratic,
        Interpolation::Cubic,
    ];

    /// Display labels in selector order.
    pub const LABELS: &'static [&'static str] = &["Linear", "Quadratic", "Cubic"];

    /// Maps a selector index to a mode. Unknown indices fall back to
    /// [`Interpolation::Linear`] rather than muting the wet path.
    pub fn from_index(index: u8) -> Self {
        match index {
            1 => Interpolation::Quadratic,
            2 => Interpolation::Cubic,
            _ => Interpolation::Linear,
        }
    }

    /// Selector index of this mode.
    pub const fn index(self) -> u8 {
        match self {
            Interpolation::Linear => 0,
            Interpolation::Quadratic => 1,
            Interpolation::Cubic => 2,
        }
    }

    /// Human-readable name.
    pub const fn label(self) -> &'static str {
        match self {
            Interpolation::Linear => "Linear",
            Interpolation::Quadratic => "Quadratic",
            Interpolation::Cubic => "Cubic",
        }
    }

    /// Parses a case-insensitive mode name (`"linear"`, `"quad"`, `"cubic"`, ...).
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        [
            ("linear", Interpolation::Linear),
            ("lin", Interpolation::Linear),
            ("quadratic", Interpolation::Quadratic),
            ("quad", Interpolation::Quadratic),
            ("cubic", Interpolation::Cubic),
            ("cub", Interpolation::Cubic),
        ]
        .into_iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, mode)| mode)
    }
}

/// A fractional position inside a circular buffer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReadPosition {
    /// Integer part, always `< capacity`.
    pub index: usize,
    /// Fractional part in `[0, 1)`.
    pub frac: f32,
}

impl ReadPosition {
    /// Splits a position already wrapped into `[0, capacity)`.
    ///
    /// The integer part is reduced modulo `capacity` once more so rounding at
    /// the top edge can never produce an out-of-range index.
    #[inline]
    pub fn split(position: f32, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let floor = floorf(position);
        let frac = position - floor;
        Self {
            index: (floor.max(0.0) as usize) % capacity,
            frac: if frac < 1.0 { frac } else { 0.0 },
        }
    }
}

/// Reads `buffer` at `pos` with the given kernel.
///
/// Returns 0.0 for an empty buffer.
#[inline]
pub fn interpolate(buffer: &[f32], pos: ReadPosition, mode: Interpolation) -> f32 {
    if buffer.is_empty() {
        return 0.0;
    }
    match mode {
        Interpolation::Linear => linear(buffer, pos),
        Interpolation::Quadratic => quadratic(buffer, pos),
        Interpolation::Cubic => cubic(buffer, pos),
    }
}

#[inline]
fn tap(buffer: &[f32], index: usize, offset: isize) -> f32 {
    let len = buffer.len() as isize;
    let i = (index as isize + offset).rem_euclid(len);
    buffer[i as usize]
}

/// Two-point linear interpolation: `frac * next + (1 - frac) * base`.
#[inline]
pub fn linear(buffer: &[f32], pos: ReadPosition) -> f32 {
    let base = tap(buffer, pos.index, 0);
    let next = tap(buffer, pos.index, 1);
    pos.frac * next + (1.0 - pos.frac) * base
}

/// Three-point parabolic interpolation over `base-1`, `base`, `base+1`.
///
/// The fit divides by the second difference `s0 - 2*s1 + s2`, which vanishes
/// whenever the three taps are collinear (silence, DC, straight ramps). Those
/// reads fall back to [`linear`], as does any non-finite result.
///
/// Near-collinear taps make the fit arbitrarily steep, so the result is
/// limited to the range spanned by the three taps. The kernel therefore never
/// amplifies, which keeps a feedback loop with `|g| < 1` bounded.
#[inline]
pub fn quadratic(buffer: &[f32], pos: ReadPosition) -> f32 {
    let s0 = tap(buffer, pos.index, -1);
    let s1 = tap(buffer, pos.index, 0);
    let s2 = tap(buffer, pos.index, 1);

    let curvature = s0 - 2.0 * s1 + s2;
    if curvature.abs() < QUADRATIC_EPSILON {
        return linear(buffer, pos);
    }

    let slope = 0.5 * (s0 - s2);
    let vertex = slope / curvature;
    let value = s1 - 0.25 * pos.frac * vertex * (s0 - s2);

    if !value.is_finite() {
        return linear(buffer, pos);
    }

    let lo = s0.min(s1).min(s2);
    let hi = s0.max(s1).max(s2);
    value.max(lo).min(hi)
}

/// Four-point Catmull-Rom spline over `base-1` .. `base+2`.
///
/// Passes exactly through `base` at `frac = 0` and through `base+1` as
/// `frac → 1`.
#[inline]
pub fn cubic(buffer: &[f32], pos: ReadPosition) -> f32 {
    let s0 = tap(buffer, pos.index, -1);
    let s1 = tap(buffer, pos.index, 0);
    let s2 = tap(buffer, pos.index, 1);
    let s3 = tap(buffer, pos.index, 2);

    let t = pos.frac;
    let t2 = t * t;

    let a0 = -0.5 * s0 + 1.5 * s1 - 1.5 * s2 + 0.5 * s3;
    let a1 = s0 - 2.5 * s1 + 2.0 * s2 - 0.5 * s3;
    let a2 = -0.5 * s0 + 0.5 * s2;

    a0 * t * t2 + a1 * t2 + a2 * t + s1
}
