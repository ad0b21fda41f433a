//! Low Frequency Oscillator driving the delay sweep.
//!
//! Waveforms are *unipolar*: every shape maps a phase in `[0, 1)` to a
//! modulation value in `[0, 1]`, which the engine scales by the sweep width.
//!
//! | Waveform | Phase 0 | Phase 0.25 | Phase 0.5 | Phase 0.75 |
//! |----------|---------|------------|-----------|------------|
//! | Sine     | 0.5     | 1.0        | 0.5       | 0.0        |
//! | Triangle | 0.5     | 1.0        | 0.5       | 0.0        |
//! | Square   | 1.0     | 1.0        | 0.0       | 0.0        |
//! | Sawtooth | 0.5     | 0.75       | 0.0       | 0.25       |

use core::f32::consts::TAU;
use libm::{floorf, sinf};

use crate::math::wrap_phase;

/// Largest phase step the oscillator will take per sample.
///
/// Keeping the step below one cycle lets the accumulator wrap with a single
/// subtraction.
pub const MAX_PHASE_INCREMENT: f32 = 0.5;

/// LFO waveform shape.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LfoWaveform {
    /// `0.5 + 0.5 * sin(2π·phase)`
    #[default]
    Sine,
    /// Piecewise linear, peaks at phase 0.25, troughs at 0.75.
    Triangle,
    /// 1.0 for the first half cycle, 0.0 for the second. Not band-limited.
    Square,
    /// Rising ramp offset by half a cycle, resets at phase 0.5.
    Sawtooth,
}

impl LfoWaveform {
    /// All waveforms in selector order.
    pub const ALL: [LfoWaveform; 4] = [
        LfoWaveform::Sine,
        LfoWaveform::Triangle,
        LfoWaveform::Square,
        LfoWaveform::Sawtooth,
    ];

    /// Display labels in selector order.
    pub const LABELS: &'static [&'static str] = &["Sine", "Triangle", "Square", "Sawtooth"];

    /// Maps a selector index to a waveform. Unknown indices fall back to sine.
    pub fn from_index(index: u8) -> Self {
        match index {
            1 => LfoWaveform::Triangle,
            2 => LfoWaveform::Square,
            3 => LfoWaveform::Sawtooth,
            _ => LfoWaveform::Sine,
        }
    }

    /// Selector index of this waveform.
    pub const fn index(self) -> u8 {
        match self {
            LfoWaveform::Sine => 0,
            LfoWaveform::Triangle => 1,
            LfoWaveform::Square => 2,
            LfoWaveform::Sawtooth => 3,
        }
    }

    /// Human-readable name.
    pub const fn label(self) -> &'static str {
        match self {
            LfoWaveform::Sine => "Sine",
            LfoWaveform::Triangle => "Triangle",
            LfoWaveform::Square => "Square",
            LfoWaveform::Sawtooth => "Sawtooth",
        }
    }

    /// Parses a case-insensitive waveform name (`"sine"`, `"tri"`, `"saw"`, ...).
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        [
            ("sine", LfoWaveform::Sine),
            ("sin", LfoWaveform::Sine),
            ("triangle", LfoWaveform::Triangle),
            ("tri", LfoWaveform::Triangle),
            ("square", LfoWaveform::Square),
            ("sqr", LfoWaveform::Square),
            ("sawtooth", LfoWaveform::Sawtooth),
            ("saw", LfoWaveform::Sawtooth),
        ]
        .into_iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, waveform)| waveform)
    }

    /// Evaluates the waveform at `phase`, returning a value in `[0, 1]`.
    ///
    /// `phase` is expected in `[0, 1)`; anything else is wrapped first.
    #[inline]
    pub fn value(self, phase: f32) -> f32 {
        let phase = phase - floorf(phase);
        match self {
            LfoWaveform::Sine => 0.5 + 0.5 * sinf(TAU * phase),
            LfoWaveform::Triangle => {
                if phase < 0.25 {
                    0.5 + 2.0 * phase
                } else if phase < 0.75 {
                    1.0 - 2.0 * (phase - 0.25)
                } else {
                    2.0 * (phase - 0.75)
                }
            }
            LfoWaveform::Square => {
                if phase < 0.5 {
                    1.0
                } else {
                    0.0
                }
            }
            LfoWaveform::Sawtooth => {
                if phase < 0.5 {
                    0.5 + phase
                } else {
                    phase - 0.5
                }
            }
        }
    }
}

/// Phase accumulator for the sweep oscillator.
///
/// Holds only the canonical (channel 0) phase. Offset channels derive their
/// phase from it through [`Lfo::phase_with_offset`] instead of running their
/// own accumulator, so they can never drift apart.
///
/// The type is `Copy`: the engine runs an identical copy per channel within a
/// block, which reproduces the canonical trajectory bit for bit.
///
/// # Example
///
/// ```rust
/// use sweep_core::{Lfo, LfoWaveform};
///
/// let mut lfo = Lfo::new(44100.0, 0.2);
/// let phase = lfo.phase();
/// let value = LfoWaveform::Triangle.value(phase);
/// assert_eq!(value, 0.5);
/// lfo.advance();
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lfo {
    phase: f32,
    phase_inc: f32,
    sample_rate: f32,
}

impl Default for Lfo {
    fn default() -> Self {
        Self::new(48000.0, 0.0)
    }
}

impl Lfo {
    /// Creates an oscillator at phase 0.
    pub fn new(sample_rate: f32, freq_hz: f32) -> Self {
        let mut lfo = Self {
            phase: 0.0,
            phase_inc: 0.0,
            sample_rate: sample_rate.max(1.0),
        };
        lfo.set_frequency(freq_hz);
        lfo
    }

    /// Sets the rate in Hz. Negative rates are treated as 0.
    pub fn set_frequency(&mut self, freq_hz: f32) {
        let inc = freq_hz.max(0.0) / self.sample_rate;
        self.phase_inc = if inc.is_finite() {
            inc.min(MAX_PHASE_INCREMENT)
        } else {
            0.0
        };
    }

    /// Rate in Hz.
    pub fn frequency(&self) -> f32 {
        self.phase_inc * self.sample_rate
    }

    /// Phase increment per sample.
    pub fn phase_increment(&self) -> f32 {
        self.phase_inc
    }

    /// Changes the sample rate, keeping the rate in Hz.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        let freq = self.frequency();
        self.sample_rate = sample_rate.max(1.0);
        self.set_frequency(freq);
    }

    /// Canonical phase in `[0, 1)`.
    #[inline]
    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Canonical phase shifted by `offset` cycles, wrapped into `[0, 1)`.
    #[inline]
    pub fn phase_with_offset(&self, offset: f32) -> f32 {
        if offset == 0.0 {
            self.phase
        } else {
            let shifted = self.phase + offset;
            shifted - floorf(shifted)
        }
    }

    /// Jumps to `phase` (wrapped into `[0, 1)`).
    pub fn set_phase(&mut self, phase: f32) {
        self.phase = if phase.is_finite() {
            phase - floorf(phase)
        } else {
            0.0
        };
    }

    /// Back to phase 0.
    pub fn reset(&mut self) {
        self.phase = 0.0;
    }

    /// Advances one sample.
    #[inline]
    pub fn advance(&mut self) {
        self.phase = wrap_phase(self.phase + self.phase_inc);
    }

    /// Advances `samples` samples, one step at a time.
    ///
    /// Stepping (rather than multiplying) keeps the result identical to
    /// calling [`advance`](Self::advance) in a loop.
    pub fn advance_by(&mut self, samples: usize) {
        for _ in 0..samples {
            self.advance();
        }
    }
}
