//! Strongly-typed flanger parameter record.
//!
//! [`FlangerParams`] holds every control value in natural units. Setters clamp
//! into the documented ranges, so a record obtained through the public API is
//! always safe to hand to the engine.
//!
//! ## Parameter Indices (`ParameterInfo`)
//!
//! | Index | Name | Range | Default |
//! |-------|------|-------|---------|
//! | 0 | Delay | 0–50 ms | 2.5 ms |
//! | 1 | Sweep | 0–50 ms | 10 ms |
//! | 2 | Depth | 0–1 | 1.0 |
//! | 3 | Mix | 0–1 | 0.5 |
//! | 4 | Waveform | Sine/Triangle/Square/Sawtooth | Sine |
//! | 5 | Interpolation | Linear/Quadratic/Cubic | Linear |
//! | 6 | Feedback | -0.95–0.95 | 0.0 |
//! | 7 | Rate | 0–10 Hz | 0.2 Hz |
//! | 8 | Stereo | Off/On | Off |

use crate::interpolation::Interpolation;
use crate::lfo::LfoWaveform;
use crate::param_info::{ParamDescriptor, ParamId, ParameterInfo};

/// Longest base delay in seconds.
pub const MAX_DELAY_SECONDS: f32 = 0.05;

/// Widest sweep in seconds.
pub const MAX_SWEEP_SECONDS: f32 = 0.05;

/// Longest instantaneous delay the engine can be asked for.
pub const MAX_TOTAL_DELAY_SECONDS: f32 = MAX_DELAY_SECONDS + MAX_SWEEP_SECONDS;

/// Feedback magnitude limit. Keeps the recirculating loop strictly decaying.
pub const MAX_FEEDBACK: f32 = 0.95;

/// Highest LFO rate in Hz.
pub const MAX_RATE_HZ: f32 = 10.0;

/// Labels for the stereo toggle.
pub const STEREO_LABELS: &[&str] = &["Off", "On"];

/// Host-style parameter index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum FlangerParam {
    /// Base delay time.
    Delay = 0,
    /// Sweep width.
    Sweep = 1,
    /// Wet path gain.
    Depth = 2,
    /// Dry/wet crossfade.
    Mix = 3,
    /// LFO waveform selector.
    Waveform = 4,
    /// Interpolation kernel selector.
    Interpolation = 5,
    /// Feedback gain.
    Feedback = 6,
    /// LFO rate.
    Rate = 7,
    /// Quarter-cycle phase offset for channels after the first.
    Stereo = 8,
}

impl FlangerParam {
    /// Number of parameters.
    pub const COUNT: usize = 9;

    /// All parameters in index order.
    pub const ALL: [FlangerParam; Self::COUNT] = [
        FlangerParam::Delay,
        FlangerParam::Sweep,
        FlangerParam::Depth,
        FlangerParam::Mix,
        FlangerParam::Waveform,
        FlangerParam::Interpolation,
        FlangerParam::Feedback,
        FlangerParam::Rate,
        FlangerParam::Stereo,
    ];

    /// Maps an index to a parameter, `None` if out of range.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Zero-based index.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Range, default and display metadata.
    pub const fn descriptor(self) -> ParamDescriptor {
        match self {
            FlangerParam::Delay => {
                ParamDescriptor::seconds("Delay", "Delay", 0.0, MAX_DELAY_SECONDS, 0.0025)
                    .with_id(ParamId(100), "delay")
            }
            FlangerParam::Sweep => {
                ParamDescriptor::seconds("Sweep", "Sweep", 0.0, MAX_SWEEP_SECONDS, 0.010)
                    .with_id(ParamId(101), "sweep")
            }
            FlangerParam::Depth => ParamDescriptor::custom("Depth", "Depth", 0.0, 1.0, 1.0)
                .with_id(ParamId(102), "depth"),
            FlangerParam::Mix => {
                ParamDescriptor::custom("Mix", "Mix", 0.0, 1.0, 0.5).with_id(ParamId(103), "mix")
            }
            FlangerParam::Waveform => {
                ParamDescriptor::selector("Waveform", "Wave", LfoWaveform::LABELS, 0.0)
                    .with_id(ParamId(104), "waveform")
            }
            FlangerParam::Interpolation => {
                ParamDescriptor::selector("Interpolation", "Interp", Interpolation::LABELS, 0.0)
                    .with_id(ParamId(105), "interpolation")
            }
            FlangerParam::Feedback => {
                ParamDescriptor::custom("Feedback", "Fdbk", -MAX_FEEDBACK, MAX_FEEDBACK, 0.0)
                    .with_id(ParamId(106), "feedback")
            }
            FlangerParam::Rate => ParamDescriptor::rate_hz(0.0, MAX_RATE_HZ, 0.2)
                .with_id(ParamId(107), "rate"),
            FlangerParam::Stereo => {
                ParamDescriptor::selector("Stereo", "Stereo", STEREO_LABELS, 0.0)
                    .with_id(ParamId(108), "stereo")
            }
        }
    }
}

/// Complete control state of the flanger.
///
/// # Example
///
/// ```rust
/// use sweep_core::{FlangerParams, Interpolation, LfoWaveform};
///
/// let params = FlangerParams::default()
///     .with_feedback(2.0)
///     .with_waveform(LfoWaveform::Triangle)
///     .with_interpolation(Interpolation::Cubic);
/// assert_eq!(params.feedback(), 0.95);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlangerParams {
    delay: f32,
    sweep: f32,
    depth: f32,
    mix: f32,
    waveform: LfoWaveform,
    interpolation: Interpolation,
    feedback: f32,
    rate: f32,
    stereo: bool,
}

impl Default for FlangerParams {
    fn default() -> Self {
        Self {
            delay: 0.0025,
            sweep: 0.010,
            depth: 1.0,
            mix: 0.5,
            waveform: LfoWaveform::Sine,
            interpolation: Interpolation::Linear,
            feedback: 0.0,
            rate: 0.2,
            stereo: false,
        }
    }
}

impl FlangerParams {
    /// Base delay in seconds.
    pub fn delay(&self) -> f32 {
        self.delay
    }

    /// Sets the base delay in seconds, clamped to `[0, 0.05]`.
    pub fn set_delay(&mut self, seconds: f32) {
        self.delay = FlangerParam::Delay.descriptor().clamp(seconds);
    }

    /// Sweep width in seconds.
    pub fn sweep(&self) -> f32 {
        self.sweep
    }

    /// Sets the sweep width in seconds, clamped to `[0, 0.05]`.
    pub fn set_sweep(&mut self, seconds: f32) {
        self.sweep = FlangerParam::Sweep.descriptor().clamp(seconds);
    }

    /// Wet path gain.
    pub fn depth(&self) -> f32 {
        self.depth
    }

    /// Sets the wet path gain, clamped to `[0, 1]`.
    pub fn set_depth(&mut self, depth: f32) {
        self.depth = FlangerParam::Depth.descriptor().clamp(depth);
    }

    /// Dry/wet crossfade position.
    pub fn mix(&self) -> f32 {
        self.mix
    }

    /// Sets the crossfade, clamped to `[0, 1]`.
    pub fn set_mix(&mut self, mix: f32) {
        self.mix = FlangerParam::Mix.descriptor().clamp(mix);
    }

    /// LFO waveform.
    pub fn waveform(&self) -> LfoWaveform {
        self.waveform
    }

    /// Sets the LFO waveform.
    pub fn set_waveform(&mut self, waveform: LfoWaveform) {
        self.waveform = waveform;
    }

    /// Interpolation kernel.
    pub fn interpolation(&self) -> Interpolation {
        self.interpolation
    }

    /// Sets the interpolation kernel.
    pub fn set_interpolation(&mut self, interpolation: Interpolation) {
        self.interpolation = interpolation;
    }

    /// Feedback gain.
    pub fn feedback(&self) -> f32 {
        self.feedback
    }

    /// Sets the feedback gain, clamped to `[-0.95, 0.95]`.
    pub fn set_feedback(&mut self, feedback: f32) {
        self.feedback = FlangerParam::Feedback.descriptor().clamp(feedback);
    }

    /// LFO rate in Hz.
    pub fn rate(&self) -> f32 {
        self.rate
    }

    /// Sets the LFO rate in Hz, clamped to `[0, 10]`.
    pub fn set_rate(&mut self, hz: f32) {
        self.rate = FlangerParam::Rate.descriptor().clamp(hz);
    }

    /// Whether channels after the first run a quarter cycle ahead.
    pub fn stereo(&self) -> bool {
        self.stereo
    }

    /// Enables or disables the stereo phase offset.
    pub fn set_stereo(&mut self, stereo: bool) {
        self.stereo = stereo;
    }

    /// Builder form of [`set_delay`](Self::set_delay).
    #[must_use]
    pub fn with_delay(mut self, seconds: f32) -> Self {
        self.set_delay(seconds);
        self
    }

    /// Builder form of [`set_sweep`](Self::set_sweep).
    #[must_use]
    pub fn with_sweep(mut self, seconds: f32) -> Self {
        self.set_sweep(seconds);
        self
    }

    /// Builder form of [`set_depth`](Self::set_depth).
    #[must_use]
    pub fn with_depth(mut self, depth: f32) -> Self {
        self.set_depth(depth);
        self
    }

    /// Builder form of [`set_mix`](Self::set_mix).
    #[must_use]
    pub fn with_mix(mut self, mix: f32) -> Self {
        self.set_mix(mix);
        self
    }

    /// Builder form of [`set_waveform`](Self::set_waveform).
    #[must_use]
    pub fn with_waveform(mut self, waveform: LfoWaveform) -> Self {
        self.waveform = waveform;
        self
    }

    /// Builder form of [`set_interpolation`](Self::set_interpolation).
    #[must_use]
    pub fn with_interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = interpolation;
        self
    }

    /// Builder form of [`set_feedback`](Self::set_feedback).
    #[must_use]
    pub fn with_feedback(mut self, feedback: f32) -> Self {
        self.set_feedback(feedback);
        self
    }

    /// Builder form of [`set_rate`](Self::set_rate).
    #[must_use]
    pub fn with_rate(mut self, hz: f32) -> Self {
        self.set_rate(hz);
        self
    }

    /// Builder form of [`set_stereo`](Self::set_stereo).
    #[must_use]
    pub fn with_stereo(mut self, stereo: bool) -> Self {
        self.stereo = stereo;
        self
    }

    /// Instantaneous delay in seconds for an LFO value in `[0, 1]`.
    #[inline]
    pub fn delay_at(&self, lfo_value: f32) -> f32 {
        self.delay + self.sweep * lfo_value
    }
}

fn selector_index(value: f32) -> u8 {
    if value.is_finite() && value >= 0.0 {
        libm::roundf(value).min(f32::from(u8::MAX)) as u8
    } else {
        0
    }
}

impl ParameterInfo for FlangerParams {
    fn param_count(&self) -> usize {
        FlangerParam::COUNT
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        FlangerParam::from_index(index).map(FlangerParam::descriptor)
    }

    fn get_param(&self, index: usize) -> f32 {
        match FlangerParam::from_index(index) {
            Some(FlangerParam::Delay) => self.delay,
            Some(FlangerParam::Sweep) => self.sweep,
            Some(FlangerParam::Depth) => self.depth,
            Some(FlangerParam::Mix) => self.mix,
            Some(FlangerParam::Waveform) => f32::from(self.waveform.index()),
            Some(FlangerParam::Interpolation) => f32::from(self.interpolation.index()),
            Some(FlangerParam::Feedback) => self.feedback,
            Some(FlangerParam::Rate) => self.rate,
            Some(FlangerParam::Stereo) => f32::from(u8::from(self.stereo)),
            None => 0.0,
        }
    }

    fn set_param(&mut self, index: usize, value: f32) {
        match FlangerParam::from_index(index) {
            Some(FlangerParam::Delay) => self.set_delay(value),
            Some(FlangerParam::Sweep) => self.set_sweep(value),
            Some(FlangerParam::Depth) => self.set_depth(value),
            Some(FlangerParam::Mix) => self.set_mix(value),
            Some(FlangerParam::Waveform) => {
                self.waveform = LfoWaveform::from_index(selector_index(value));
            }
            Some(FlangerParam::Interpolation) => {
                self.interpolation = Interpolation::from_index(selector_index(value));
            }
            Some(FlangerParam::Feedback) => self.set_feedback(value),
            Some(FlangerParam::Rate) => self.set_rate(value),
            Some(FlangerParam::Stereo) => self.stereo = value >= 0.5,
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_descriptors() {
        let params = FlangerParams::default();
        for param in FlangerParam::ALL {
            let desc = param.descriptor();
            assert_eq!(
                params.get_param(param.index()),
                desc.default,
                "{}",
                desc.name
            );
        }
    }

    #[test]
    fn test_index_round_trip() {
        for (i, param) in FlangerParam::ALL.iter().enumerate() {
            assert_eq!(param.index(), i);
            assert_eq!(FlangerParam::from_index(i), Some(*param));
        }
        assert_eq!(FlangerParam::from_index(FlangerParam::COUNT), None);
    }

    #[test]
    fn test_setters_clamp() {
        let mut params = FlangerParams::default();
        params.set_delay(1.0);
        params.set_sweep(-1.0);
        params.set_feedback(-4.0);
        params.set_rate(100.0);
        params.set_mix(f32::NAN);
        assert_eq!(params.delay(), MAX_DELAY_SECONDS);
        assert_eq!(params.sweep(), 0.0);
        assert_eq!(params.feedback(), -MAX_FEEDBACK);
        assert_eq!(params.rate(), MAX_RATE_HZ);
        assert_eq!(params.mix(), 0.5);
    }

    #[test]
    fn test_total_delay_bounded() {
        let params = FlangerParams::default().with_delay(9.0).with_sweep(9.0);
        assert!(params.delay_at(1.0) <= MAX_TOTAL_DELAY_SECONDS);
    }

    #[test]
    fn test_selectors_via_index() {
        let mut params = FlangerParams::default();
        params.set_param(FlangerParam::Waveform.index(), 2.0);
        params.set_param(FlangerParam::Interpolation.index(), 2.4);
        params.set_param(FlangerParam::Stereo.index(), 1.0);
        assert_eq!(params.waveform(), LfoWaveform::Square);
        assert_eq!(params.interpolation(), Interpolation::Cubic);
        assert!(params.stereo());
        assert_eq!(params.get_param(FlangerParam::Stereo.index()), 1.0);
    }

    #[test]
    fn test_unknown_selector_values_fall_back() {
        let mut params = FlangerParams::default().with_interpolation(Interpolation::Cubic);
        params.set_param(FlangerParam::Interpolation.index(), 7.0);
        assert_eq!(params.interpolation(), Interpolation::Linear);
        params.set_param(FlangerParam::Waveform.index(), -1.0);
        assert_eq!(params.waveform(), LfoWaveform::Sine);
    }

    #[test]
    fn test_unknown_index() {
        let mut params = FlangerParams::default();
        let before = params;
        params.set_param(42, 1.0);
        assert_eq!(params, before);
        assert_eq!(params.get_param(42), 0.0);
        assert!(params.param_info(42).is_none());
    }

    #[test]
    fn test_normalized_access() {
        let mut params = FlangerParams::default();
        params.set_param_normalized(FlangerParam::Feedback.index(), 1.0);
        assert_eq!(params.feedback(), MAX_FEEDBACK);
        params.set_param_normalized(FlangerParam::Waveform.index(), 1.0);
        assert_eq!(params.waveform(), LfoWaveform::Sawtooth);
        assert_eq!(params.get_param_normalized(FlangerParam::Waveform.index()), 1.0);
    }

    #[test]
    fn test_param_text() {
        let params = FlangerParams::default().with_waveform(LfoWaveform::Triangle);
        assert_eq!(params.param_text(FlangerParam::Delay.index()), "2.50 ms");
        assert_eq!(params.param_text(FlangerParam::Waveform.index()), "Triangle");
        assert_eq!(params.param_text(FlangerParam::Stereo.index()), "Off");
        assert_eq!(params.param_text(FlangerParam::Rate.index()), "0.20 Hz");
    }

    #[test]
    fn test_find_by_name() {
        let params = FlangerParams::default();
        assert_eq!(params.find_param_by_name("fdbk"), Some(6));
        assert_eq!(params.find_param_by_name("Interpolation"), Some(5));
        assert_eq!(params.find_param_by_name("resonance"), None);
    }
}
