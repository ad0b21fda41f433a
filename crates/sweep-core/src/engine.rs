//! Multi-channel modulated delay engine.
//!
//! [`ModulatedDelayEngine`] owns one [`DelayLine`] per channel, a single
//! canonical [`Lfo`] and the current [`FlangerParams`]. Each sample it:
//!
//! 1. evaluates the waveform at the channel's effective phase,
//! 2. turns it into a delay `(delay + sweep · lfo) · sample_rate`,
//! 3. reads the delay line at that fractional position,
//! 4. writes `input + wet · feedback` and advances the write cursor,
//! 5. emits `dry_gain · input + wet_gain · wet`,
//! 6. advances the phase by `rate / sample_rate`.
//!
//! # Block-size invariance
//!
//! Every channel starts the block from the same copy of the canonical
//! oscillator and the same write index, and channels after the first derive
//! their phase from that trajectory plus a fixed offset. After the block the
//! engine keeps the channel 0 trajectory. Splitting a signal into blocks of
//! any size therefore yields bit-identical output.
//!
//! # Real-time safety
//!
//! [`process`](ModulatedDelayEngine::process) and
//! [`process_in_place`](ModulatedDelayEngine::process_in_place) never
//! allocate, lock or log. All allocation happens in
//! [`configure`](ModulatedDelayEngine::configure).

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

use alloc::vec::Vec;

use crate::delay::{DelayLine, capacity_for};
use crate::interpolation::Interpolation;
use crate::lfo::{Lfo, LfoWaveform};
use crate::math::{crossfade_gains, flush_denormal};
use crate::param_info::{ParamDescriptor, ParameterInfo};
use crate::params::{FlangerParams, MAX_TOTAL_DELAY_SECONDS};

/// Phase lead, in cycles, of every channel after the first in stereo mode.
pub const STEREO_PHASE_OFFSET: f32 = 0.25;

/// Shortest delay in samples the engine reads at.
///
/// The cubic kernel reads two slots past its base index; two samples of delay
/// keeps every tap with a non-zero weight on already written history.
pub const MIN_DELAY_SAMPLES: f32 = 2.0;

/// Block size assumed by [`ModulatedDelayEngine::new`].
pub const DEFAULT_MAX_BLOCK_SIZE: usize = 512;

/// Per-block constants derived from the parameter record.
#[derive(Clone, Copy)]
struct BlockSettings {
    delay: f32,
    sweep: f32,
    sample_rate: f32,
    max_delay: f32,
    feedback: f32,
    dry_gain: f32,
    wet_gain: f32,
    waveform: LfoWaveform,
    interpolation: Interpolation,
}

impl BlockSettings {
    #[inline]
    fn tick(&self, line: &mut DelayLine, lfo: &mut Lfo, offset: f32, input: f32) -> f32 {
        let lfo_value = self.waveform.value(lfo.phase_with_offset(offset));
        let delay_samples = ((self.delay + self.sweep * lfo_value) * self.sample_rate)
            .max(MIN_DELAY_SAMPLES)
            .min(self.max_delay);

        let wet = line.read(delay_samples, self.interpolation);
        line.write(flush_denormal(input + wet * self.feedback));
        lfo.advance();

        self.dry_gain * input + self.wet_gain * wet
    }
}

/// Flanger/chorus processing engine.
///
/// # Example
///
/// ```rust
/// use sweep_core::{FlangerParams, ModulatedDelayEngine};
///
/// let mut engine = ModulatedDelayEngine::new(44100.0, 2);
/// engine.set_params(FlangerParams::default().with_feedback(0.6).with_stereo(true));
///
/// let left = vec![0.5f32; 256];
/// let right = vec![0.25f32; 256];
/// let mut out_l = vec![0.0f32; 256];
/// let mut out_r = vec![0.0f32; 256];
/// engine.process(&[&left, &right], &mut [&mut out_l, &mut out_r]);
/// assert!(out_l.iter().all(|s| s.is_finite()));
/// ```
#[derive(Debug, Clone)]
pub struct ModulatedDelayEngine {
    lines: Vec<DelayLine>,
    lfo: Lfo,
    params: FlangerParams,
    sample_rate: f32,
    max_block_size: usize,
    write_index: usize,
}

impl ModulatedDelayEngine {
    /// Creates an engine for `num_channels` channels, configured for
    /// `sample_rate` and [`DEFAULT_MAX_BLOCK_SIZE`].
    pub fn new(sample_rate: f32, num_channels: usize) -> Self {
        let params = FlangerParams::default();
        let mut engine = Self {
            lines: Vec::new(),
            lfo: Lfo::new(48000.0, params.rate()),
            params,
            sample_rate: 48000.0,
            max_block_size: DEFAULT_MAX_BLOCK_SIZE,
            write_index: 0,
        };
        engine.lines.resize_with(num_channels, || DelayLine::new(1));
        engine.configure(sample_rate, DEFAULT_MAX_BLOCK_SIZE);
        engine
    }

    /// Creates an engine with an initial parameter set.
    pub fn with_params(sample_rate: f32, num_channels: usize, params: FlangerParams) -> Self {
        let mut engine = Self::new(sample_rate, num_channels);
        engine.set_params(params);
        engine
    }

    /// (Re)allocates every delay line for `sample_rate`, clears history and
    /// rewinds the oscillator to phase 0.
    ///
    /// Sample rates below 1 Hz (or non-finite) are raised to 1 Hz. Calling
    /// this twice with the same arguments leaves the same state as calling it
    /// once.
    pub fn configure(&mut self, sample_rate: f32, max_block_size: usize) {
        let sanitized = if sample_rate.is_finite() {
            sample_rate.max(1.0)
        } else {
            1.0
        };
        #[cfg(feature = "tracing")]
        if sanitized != sample_rate {
            tracing::warn!(requested = sample_rate, used = sanitized, "sample rate clamped");
        }

        let capacity = capacity_for(sanitized, MAX_TOTAL_DELAY_SECONDS);
        let channels = self.lines.len();
        self.lines.clear();
        self.lines.resize_with(channels, || DelayLine::new(capacity));

        self.sample_rate = sanitized;
        self.max_block_size = max_block_size.max(1);
        self.lfo = Lfo::new(sanitized, self.params.rate());
        self.write_index = 0;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            sample_rate = sanitized,
            max_block_size = self.max_block_size,
            capacity,
            channels,
            "modulated delay configured"
        );
    }

    /// Clears all history and rewinds phase and write index without
    /// reallocating.
    pub fn reset(&mut self) {
        for line in &mut self.lines {
            line.clear();
        }
        self.lfo.reset();
        self.write_index = 0;
    }

    /// Current parameters.
    pub fn params(&self) -> &FlangerParams {
        &self.params
    }

    /// Mutable access to the parameters. Changes apply from the next block.
    pub fn params_mut(&mut self) -> &mut FlangerParams {
        &mut self.params
    }

    /// Replaces the parameter set. Applies from the next block.
    pub fn set_params(&mut self, params: FlangerParams) {
        self.params = params;
    }

    /// Sample rate in use after sanitizing.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Block size passed to the last [`configure`](Self::configure).
    ///
    /// Informational: any block length is accepted.
    pub fn max_block_size(&self) -> usize {
        self.max_block_size
    }

    /// Number of channels with their own delay line.
    pub fn num_channels(&self) -> usize {
        self.lines.len()
    }

    /// Slots per delay line.
    pub fn capacity(&self) -> usize {
        self.lines.first().map_or_else(
            || capacity_for(self.sample_rate, MAX_TOTAL_DELAY_SECONDS),
            DelayLine::capacity,
        )
    }

    /// Write index shared by all channels.
    pub fn write_index(&self) -> usize {
        self.write_index
    }

    /// Canonical (channel 0) LFO phase in `[0, 1)`.
    pub fn lfo_phase(&self) -> f32 {
        self.lfo.phase()
    }

    /// Phase offset applied to `channel`.
    pub fn phase_offset(&self, channel: usize) -> f32 {
        if self.params.stereo() && channel != 0 {
            STEREO_PHASE_OFFSET
        } else {
            0.0
        }
    }

    /// Phase `channel` will use for its next sample.
    pub fn effective_phase(&self, channel: usize) -> f32 {
        self.lfo.phase_with_offset(self.phase_offset(channel))
    }

    /// Delay line of `channel`, if it exists.
    pub fn delay_line(&self, channel: usize) -> Option<&DelayLine> {
        self.lines.get(channel)
    }

    fn block_settings(&mut self) -> BlockSettings {
        let params = self.params;
        self.lfo.set_frequency(params.rate());
        let (dry_gain, wet_gain) = crossfade_gains(params.mix());
        let max_delay = (self.capacity() as f32 - 3.0).max(MIN_DELAY_SAMPLES);
        BlockSettings {
            delay: params.delay(),
            sweep: params.sweep(),
            sample_rate: self.sample_rate,
            max_delay,
            feedback: params.feedback(),
            dry_gain,
            wet_gain: wet_gain * params.depth(),
            waveform: params.waveform(),
            interpolation: params.interpolation(),
        }
    }

    fn finish_block(&mut self, end_lfo: Option<Lfo>, frames: usize) {
        if let Some(lfo) = end_lfo {
            self.lfo = lfo;
        }
        let capacity = self.capacity();
        self.write_index = (self.write_index + frames % capacity) % capacity;
    }

    /// Processes separate input and output buffers.
    ///
    /// `inputs[ch]` feeds `outputs[ch]` for every channel the engine, the
    /// inputs and the outputs all have; the block length is the shortest of
    /// those buffers. Output samples that receive no processed value are set
    /// to silence. Parameters are read once at the start of the block.
    pub fn process(&mut self, inputs: &[&[f32]], outputs: &mut [&mut [f32]]) {
        let channels = self.lines.len().min(inputs.len()).min(outputs.len());
        let frames = inputs[..channels]
            .iter()
            .map(|b| b.len())
            .chain(outputs[..channels].iter().map(|b| b.len()))
            .min()
            .unwrap_or(0);

        let settings = self.block_settings();
        let start_lfo = self.lfo;
        let start_index = self.write_index;
        let stereo = self.params.stereo();
        let mut end_lfo = None;

        for (ch, line) in self.lines.iter_mut().take(channels).enumerate() {
            let offset = if stereo && ch != 0 {
                STEREO_PHASE_OFFSET
            } else {
                0.0
            };
            let mut lfo = start_lfo;
            line.set_write_index(start_index);

            let input = &inputs[ch][..frames];
            let output = &mut outputs[ch][..frames];
            for (out, &x) in output.iter_mut().zip(input) {
                *out = settings.tick(line, &mut lfo, offset, x);
            }
            end_lfo.get_or_insert(lfo);
        }

        for (ch, output) in outputs.iter_mut().enumerate() {
            let start = if ch < channels { frames } else { 0 };
            output[start..].fill(0.0);
        }

        self.finish_block(end_lfo, frames);
    }

    /// Processes buffers in place.
    ///
    /// Same rules as [`process`](Self::process): buffers beyond the engine's
    /// channel count, and any tail past the shortest buffer, are silenced.
    pub fn process_in_place(&mut self, buffers: &mut [&mut [f32]]) {
        let channels = self.lines.len().min(buffers.len());
        let frames = buffers[..channels]
            .iter()
            .map(|b| b.len())
            .min()
            .unwrap_or(0);

        let settings = self.block_settings();
        let start_lfo = self.lfo;
        let start_index = self.write_index;
        let stereo = self.params.stereo();
        let mut end_lfo = None;

        for (ch, (line, buffer)) in self.lines.iter_mut().zip(buffers.iter_mut()).enumerate() {
            let offset = if stereo && ch != 0 {
                STEREO_PHASE_OFFSET
            } else {
                0.0
            };
            let mut lfo = start_lfo;
            line.set_write_index(start_index);

            for sample in buffer[..frames].iter_mut() {
                *sample = settings.tick(line, &mut lfo, offset, *sample);
            }
            end_lfo.get_or_insert(lfo);
        }

        for (ch, buffer) in buffers.iter_mut().enumerate() {
            let start = if ch < channels { frames } else { 0 };
            buffer[start..].fill(0.0);
        }

        self.finish_block(end_lfo, frames);
    }
}

impl ParameterInfo for ModulatedDelayEngine {
    fn param_count(&self) -> usize {
        self.params.param_count()
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        self.params.param_info(index)
    }

    fn get_param(&self, index: usize) -> f32 {
        self.params.get_param(index)
    }

    fn set_param(&mut self, index: usize, value: f32) {
        self.params.set_param(index, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::FlangerParam;

    fn impulse(len: usize) -> Vec<f32> {
        let mut buf = vec![0.0; len];
        buf[0] = 1.0;
        buf
    }

    fn static_delay() -> FlangerParams {
        FlangerParams::default().with_sweep(0.0)
    }

    #[test]
    fn test_configure_sizes_lines() {
        let engine = ModulatedDelayEngine::new(44100.0, 2);
        assert_eq!(engine.num_channels(), 2);
        assert_eq!(engine.capacity(), 4410 + crate::delay::GUARD_SAMPLES);
        assert_eq!(engine.lfo_phase(), 0.0);
        assert_eq!(engine.write_index(), 0);
    }

    #[test]
    fn test_configure_sanitizes_sample_rate() {
        let mut engine = ModulatedDelayEngine::new(0.0, 1);
        assert_eq!(engine.sample_rate(), 1.0);
        engine.configure(f32::NAN, 0);
        assert_eq!(engine.sample_rate(), 1.0);
        assert_eq!(engine.max_block_size(), 1);
        assert!(engine.capacity() >= 1);

        let mut out = vec![0.0; 64];
        engine.process(&[&impulse(64)], &mut [&mut out]);
        assert!(out.iter().all(|s| s.is_finite()));
    }

    #[test]
    fn test_configure_is_idempotent() {
        let mut engine = ModulatedDelayEngine::new(48000.0, 1);
        let input = vec![0.3; 300];
        let mut out = vec![0.0; 300];
        engine.process(&[&input], &mut [&mut out]);

        engine.configure(48000.0, 256);
        let once = (engine.lfo_phase(), engine.write_index(), engine.capacity());
        engine.configure(48000.0, 256);
        let twice = (engine.lfo_phase(), engine.write_index(), engine.capacity());
        assert_eq!(once, twice);
        assert_eq!(once.0, 0.0);
        assert!(
            engine
                .delay_line(0)
                .is_some_and(|l| l.as_slice().iter().all(|&s| s == 0.0))
        );
    }

    #[test]
    fn test_impulse_lands_at_static_delay() {
        let mut engine = ModulatedDelayEngine::with_params(44100.0, 1, static_delay());
        let input = impulse(256);
        let mut out = vec![0.0; 256];
        engine.process(&[&input], &mut [&mut out]);

        // 0.0025 s * 44100 = 110.25 samples
        assert_eq!(out[0], 1.0);
        assert!((out[110] - 0.75).abs() < 1e-3, "got {}", out[110]);
        assert!((out[111] - 0.25).abs() < 1e-3, "got {}", out[111]);
        assert!(out[112..].iter().all(|&s| s.abs() < 1e-6));
    }

    #[test]
    fn test_in_place_matches_separate_buffers() {
        let params = FlangerParams::default()
            .with_feedback(0.7)
            .with_rate(3.0)
            .with_interpolation(Interpolation::Cubic)
            .with_stereo(true);
        let left: Vec<f32> = (0..500).map(|i| libm::sinf(i as f32 * 0.05)).collect();
        let right: Vec<f32> = (0..500).map(|i| libm::cosf(i as f32 * 0.03)).collect();

        let mut a = ModulatedDelayEngine::with_params(48000.0, 2, params);
        let mut out_l = vec![0.0; 500];
        let mut out_r = vec![0.0; 500];
        a.process(&[&left, &right], &mut [&mut out_l, &mut out_r]);

        let mut b = ModulatedDelayEngine::with_params(48000.0, 2, params);
        let mut buf_l = left.clone();
        let mut buf_r = right.clone();
        b.process_in_place(&mut [&mut buf_l, &mut buf_r]);

        assert_eq!(out_l, buf_l);
        assert_eq!(out_r, buf_r);
        assert_eq!(a.lfo_phase(), b.lfo_phase());
    }

    #[test]
    fn test_state_advances_once_per_frame() {
        let mut engine = ModulatedDelayEngine::new(10000.0, 2);
        engine.params_mut().set_rate(10.0);
        let input = vec![0.0; 250];
        let mut out_l = vec![0.0; 250];
        let mut out_r = vec![0.0; 250];
        engine.process(&[&input, &input], &mut [&mut out_l, &mut out_r]);

        assert_eq!(engine.write_index(), 250);
        assert!((engine.lfo_phase() - 0.25).abs() < 1e-4);
    }

    #[test]
    fn test_write_index_wraps() {
        let mut engine = ModulatedDelayEngine::new(100.0, 1);
        let capacity = engine.capacity();
        let input = vec![0.0; capacity + 3];
        let mut out = vec![0.0; capacity + 3];
        engine.process(&[&input], &mut [&mut out]);
        assert_eq!(engine.write_index(), 3);
    }

    #[test]
    fn test_stereo_offset() {
        let mut engine = ModulatedDelayEngine::new(44100.0, 3);
        engine.params_mut().set_stereo(true);
        let input = vec![0.0; 123];
        let mut outs = [vec![0.0; 123], vec![0.0; 123], vec![0.0; 123]];
        let [a, b, c] = &mut outs;
        engine.process(
            &[&input, &input, &input],
            &mut [a.as_mut_slice(), b.as_mut_slice(), c.as_mut_slice()],
        );

        let canonical = engine.effective_phase(0);
        for ch in 1..3 {
            let expected = libm::fmodf(canonical + 0.25, 1.0);
            assert!((engine.effective_phase(ch) - expected).abs() < 1e-6);
        }

        engine.params_mut().set_stereo(false);
        assert_eq!(engine.effective_phase(1), canonical);
    }

    #[test]
    fn test_extra_outputs_silenced() {
        let mut engine = ModulatedDelayEngine::new(44100.0, 1);
        let input = vec![0.5; 32];
        let mut out_a = vec![9.0; 40];
        let mut out_b = vec![9.0; 32];
        engine.process(&[&input], &mut [&mut out_a, &mut out_b]);

        assert_eq!(out_a[0], 0.5);
        assert!(out_a[32..].iter().all(|&s| s == 0.0));
        assert!(out_b.iter().all(|&s| s == 0.0));
        assert_eq!(engine.write_index(), 32);
    }

    #[test]
    fn test_zero_channels_is_noop() {
        let mut engine = ModulatedDelayEngine::new(44100.0, 0);
        engine.process(&[], &mut []);
        engine.process_in_place(&mut []);
        assert_eq!(engine.write_index(), 0);
        assert_eq!(engine.lfo_phase(), 0.0);
        assert_eq!(engine.capacity(), 4410 + crate::delay::GUARD_SAMPLES);
    }

    #[test]
    fn test_reset_keeps_allocation() {
        let mut engine = ModulatedDelayEngine::new(44100.0, 1);
        let capacity = engine.capacity();
        let mut buf = impulse(64);
        engine.process_in_place(&mut [&mut buf]);
        engine.reset();
        assert_eq!(engine.capacity(), capacity);
        assert_eq!(engine.write_index(), 0);
        assert_eq!(engine.lfo_phase(), 0.0);
    }

    #[test]
    fn test_mix_extremes() {
        let params = static_delay();
        let input = impulse(200);

        let mut dry = ModulatedDelayEngine::with_params(44100.0, 1, params.with_mix(0.0));
        let mut out = vec![0.0; 200];
        dry.process(&[&input], &mut [&mut out]);
        assert_eq!(out, input);

        let mut wet = ModulatedDelayEngine::with_params(44100.0, 1, params.with_mix(1.0));
        wet.process(&[&input], &mut [&mut out]);
        assert_eq!(out[0], 0.0);
        assert!((out[110] - 0.75).abs() < 1e-3);
    }

    #[test]
    fn test_depth_scales_wet_path() {
        let params = static_delay().with_depth(0.5);
        let mut engine = ModulatedDelayEngine::with_params(44100.0, 1, params);
        let input = impulse(200);
        let mut out = vec![0.0; 200];
        engine.process(&[&input], &mut [&mut out]);
        assert!((out[110] - 0.375).abs() < 1e-3);
    }

    #[test]
    fn test_parameter_interface_forwards() {
        let mut engine = ModulatedDelayEngine::new(44100.0, 1);
        engine.set_param(FlangerParam::Rate.index(), 20.0);
        assert_eq!(engine.params().rate(), 10.0);
        assert_eq!(engine.get_param(FlangerParam::Rate.index()), 10.0);
        assert_eq!(engine.param_count(), FlangerParam::COUNT);
        engine.set_param(100, 1.0);
        assert_eq!(engine.get_param(100), 0.0);
    }

    #[test]
    fn test_feedback_recirculates() {
        let params = static_delay().with_feedback(0.5);
        let mut engine = ModulatedDelayEngine::with_params(44100.0, 1, params);
        let input = impulse(400);
        let mut out = vec![0.0; 400];
        engine.process(&[&input], &mut [&mut out]);
        // second echo near 2 * 110.25 samples
        let echo: f32 = out[219..224].iter().map(|s| s.abs()).sum();
        assert!(echo > 0.1, "second echo energy {echo}");
    }
}
