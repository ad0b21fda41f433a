//! Process command: run a WAV file through the flanger.

use anyhow::{Context, bail};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use sweep_config::{ParamValue, load_preset, validate_param};
use sweep_core::{FlangerParams, ModulatedDelayEngine, ParameterInfo};

use crate::wav::{self, WavSpec};

#[derive(Args)]
pub struct ProcessArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Start from a preset (factory id, user preset name or file path)
    #[arg(short, long)]
    preset: Option<String>,

    /// Base delay in milliseconds
    #[arg(long, value_name = "MS")]
    delay_ms: Option<f32>,

    /// Sweep width in milliseconds
    #[arg(long, value_name = "MS")]
    sweep_ms: Option<f32>,

    /// LFO rate in Hz
    #[arg(long, value_name = "HZ")]
    rate: Option<f32>,

    /// Feedback amount (-0.95 to 0.95)
    #[arg(long, allow_negative_numbers = true)]
    feedback: Option<f32>,

    /// Wet level (0 to 1)
    #[arg(long)]
    depth: Option<f32>,

    /// Dry/wet crossfade (0 = dry, 1 = wet)
    #[arg(long)]
    mix: Option<f32>,

    /// LFO waveform: sine, triangle, square or sawtooth
    #[arg(long)]
    waveform: Option<String>,

    /// Interpolation: linear, quadratic or cubic
    #[arg(long)]
    interpolation: Option<String>,

    /// Offset the LFO of every channel after the first by a quarter cycle
    #[arg(long)]
    stereo: bool,

    /// Block size for processing
    #[arg(long, default_value = "512")]
    block_size: usize,

    /// Output bit depth (16, 24 or 32)
    #[arg(long, default_value = "32")]
    bit_depth: u16,
}

impl ProcessArgs {
    /// Command-line overrides as preset entries, in preset units.
    fn overrides(&self) -> Vec<(&'static str, ParamValue)> {
        let numbers = [
            ("delay_ms", self.delay_ms),
            ("sweep_ms", self.sweep_ms),
            ("rate_hz", self.rate),
            ("feedback", self.feedback),
            ("depth", self.depth),
            ("mix", self.mix),
        ];
        let mut entries: Vec<(&'static str, ParamValue)> = numbers
            .into_iter()
            .filter_map(|(key, value)| value.map(|v| (key, ParamValue::from(v))))
            .collect();

        if let Some(name) = &self.waveform {
            entries.push(("waveform", ParamValue::Text(name.clone())));
        }
        if let Some(name) = &self.interpolation {
            entries.push(("interpolation", ParamValue::Text(name.clone())));
        }
        if self.stereo {
            entries.push(("stereo", ParamValue::Bool(true)));
        }
        entries
    }

    fn resolve_params(&self) -> anyhow::Result<FlangerParams> {
        let mut params = match &self.preset {
            Some(name) => {
                let preset = load_preset(name)?;
                tracing::info!(preset = %preset.name, "loaded preset");
                preset
                    .to_params()
                    .with_context(|| format!("preset '{name}' is invalid"))?
            }
            None => FlangerParams::default(),
        };

        for (key, value) in self.overrides() {
            let (param, natural) =
                validate_param(key, &value).with_context(|| format!("invalid --{key} value"))?;
            params.set_param(param.index(), natural);
        }
        Ok(params)
    }
}

pub fn run(args: ProcessArgs) -> anyhow::Result<()> {
    if args.block_size == 0 {
        bail!("block size must be at least 1");
    }
    if !matches!(args.bit_depth, 16 | 24 | 32) {
        bail!("unsupported bit depth {} (expected 16, 24 or 32)", args.bit_depth);
    }

    let params = args.resolve_params()?;

    println!("Reading {}...", args.input.display());
    let (mut channels, spec) = wav::read_wav(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let frames = channels.first().map_or(0, Vec::len);

    println!(
        "  {} Hz, {} channel(s), {} samples ({:.2}s)",
        spec.sample_rate,
        channels.len(),
        frames,
        frames as f32 / spec.sample_rate as f32
    );

    let mut engine =
        ModulatedDelayEngine::with_params(spec.sample_rate as f32, channels.len(), params);
    engine.configure(spec.sample_rate as f32, args.block_size);

    let pb = ProgressBar::new(frames as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("#>-"),
    );

    let mut start = 0;
    while start < frames {
        let end = (start + args.block_size).min(frames);
        let mut block: Vec<&mut [f32]> = channels
            .iter_mut()
            .map(|channel| &mut channel[start..end])
            .collect();
        engine.process_in_place(&mut block);
        pb.set_position(end as u64);
        start = end;
    }
    pb.finish_and_clear();

    let peak = channels
        .iter()
        .flatten()
        .fold(0.0f32, |acc, s| acc.max(s.abs()));
    let rms = calculate_rms(channels.iter().flatten().copied(), frames * channels.len());
    println!(
        "  Output: peak {:.1} dB, RMS {:.1} dB",
        linear_to_db(peak),
        linear_to_db(rms)
    );

    let out_spec = WavSpec {
        bits_per_sample: args.bit_depth,
        ..spec
    };
    wav::write_wav(&args.output, &channels, out_spec)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    println!("Wrote {}", args.output.display());

    Ok(())
}

fn calculate_rms(samples: impl Iterator<Item = f32>, count: usize) -> f32 {
    if count == 0 {
        return 0.0;
    }
    let sum: f64 = samples.map(|s| f64::from(s) * f64::from(s)).sum();
    (sum / count as f64).sqrt() as f32
}

fn linear_to_db(linear: f32) -> f32 {
    20.0 * linear.max(1e-10).log10()
}
