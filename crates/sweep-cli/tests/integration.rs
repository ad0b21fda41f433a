//! End-to-end tests driving the `sweep` binary.

use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn sweep(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_sweep"))
        .args(args)
        .output()
        .expect("failed to launch sweep")
}

fn write_sine(path: &Path, channels: u16, frames: usize) {
    let spec = hound::WavSpec {
        channels,
        sample_rate: 44100,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).unwrap();
    for i in 0..frames {
        let s = (i as f32 * 440.0 * std::f32::consts::TAU / 44100.0).sin() * 0.5;
        for _ in 0..channels {
            writer.write_sample((s * 32767.0) as i16).unwrap();
        }
    }
    writer.finalize().unwrap();
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn process_stereo_file_with_preset() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.wav");
    let output = dir.path().join("out.wav");
    write_sine(&input, 2, 10_000);

    let result = sweep(&[
        "process",
        input.to_str().unwrap(),
        output.to_str().unwrap(),
        "--preset",
        "stereo-wide",
        "--block-size",
        "300",
    ]);
    assert!(result.status.success(), "{}", String::from_utf8_lossy(&result.stderr));

    let reader = hound::WavReader::open(&output).unwrap();
    let spec = reader.spec();
    assert_eq!(spec.channels, 2);
    assert_eq!(spec.sample_rate, 44100);
    assert_eq!(spec.sample_format, hound::SampleFormat::Float);
    assert_eq!(reader.len(), 20_000);

    let samples: Vec<f32> = reader.into_samples::<f32>().map(Result::unwrap).collect();
    assert!(samples.iter().all(|s| s.is_finite()));
    assert!(samples.iter().any(|s| s.abs() > 0.1));
    // Quarter-cycle offset makes the channels diverge.
    assert!(samples.chunks(2).any(|f| (f[0] - f[1]).abs() > 1e-3));
}

#[test]
fn block_size_does_not_change_output() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.wav");
    write_sine(&input, 1, 5_000);

    let render = |block: &str| {
        let out = dir.path().join(format!("out_{block}.wav"));
        let result = sweep(&[
            "process",
            input.to_str().unwrap(),
            out.to_str().unwrap(),
            "--feedback",
            "-0.7",
            "--interpolation",
            "cubic",
            "--block-size",
            block,
        ]);
        assert!(result.status.success());
        hound::WavReader::open(out)
            .unwrap()
            .into_samples::<f32>()
            .map(Result::unwrap)
            .collect::<Vec<f32>>()
    };

    assert_eq!(render("1"), render("4096"));
}

#[test]
fn invalid_override_fails() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.wav");
    write_sine(&input, 1, 100);

    let result = sweep(&[
        "process",
        input.to_str().unwrap(),
        dir.path().join("out.wav").to_str().unwrap(),
        "--feedback",
        "1.5",
    ]);
    assert!(!result.status.success());
    assert!(!dir.path().join("out.wav").exists());
}

#[test]
fn missing_input_fails() {
    let dir = TempDir::new().unwrap();
    let result = sweep(&[
        "process",
        dir.path().join("nope.wav").to_str().unwrap(),
        dir.path().join("out.wav").to_str().unwrap(),
    ]);
    assert!(!result.status.success());
}

#[test]
fn params_lists_every_parameter() {
    let result = sweep(&["params"]);
    assert!(result.status.success());
    let text = stdout(&result);
    for name in ["Delay", "Sweep", "Feedback", "Rate", "Waveform", "delay_ms", "rate_hz"] {
        assert!(text.contains(name), "missing {name} in:\n{text}");
    }
}

#[test]
fn presets_list_and_show() {
    let list = sweep(&["presets"]);
    assert!(list.status.success());
    let text = stdout(&list);
    assert!(text.contains("jet"));
    assert!(text.contains("metallic"));

    let show = sweep(&["presets", "jet"]);
    assert!(show.status.success());
    let text = stdout(&show);
    assert!(text.contains("Jet"));
    assert!(text.contains("Triangle"));
}

#[test]
fn presets_export_writes_full_table() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("exported").join("vibrato.toml");
    let result = sweep(&["presets", "vibrato", "--export", path.to_str().unwrap()]);
    assert!(result.status.success());

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("name = \"Vibrato\""), "{text}");
    for key in ["delay_ms", "sweep_ms", "rate_hz", "interpolation", "stereo"] {
        assert!(text.contains(key), "missing {key} in:\n{text}");
    }

    // The exported file loads back as a preset path.
    let show = sweep(&["presets", path.to_str().unwrap()]);
    assert!(show.status.success());
}

#[test]
fn unknown_preset_fails() {
    assert!(!sweep(&["presets", "no-such-preset-xyz"]).status.success());
}
