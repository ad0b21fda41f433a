//! Integration tests for sweep-config.
//!
//! These tests verify end-to-end functionality across modules: presets on
//! disk driving the engine, factory presets and state blobs.

use sweep_config::{
    ConfigError, Preset, ValidationError, factory_presets, from_state_bytes, get_factory_preset,
    load_preset_from, to_state_bytes,
};
use sweep_core::{FlangerParams, ModulatedDelayEngine};
use tempfile::TempDir;

fn test_signal(len: usize) -> Vec<f32> {
    (0..len).map(|i| (i as f32 * 0.01).sin() * 0.5).collect()
}

/// Every factory preset drives the engine to finite, non-silent output.
#[test]
fn test_factory_presets_process_audio() {
    for preset in factory_presets() {
        let params = preset
            .to_params()
            .unwrap_or_else(|e| panic!("'{}' invalid: {e}", preset.name));
        let mut engine = ModulatedDelayEngine::with_params(48000.0, 2, params);

        let mut left = test_signal(4096);
        let mut right = test_signal(4096);
        engine.process_in_place(&mut [&mut left, &mut right]);

        assert!(
            left.iter().chain(&right).all(|s| s.is_finite()),
            "'{}' produced non-finite output",
            preset.name
        );
        assert!(left.iter().any(|&s| s != 0.0), "'{}' is silent", preset.name);
    }
}

/// A preset saved to disk loads back to the same parameters.
#[test]
fn test_save_load_round_trip() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nested").join("wide.toml");

    let params = get_factory_preset("stereo-wide").unwrap().to_params().unwrap();
    let preset = Preset::from_params("Wide Copy", &params).with_sample_rate(44100);
    preset.save(&path).unwrap();

    let loaded = Preset::load(&path).unwrap();
    assert_eq!(loaded, preset);
    assert_eq!(loaded.to_params().unwrap(), params);

    let by_name = load_preset_from("wide", &temp.path().join("nested")).unwrap();
    assert_eq!(by_name.name, "Wide Copy");
}

/// A hand-written file with mistakes reports every problem.
#[test]
fn test_bad_preset_file_reports_all_errors() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("bad.toml");
    std::fs::write(
        &path,
        "name = \"Bad\"\n[params]\nfeedback = 1.2\nwaveform = \"noise\"\nflavour = 3\n",
    )
    .unwrap();

    let err = Preset::load(&path).unwrap().to_params().unwrap_err();
    match err {
        ConfigError::Validation(ValidationError::Multiple(errors)) => {
            assert_eq!(errors.len(), 3);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_missing_file() {
    let err = Preset::load("/nonexistent/dir/preset.toml").unwrap_err();
    assert!(matches!(err, ConfigError::ReadFile { .. }));
}

/// State blobs restore the parameter set, and a fresh engine built from the
/// restored set renders identically.
#[test]
fn test_state_restore_reproduces_output() {
    let params = FlangerParams::default().with_feedback(0.6).with_rate(2.0);
    let bytes = to_state_bytes(&params).unwrap();
    let restored = from_state_bytes(&bytes).unwrap();

    let input = test_signal(2048);
    let mut a = input.clone();
    let mut b = input;
    ModulatedDelayEngine::with_params(44100.0, 1, params).process_in_place(&mut [&mut a]);
    ModulatedDelayEngine::with_params(44100.0, 1, restored).process_in_place(&mut [&mut b]);
    assert_eq!(a, b);
}
