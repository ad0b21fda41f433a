//! Preset parameter names, values and validation.
//!
//! Preset files name parameters with human-friendly keys and units
//! (`delay_ms`, `sweep_ms`, `rate_hz`, ...). [`PRESET_KEYS`] maps each key to
//! the engine's [`FlangerParam`] and its unit scale. Unlike the DSP core, which
//! silently clamps, preset loading is strict: unknown keys, malformed values
//! and out-of-range numbers are reported so the user can fix the file.
//!
//! # Example
//!
//! ```rust
//! use sweep_config::{ParamValue, validate_param};
//! use sweep_core::FlangerParam;
//!
//! let (param, value) = validate_param("delay_ms", &ParamValue::Number(2.5)).unwrap();
//! assert_eq!(param, FlangerParam::Delay);
//! assert!((value - 0.0025).abs() < 1e-9);
//!
//! assert!(validate_param("delay_ms", &ParamValue::Number(500.0)).is_err());
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use sweep_core::{
    FlangerParam, FlangerParams, Interpolation, LfoWaveform, ParamDescriptor, ParameterInfo,
};
use thiserror::Error;

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// Unknown parameter name.
    #[error("unknown parameter '{param}'")]
    UnknownParameter {
        /// Name of the unrecognized parameter.
        param: String,
    },

    /// Parameter value out of range.
    #[error("parameter '{param}' value {value} out of range [{min}, {max}]")]
    OutOfRange {
        /// Name of the parameter.
        param: String,
        /// The value that was out of range.
        value: f32,
        /// Minimum allowed value.
        min: f32,
        /// Maximum allowed value.
        max: f32,
    },

    /// Invalid parameter format.
    #[error("invalid format for parameter '{param}': {reason}")]
    InvalidFormat {
        /// Name of the parameter.
        param: String,
        /// Description of the format error.
        reason: String,
    },

    /// Multiple validation errors.
    #[error("multiple validation errors: {}", .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; "))]
    Multiple(Vec<ValidationError>),
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// A parameter value as written in a preset file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// `true` / `false`, used for toggles.
    Bool(bool),
    /// Any number, integer or float.
    Number(f64),
    /// Selector names, or numbers written as strings.
    Text(String),
}

impl From<f32> for ParamValue {
    fn from(value: f32) -> Self {
        ParamValue::Number(f64::from(value))
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

/// A preset file key and the engine parameter it controls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PresetKey {
    /// Key as written in preset files.
    pub key: &'static str,
    /// Engine parameter.
    pub param: FlangerParam,
    /// Preset units per natural unit (1000 for milliseconds).
    pub scale: f32,
}

impl PresetKey {
    /// Descriptor of the underlying parameter.
    pub fn descriptor(&self) -> ParamDescriptor {
        self.param.descriptor()
    }

    /// Smallest value accepted in preset units.
    pub fn min(&self) -> f32 {
        self.descriptor().min * self.scale
    }

    /// Largest value accepted in preset units.
    pub fn max(&self) -> f32 {
        self.descriptor().max * self.scale
    }
}

/// Every preset key, in parameter index order.
pub const PRESET_KEYS: &[PresetKey] = &[
    PresetKey {
        key: "delay_ms",
        param: FlangerParam::Delay,
        scale: 1000.0,
    },
    PresetKey {
        key: "sweep_ms",
        param: FlangerParam::Sweep,
        scale: 1000.0,
    },
    PresetKey {
        key: "depth",
        param: FlangerParam::Depth,
        scale: 1.0,
    },
    PresetKey {
        key: "mix",
        param: FlangerParam::Mix,
        scale: 1.0,
    },
    PresetKey {
        key: "waveform",
        param: FlangerParam::Waveform,
        scale: 1.0,
    },
    PresetKey {
        key: "interpolation",
        param: FlangerParam::Interpolation,
        scale: 1.0,
    },
    PresetKey {
        key: "feedback",
        param: FlangerParam::Feedback,
        scale: 1.0,
    },
    PresetKey {
        key: "rate_hz",
        param: FlangerParam::Rate,
        scale: 1.0,
    },
    PresetKey {
        key: "stereo",
        param: FlangerParam::Stereo,
        scale: 1.0,
    },
];

/// Looks up a preset key (case-insensitive).
pub fn preset_key(name: &str) -> Option<&'static PresetKey> {
    PRESET_KEYS
        .iter()
        .find(|k| k.key.eq_ignore_ascii_case(name.trim()))
}

/// Preset key for an engine parameter.
pub fn key_for(param: FlangerParam) -> &'static PresetKey {
    &PRESET_KEYS[param.index()]
}

fn invalid(param: &str, reason: impl Into<String>) -> ValidationError {
    ValidationError::InvalidFormat {
        param: param.to_string(),
        reason: reason.into(),
    }
}

fn number(key: &PresetKey, value: &ParamValue) -> ValidationResult<f64> {
    let n = match value {
        ParamValue::Number(n) => *n,
        ParamValue::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| invalid(key.key, format!("'{s}' is not a number")))?,
        ParamValue::Bool(_) => return Err(invalid(key.key, "expected a number")),
    };
    if !n.is_finite() {
        return Err(invalid(key.key, "value must be finite"));
    }
    let (min, max) = (f64::from(key.min()), f64::from(key.max()));
    if n < min || n > max {
        return Err(ValidationError::OutOfRange {
            param: key.key.to_string(),
            value: n as f32,
            min: key.min(),
            max: key.max(),
        });
    }
    Ok(n)
}

fn selector(
    key: &PresetKey,
    value: &ParamValue,
    parse: impl Fn(&str) -> Option<u8>,
    labels: &[&str],
) -> ValidationResult<f32> {
    match value {
        ParamValue::Text(s) => parse(s).map(f32::from).ok_or_else(|| {
            let names: Vec<String> = labels.iter().map(|l| l.to_lowercase()).collect();
            invalid(
                key.key,
                format!("'{s}' is not one of {}", names.join(", ")),
            )
        }),
        ParamValue::Number(n) if n.fract() != 0.0 => {
            Err(invalid(key.key, "selector index must be an integer"))
        }
        ParamValue::Number(_) => number(key, value).map(|n| n as f32),
        ParamValue::Bool(_) => Err(invalid(key.key, "expected a name or index")),
    }
}

/// Validates one preset entry, returning the parameter and its value in
/// natural units.
pub fn validate_param(name: &str, value: &ParamValue) -> ValidationResult<(FlangerParam, f32)> {
    let key = preset_key(name).ok_or_else(|| ValidationError::UnknownParameter {
        param: name.to_string(),
    })?;

    let natural = match key.param {
        FlangerParam::Waveform => selector(
            key,
            value,
            |s| LfoWaveform::from_name(s).map(LfoWaveform::index),
            LfoWaveform::LABELS,
        )?,
        FlangerParam::Interpolation => selector(
            key,
            value,
            |s| Interpolation::from_name(s).map(Interpolation::index),
            Interpolation::LABELS,
        )?,
        FlangerParam::Stereo => match value {
            ParamValue::Bool(b) => f32::from(u8::from(*b)),
            ParamValue::Number(n) if *n == 0.0 || *n == 1.0 => *n as f32,
            _ => return Err(invalid(key.key, "expected true or false")),
        },
        _ => (number(key, value)? / f64::from(key.scale)) as f32,
    };

    Ok((key.param, natural))
}

/// Validates a full parameter table, starting from the defaults.
///
/// All entries are checked; a single failure is returned as-is, several are
/// wrapped in [`ValidationError::Multiple`].
pub fn validate_params<'a>(
    entries: impl IntoIterator<Item = (&'a String, &'a ParamValue)>,
) -> ValidationResult<FlangerParams> {
    let mut params = FlangerParams::default();
    let mut errors = Vec::new();

    for (name, value) in entries {
        match validate_param(name, value) {
            Ok((param, natural)) => params.set_param(param.index(), natural),
            Err(e) => errors.push(e),
        }
    }

    match errors.len() {
        0 => Ok(params),
        1 => Err(errors.remove(0)),
        _ => Err(ValidationError::Multiple(errors)),
    }
}

/// Rounds to six decimals so exported presets read cleanly.
fn tidy(value: f32, scale: f32) -> f64 {
    let v = f64::from(value) * f64::from(scale);
    (v * 1e6).round() / 1e6
}

/// Converts parameters to a preset table in preset units.
pub fn values_from_params(params: &FlangerParams) -> BTreeMap<String, ParamValue> {
    PRESET_KEYS
        .iter()
        .map(|key| {
            let value = match key.param {
                FlangerParam::Waveform => {
                    ParamValue::Text(params.waveform().label().to_lowercase())
                }
                FlangerParam::Interpolation => {
                    ParamValue::Text(params.interpolation().label().to_lowercase())
                }
                FlangerParam::Stereo => ParamValue::Bool(params.stereo()),
                param => ParamValue::Number(tidy(params.get_param(param.index()), key.scale)),
            };
            (key.key.to_string(), value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(entries: &[(&str, ParamValue)]) -> BTreeMap<String, ParamValue> {
        entries
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn keys_follow_parameter_order() {
        for (i, key) in PRESET_KEYS.iter().enumerate() {
            assert_eq!(key.param.index(), i);
            assert_eq!(key_for(key.param).key, key.key);
        }
        assert_eq!(PRESET_KEYS.len(), FlangerParam::COUNT);
    }

    #[test]
    fn millisecond_keys_convert_to_seconds() {
        let (param, value) = validate_param("sweep_ms", &ParamValue::Number(10.0)).unwrap();
        assert_eq!(param, FlangerParam::Sweep);
        assert!((value - 0.01).abs() < 1e-7);
    }

    #[test]
    fn numeric_strings_accepted() {
        let (_, value) = validate_param("feedback", &"0.5".into()).unwrap();
        assert_eq!(value, 0.5);
        assert!(matches!(
            validate_param("feedback", &"lots".into()),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn out_of_range_reports_preset_units() {
        let err = validate_param("delay_ms", &ParamValue::Number(80.0)).unwrap_err();
        match err {
            ValidationError::OutOfRange { param, max, .. } => {
                assert_eq!(param, "delay_ms");
                assert!((max - 50.0).abs() < 1e-3);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn selectors_accept_names_and_indices() {
        assert_eq!(
            validate_param("waveform", &"Triangle".into()).unwrap().1,
            1.0
        );
        assert_eq!(
            validate_param("interpolation", &ParamValue::Number(2.0)).unwrap().1,
            2.0
        );
        assert!(validate_param("waveform", &"noise".into()).is_err());
        assert!(validate_param("waveform", &ParamValue::Number(1.5)).is_err());
        assert!(validate_param("interpolation", &ParamValue::Number(3.0)).is_err());
    }

    #[test]
    fn stereo_accepts_bool_and_binary_numbers() {
        assert_eq!(validate_param("stereo", &true.into()).unwrap().1, 1.0);
        assert_eq!(
            validate_param("stereo", &ParamValue::Number(0.0)).unwrap().1,
            0.0
        );
        assert!(validate_param("stereo", &ParamValue::Number(0.5)).is_err());
    }

    #[test]
    fn non_finite_rejected() {
        assert!(matches!(
            validate_param("rate_hz", &ParamValue::Number(f64::NAN)),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn unknown_key() {
        assert_eq!(
            validate_param("resonance", &ParamValue::Number(1.0)),
            Err(ValidationError::UnknownParameter {
                param: "resonance".to_string()
            })
        );
    }

    #[test]
    fn validate_params_collects_every_error() {
        let entries = table(&[
            ("delay_ms", ParamValue::Number(999.0)),
            ("colour", ParamValue::Number(1.0)),
            ("rate_hz", ParamValue::Number(1.0)),
        ]);
        match validate_params(&entries) {
            Err(ValidationError::Multiple(errors)) => assert_eq!(errors.len(), 2),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn validate_params_applies_over_defaults() {
        let entries = table(&[
            ("rate_hz", ParamValue::Number(1.5)),
            ("waveform", "square".into()),
        ]);
        let params = validate_params(&entries).unwrap();
        assert_eq!(params.rate(), 1.5);
        assert_eq!(params.waveform(), LfoWaveform::Square);
        assert_eq!(params.delay(), FlangerParams::default().delay());
    }

    #[test]
    fn exported_values_validate_back() {
        let params = FlangerParams::default()
            .with_delay(0.0031)
            .with_feedback(-0.4)
            .with_interpolation(Interpolation::Cubic)
            .with_stereo(true);
        let values = values_from_params(&params);
        assert_eq!(values["delay_ms"], ParamValue::Number(3.1));
        assert_eq!(values["interpolation"], ParamValue::Text("cubic".to_string()));

        let back = validate_params(&values).unwrap();
        assert!((back.delay() - 0.0031).abs() < 1e-7);
        assert_eq!(back.feedback(), -0.4);
        assert_eq!(back.interpolation(), Interpolation::Cubic);
        assert!(back.stereo());
    }

    #[test]
    fn multiple_display_joins_messages() {
        let err = ValidationError::Multiple(vec![
            ValidationError::UnknownParameter {
                param: "a".to_string(),
            },
            ValidationError::UnknownParameter {
                param: "b".to_string(),
            },
        ]);
        assert_eq!(
            err.to_string(),
            "multiple validation errors: unknown parameter 'a'; unknown parameter 'b'"
        );
    }
}
