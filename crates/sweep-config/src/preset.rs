//! Preset file format and operations.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use sweep_core::FlangerParams;

use crate::error::ConfigError;
use crate::validation::{ParamValue, validate_params, values_from_params};

/// A named flanger setting.
///
/// Presets are stored as TOML files. Every key in `[params]` is optional and
/// falls back to the engine default; see
/// [`PRESET_KEYS`](crate::validation::PRESET_KEYS) for the accepted names.
///
/// # TOML Format
///
/// ```toml
/// name = "Jet"
/// description = "Slow, deep sweep with strong resonance"
/// sample_rate = 48000
///
/// [params]
/// delay_ms = 1.0
/// sweep_ms = 6.0
/// rate_hz = 0.1
/// feedback = 0.85
/// waveform = "triangle"
/// interpolation = "cubic"
/// stereo = true
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Preset {
    /// Name of the preset.
    pub name: String,

    /// Optional description of the preset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Sample rate hint (defaults to 48000).
    /// The engine is always configured for the actual stream rate.
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    /// Parameter table in preset units.
    #[serde(default)]
    pub params: BTreeMap<String, ParamValue>,
}

fn default_sample_rate() -> u32 {
    48000
}

impl Preset {
    /// Create a preset with an empty parameter table (all defaults).
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            sample_rate: default_sample_rate(),
            params: BTreeMap::new(),
        }
    }

    /// Create a preset holding every value of `params`.
    pub fn from_params(name: impl Into<String>, params: &FlangerParams) -> Self {
        Self {
            params: values_from_params(params),
            ..Self::new(name)
        }
    }

    /// Create a preset with a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the sample rate hint.
    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Set one parameter entry.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Validates the parameter table and builds the engine parameters.
    pub fn to_params(&self) -> Result<FlangerParams, ConfigError> {
        Ok(validate_params(&self.params)?)
    }

    /// Load a preset from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_toml(&content)
    }

    /// Load a preset from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the preset to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Convert the preset to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

impl Default for Preset {
    fn default() -> Self {
        Self::new("Untitled")
    }
}
