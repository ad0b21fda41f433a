//! Presets and persisted state for the sweep flanger.
//!
//! # Features
//!
//! - **Preset files**: TOML presets with human-friendly keys and units
//! - **Validation**: strict checking of preset keys, formats and ranges
//! - **State blobs**: versioned JSON round-trip of the parameter set
//! - **Paths**: platform-specific user preset directory and lookup
//! - **Factory presets**: built-in settings that are always available
//!
//! # Example
//!
//! ```rust,no_run
//! use sweep_config::{Preset, load_preset, user_presets_dir};
//!
//! // Resolve a name through user presets, then factory presets
//! let params = load_preset("jet").unwrap().to_params().unwrap();
//!
//! // Save a tweaked copy
//! let mine = Preset::from_params("My Jet", &params.with_rate(0.3))
//!     .with_description("Slightly faster jet");
//! mine.save(user_presets_dir().join("my-jet.toml")).unwrap();
//! ```

mod error;
mod preset;
mod state;

/// Platform-specific preset paths and lookup.
pub mod paths;

/// Preset keys, values and validation.
pub mod validation;

/// Factory presets bundled with the library.
pub mod factory_presets;

pub use error::ConfigError;
pub use factory_presets::{
    FACTORY_PRESET_NAMES, factory_preset_names, factory_presets, get_factory_preset,
    is_factory_preset,
};
pub use paths::{
    ensure_user_presets_dir, find_preset, find_preset_in, list_presets_in, list_user_presets,
    load_preset, load_preset_from, preset_name_from_path, user_presets_dir,
};
pub use preset::Preset;
pub use state::{STATE_VERSION, from_state_bytes, to_state_bytes};
pub use validation::{
    PRESET_KEYS, ParamValue, PresetKey, ValidationError, ValidationResult, key_for, preset_key,
    validate_param, validate_params, values_from_params,
};
