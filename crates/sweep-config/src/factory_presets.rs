//! Factory presets bundled with the sweep library.
//!
//! Embedded as TOML so they go through exactly the same parsing and validation
//! as user preset files.

use crate::Preset;

/// Array of factory preset names for external access.
pub static FACTORY_PRESET_NAMES: &[&str] = &[
    "classic",
    "jet",
    "chorus",
    "vibrato",
    "stereo-wide",
    "metallic",
];

static FACTORY_PRESETS_TOML: &[(&str, &str)] = &[
    ("classic", CLASSIC_PRESET),
    ("jet", JET_PRESET),
    ("chorus", CHORUS_PRESET),
    ("vibrato", VIBRATO_PRESET),
    ("stereo-wide", STEREO_WIDE_PRESET),
    ("metallic", METALLIC_PRESET),
];

/// The engine defaults: gentle sine sweep, no feedback.
const CLASSIC_PRESET: &str = r#"
name = "Classic"
description = "Gentle sine sweep, dry and wet at unity"
sample_rate = 48000

[params]
delay_ms = 2.5
sweep_ms = 10.0
depth = 1.0
mix = 0.5
waveform = "sine"
interpolation = "linear"
feedback = 0.0
rate_hz = 0.2
stereo = false
"#;

const JET_PRESET: &str = r#"
name = "Jet"
description = "Slow, deep triangle sweep with strong resonance"
sample_rate = 48000

[params]
delay_ms = 1.0
sweep_ms = 6.0
depth = 1.0
mix = 0.5
waveform = "triangle"
interpolation = "cubic"
feedback = 0.85
rate_hz = 0.1
stereo = false
"#;

const CHORUS_PRESET: &str = r#"
name = "Chorus"
description = "Longer delay with a shallow sweep for doubling"
sample_rate = 48000

[params]
delay_ms = 20.0
sweep_ms = 5.0
depth = 0.8
mix = 0.5
waveform = "sine"
interpolation = "cubic"
feedback = 0.0
rate_hz = 0.8
stereo = true
"#;

/// Fully wet: pitch wobble only.
const VIBRATO_PRESET: &str = r#"
name = "Vibrato"
description = "Wet signal only, producing pitch modulation"
sample_rate = 48000

[params]
delay_ms = 3.0
sweep_ms = 3.0
depth = 1.0
mix = 1.0
waveform = "sine"
interpolation = "cubic"
feedback = 0.0
rate_hz = 5.0
stereo = false
"#;

const STEREO_WIDE_PRESET: &str = r#"
name = "Stereo Wide"
description = "Quarter-cycle offset between channels for a wide image"
sample_rate = 48000

[params]
delay_ms = 4.0
sweep_ms = 8.0
depth = 1.0
mix = 0.5
waveform = "triangle"
interpolation = "quadratic"
feedback = 0.4
rate_hz = 0.3
stereo = true
"#;

const METALLIC_PRESET: &str = r#"
name = "Metallic"
description = "Short delay, negative feedback, hard square steps"
sample_rate = 48000

[params]
delay_ms = 0.5
sweep_ms = 1.5
depth = 1.0
mix = 0.5
waveform = "square"
interpolation = "linear"
feedback = -0.9
rate_hz = 2.0
stereo = false
"#;

/// Get all factory presets.
///
/// # Example
///
/// ```rust
/// use sweep_config::factory_presets;
///
/// for preset in factory_presets() {
///     println!("{}: {}", preset.name, preset.description.as_deref().unwrap_or(""));
/// }
/// ```
pub fn factory_presets() -> Vec<Preset> {
    FACTORY_PRESETS_TOML
        .iter()
        .filter_map(|(_, toml)| Preset::from_toml(toml).ok())
        .collect()
}

/// Get a factory preset by identifier or display name (case-insensitive).
///
/// # Example
///
/// ```rust
/// use sweep_config::get_factory_preset;
///
/// assert!(get_factory_preset("jet").is_some());
/// assert!(get_factory_preset("Stereo Wide").is_some());
/// assert!(get_factory_preset("nope").is_none());
/// ```
pub fn get_factory_preset(name: &str) -> Option<Preset> {
    if let Some((_, toml)) = FACTORY_PRESETS_TOML
        .iter()
        .find(|(id, _)| id.eq_ignore_ascii_case(name))
    {
        return Preset::from_toml(toml).ok();
    }

    factory_presets()
        .into_iter()
        .find(|preset| preset.name.eq_ignore_ascii_case(name))
}

/// Get the identifiers of all factory presets.
pub fn factory_preset_names() -> Vec<&'static str> {
    FACTORY_PRESETS_TOML.iter().map(|(name, _)| *name).collect()
}

/// Check if a name refers to a factory preset.
///
/// ```rust
/// use sweep_config::is_factory_preset;
///
/// assert!(is_factory_preset("Metallic"));
/// assert!(!is_factory_preset("my_custom_preset"));
/// ```
pub fn is_factory_preset(name: &str) -> bool {
    get_factory_preset(name).is_some()
}
