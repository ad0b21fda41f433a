//! Platform-specific preset locations and preset lookup.
//!
//! # Directory Structure
//!
//! - **User presets**: `~/.config/sweep/presets/` (Linux),
//!   `~/Library/Application Support/sweep/presets/` (macOS),
//!   `%APPDATA%\sweep\presets\` (Windows)
//!
//! # Lookup Order
//!
//! [`load_preset`] resolves a name by trying, in order:
//! 1. the name as a file path,
//! 2. `<name>.toml` in the user presets directory,
//! 3. the factory presets.

use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::factory_presets::get_factory_preset;
use crate::preset::Preset;

/// Application name used for directory paths.
const APP_NAME: &str = "sweep";

/// Subdirectory name for presets.
const PRESETS_SUBDIR: &str = "presets";

/// Returns the user-specific presets directory.
///
/// Falls back to `./sweep/presets` if the platform config directory cannot be
/// determined.
pub fn user_presets_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
        .join(PRESETS_SUBDIR)
}

/// Ensure the user presets directory exists.
pub fn ensure_user_presets_dir() -> Result<PathBuf, ConfigError> {
    let dir = user_presets_dir();
    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| ConfigError::create_dir(&dir, e))?;
    }
    Ok(dir)
}

fn preset_file_name(name: &str) -> String {
    if name.ends_with(".toml") {
        name.to_string()
    } else {
        format!("{name}.toml")
    }
}

/// Finds a preset file by path, or by name inside `dir`.
pub fn find_preset_in(name: &str, dir: &Path) -> Option<PathBuf> {
    let path = PathBuf::from(name);
    if path.is_file() {
        return Some(path);
    }

    let candidate = dir.join(preset_file_name(name));
    candidate.is_file().then_some(candidate)
}

/// Finds a preset file by path or by name in the user presets directory.
pub fn find_preset(name: &str) -> Option<PathBuf> {
    find_preset_in(name, &user_presets_dir())
}

/// Loads a preset by path or name, searching `dir` and then the factory
/// presets.
pub fn load_preset_from(name: &str, dir: &Path) -> Result<Preset, ConfigError> {
    if let Some(path) = find_preset_in(name, dir) {
        return Preset::load(path);
    }
    get_factory_preset(name).ok_or_else(|| ConfigError::PresetNotFound(name.to_string()))
}

/// Loads a preset by path or name, searching the user presets directory and
/// then the factory presets.
///
/// # Example
///
/// ```rust
/// use sweep_config::load_preset;
///
/// let preset = load_preset("jet").unwrap();
/// assert_eq!(preset.name, "Jet");
/// ```
pub fn load_preset(name: &str) -> Result<Preset, ConfigError> {
    load_preset_from(name, &user_presets_dir())
}

/// Lists `.toml` files in `dir`, sorted. Missing or unreadable directories
/// yield an empty list.
pub fn list_presets_in(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut presets: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "toml"))
        .collect();
    presets.sort();
    presets
}

/// Lists preset files in the user presets directory.
pub fn list_user_presets() -> Vec<PathBuf> {
    list_presets_in(&user_presets_dir())
}

/// Get the preset name from a file path (the file stem).
///
/// ```rust
/// use sweep_config::preset_name_from_path;
/// use std::path::Path;
///
/// assert_eq!(preset_name_from_path(Path::new("/p/jet.toml")), Some("jet".to_string()));
/// ```
pub fn preset_name_from_path(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
}
