//! CLI subcommands.

pub mod params;
pub mod presets;
pub mod process;
