//! Preset listing, inspection and export.

use clap::Args;
use std::path::PathBuf;
use sweep_config::{
    Preset, factory_presets, factory_preset_names, list_user_presets, load_preset,
    preset_name_from_path, user_presets_dir,
};
use sweep_core::{FlangerParam, FlangerParams, ParameterInfo};

#[derive(Args)]
pub struct PresetsArgs {
    /// Preset to show: a factory id, a user preset name or a file path
    #[arg(value_name = "NAME")]
    name: Option<String>,

    /// Write the resolved preset, with every parameter filled in, to this TOML file
    #[arg(long, value_name = "PATH", requires = "name")]
    export: Option<PathBuf>,
}

pub fn run(args: PresetsArgs) -> anyhow::Result<()> {
    let Some(name) = args.name else {
        list();
        return Ok(());
    };

    let preset = load_preset(&name)?;
    let params = preset.to_params()?;
    tracing::debug!(preset = %preset.name, "resolved preset");

    match args.export {
        Some(path) => {
            let mut exported =
                Preset::from_params(preset.name.clone(), &params).with_sample_rate(preset.sample_rate);
            exported.description = preset.description.clone();
            exported.save(&path)?;
            println!("Exported '{}' to {}", preset.name, path.display());
        }
        None => show(&preset, &params),
    }
    Ok(())
}

fn list() {
    println!("Factory presets:");
    for (id, preset) in factory_preset_names().into_iter().zip(factory_presets()) {
        println!(
            "  {:<14} {}",
            id,
            preset.description.as_deref().unwrap_or("")
        );
    }

    let user = list_user_presets();
    println!();
    println!("User presets ({}):", user_presets_dir().display());
    if user.is_empty() {
        println!("  (none)");
    }
    for path in user {
        if let Some(name) = preset_name_from_path(&path) {
            println!("  {name}");
        }
    }
}

fn show(preset: &Preset, params: &FlangerParams) {
    println!("{}", preset.name);
    if let Some(description) = &preset.description {
        println!("  {description}");
    }
    println!();
    for param in FlangerParam::ALL {
        let desc = param.descriptor();
        println!(
            "  {:<14} {}",
            desc.name,
            desc.format_value(params.get_param(param.index()))
        );
    }
}
