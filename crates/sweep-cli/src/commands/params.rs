//! Parameter listing command.

use sweep_config::key_for;
use sweep_core::{FlangerParam, ParamDescriptor};

fn range_text(desc: &ParamDescriptor) -> String {
    if desc.is_stepped() {
        desc.step_labels.join(" | ")
    } else {
        format!(
            "{} .. {}",
            desc.format_value(desc.min),
            desc.format_value(desc.max)
        )
    }
}

pub fn run() -> anyhow::Result<()> {
    println!(
        "{:>2}  {:<14} {:<14} {:<36} {}",
        "#", "Name", "Preset key", "Range", "Default"
    );
    for param in FlangerParam::ALL {
        let desc = param.descriptor();
        println!(
            "{:>2}  {:<14} {:<14} {:<36} {}",
            param.index(),
            desc.name,
            key_for(param).key,
            range_text(&desc),
            desc.format_value(desc.default)
        );
    }
    Ok(())
}
