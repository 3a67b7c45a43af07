use std::path::Path;

use anyhow::Result;
use chrono_tz::Tz;
use datemask_core::Config;
use owo_colors::OwoColorize;

pub fn run(config_path: &Path, config: &Config, tz: &Tz) -> Result<()> {
    let exists = if config_path.exists() {
        String::new()
    } else {
        format!(" {}", "(not found, using defaults)".dimmed())
    };

    println!("{}", "Paths".bold());
    println!("  Config:    {}{}", config_path.display(), exists);

    println!();
    println!("{}", "Settings".bold());
    println!("  Timezone:  {}", tz.name());
    println!("  Masks:     {} custom", config.masks.len());
    println!(
        "  Names:     {}",
        if config.i18n.is_some() {
            "custom"
        } else {
            "English"
        }
    );

    Ok(())
}
