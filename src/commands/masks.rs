use anyhow::Result;
use chrono_tz::Tz;
use datemask_core::instant::now_in;
use datemask_core::{DateFormat, FormatOptions};
use owo_colors::OwoColorize;

use crate::render::Render;

pub fn run(format: &DateFormat, tz: &Tz) -> Result<()> {
    let now = now_in(tz);
    let masks = format.masks();
    let width = masks.iter().map(|(name, _)| name.len()).max().unwrap_or(0);

    for (name, mask) in masks.iter() {
        let example = format.format_mask(&now, mask, FormatOptions::default());
        println!(
            "{:<width$}  {}",
            name.bold(),
            mask.render(),
            width = width
        );
        println!("{:<width$}  {}", "", example.green(), width = width);
    }

    Ok(())
}
