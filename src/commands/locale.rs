use anyhow::Result;
use datemask_core::Config;

pub fn run(config: &Config) -> Result<()> {
    let locale = config.locale();
    println!("{}", serde_json::to_string_pretty(&locale)?);
    Ok(())
}
