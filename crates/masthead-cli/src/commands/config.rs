use std::path::Path;

use anyhow::{bail, Result};

use masthead_core::AppConfig;

pub fn show(config: &AppConfig, path: Option<&Path>) -> Result<()> {
    let default_path = AppConfig::config_path();
    let path = path.unwrap_or(&default_path);
    let origin = if path.exists() { "" } else { " (not found, using defaults)" };

    println!("# {}{}\n", path.display(), origin);
    print!("{}", config.to_toml()?);
    Ok(())
}

pub fn init(force: bool) -> Result<()> {
    let path = AppConfig::config_path();
    if path.exists() && !force {
        bail!(
            "{} already exists.\nUse `masthead config init --force` to overwrite it.",
            path.display()
        );
    }

    AppConfig::default().save()?;
    println!("Wrote default configuration to {}", path.display());
    Ok(())
}
