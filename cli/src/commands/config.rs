use color_eyre::eyre::Result;

use crate::config::{config_path, themes_dir, UserConfig};
use crate::logging::log_dir;

pub fn run(path: bool, reset: bool) -> Result<()> {
    let config_file = config_path();

    if path {
        println!("{}", config_file.display());
        return Ok(());
    }

    if reset {
        let config = UserConfig::default();
        config.save()?;
        println!("Config reset to defaults at: {}", config_file.display());
        return Ok(());
    }

    let config = UserConfig::load();
    let generator = config.generator_config();

    println!("Config file: {}", config_file.display());
    println!("Themes: {}", themes_dir().display());
    println!("Logs: {}", log_dir().display());
    println!(
        "API key: {}",
        if generator.api_key.is_some() {
            "set"
        } else {
            "not set (fallback palette will be used)"
        }
    );
    println!();

    let mut shown = config;
    if shown.api_key.is_some() {
        shown.api_key = Some("<hidden>".to_string());
    }
    println!("{}", toml::to_string_pretty(&shown)?);

    Ok(())
}
