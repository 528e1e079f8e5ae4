use std::fs;
use std::io::{self, Write};
use std::path::Path;

use color_eyre::eyre::{eyre, Result};
use prism_theme::{
    check_theme_files, generate_theme_toml, get_all_themes, get_theme_by_id, render_root_css,
    Theme,
};

use crate::cli::ThemeCommands;
use crate::config;

pub fn run(command: Option<ThemeCommands>) -> Result<()> {
    let themes_dir = config::themes_dir();

    let cmd = command.unwrap_or(ThemeCommands::List {
        builtin: false,
        user: false,
        json: false,
    });

    match cmd {
        ThemeCommands::List { builtin, user, json } => {
            let themes: Vec<_> = get_all_themes(Some(&themes_dir))
                .into_iter()
                .filter(|t| match (builtin, user) {
                    (true, false) => t.is_builtin,
                    (false, true) => !t.is_builtin,
                    _ => true,
                })
                .collect();

            let stdout = io::stdout();
            let mut out = stdout.lock();
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&themes)?)?;
            } else {
                write_table(&mut out, &themes)?;
            }
        }
        ThemeCommands::Check => {
            let results = check_theme_files(&themes_dir);
            if results.is_empty() {
                println!("No user themes found in {}", themes_dir.display());
                println!("Create one with:");
                println!("  prism theme create <name>");
                return Ok(());
            }

            let mut failures = 0;
            for (path, result) in &results {
                let file = path.file_name().unwrap_or(path.as_os_str()).to_string_lossy();
                match result {
                    Ok(theme) => println!("  ok     {} ({})", file, theme.name),
                    Err(e) => {
                        failures += 1;
                        println!("  error  {}: {}", file, e);
                    }
                }
            }

            println!();
            println!("{} checked, {} with errors", results.len(), failures);
            if failures > 0 {
                std::process::exit(1);
            }
        }
        ThemeCommands::Css { id } => {
            let theme = get_theme_by_id(&id, Some(&themes_dir))
                .ok_or_else(|| eyre!("Theme '{}' not found", id))?;
            print!("{}", render_root_css(&theme));
        }
        ThemeCommands::Create { name, base } => {
            let theme_path = create_theme(&themes_dir, &name, base.as_deref())?;
            println!("Created theme '{}' at: {}", name, theme_path.display());
            println!("\nEdit the file to customize colors, then run `prism theme check`.");
        }
        ThemeCommands::Open => {
            if !themes_dir.exists() {
                fs::create_dir_all(&themes_dir)?;
            }

            #[cfg(target_os = "macos")]
            {
                std::process::Command::new("open")
                    .arg(&themes_dir)
                    .status()?;
            }

            println!("Themes directory: {}", themes_dir.display());
        }
    }

    Ok(())
}

fn write_table<W: Write>(out: &mut W, themes: &[Theme]) -> io::Result<()> {
    writeln!(
        out,
        "{:<18} {:<20} {:<9} {:<9} {:<9} KIND",
        "ID", "NAME", "PRIMARY", "BG", "TEXT"
    )?;
    for theme in themes {
        writeln!(
            out,
            "{:<18} {:<20} {:<9} {:<9} {:<9} {}",
            theme.id,
            theme.name,
            theme.colors.primary,
            theme.colors.background,
            theme.colors.text,
            if theme.is_builtin { "builtin" } else { "user" }
        )?;
    }
    Ok(())
}

fn file_stem_for(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

fn create_theme(themes_dir: &Path, name: &str, base: Option<&str>) -> Result<std::path::PathBuf> {
    let stem = file_stem_for(name);
    if stem.is_empty() {
        return Err(eyre!("Theme name '{}' has no usable characters", name));
    }

    fs::create_dir_all(themes_dir)?;
    let theme_path = themes_dir.join(format!("{}.toml", stem));
    if theme_path.exists() {
        return Err(eyre!(
            "Theme '{}' already exists at: {}",
            name,
            theme_path.display()
        ));
    }

    let base_id = base.unwrap_or("default");
    let base_theme = get_theme_by_id(base_id, Some(themes_dir))
        .ok_or_else(|| eyre!("Base theme '{}' not found", base_id))?;

    fs::write(&theme_path, generate_theme_toml(name, &base_theme.colors)?)?;
    Ok(theme_path)
}
