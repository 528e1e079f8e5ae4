use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::types::{ColorPalette, Theme};
use crate::validation::{check_palette, ValidationError};

#[derive(Debug, Error)]
pub enum ThemeFileError {
    #[error("Unreadable theme file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid TOML: {0}")]
    InvalidToml(#[from] toml::de::Error),
    #[error("Unreadable colors table: {0}")]
    Colors(#[from] serde_json::Error),
    #[error(transparent)]
    Palette(#[from] ValidationError),
}

#[derive(Debug, Deserialize)]
struct ThemeFile {
    name: String,
    colors: toml::Table,
}

#[derive(Serialize)]
struct ThemeFileOut<'a> {
    name: &'a str,
    colors: &'a ColorPalette,
}

/// Parse a user theme:
///
/// ```toml
/// name = "Dusk"
///
/// [colors]
/// primary = "#F97316"
/// secondary = "#7C3AED"
/// accent = "#FACC15"
/// background = "#1E1B4B"
/// text = "#F5F3FF"
/// ```
///
/// Colors go through the same checks as generated palettes, except that a
/// bad file is rejected instead of being replaced by the fallback.
pub fn parse_theme_toml(id: &str, content: &str) -> Result<Theme, ThemeFileError> {
    let file: ThemeFile = toml::from_str(content)?;
    let raw = serde_json::to_value(&file.colors)?;
    let colors = check_palette(&raw)?;

    Ok(Theme {
        id: id.to_string(),
        name: file.name,
        colors,
        is_builtin: false,
    })
}

/// Render a user theme file for `name` with the given colors.
pub fn generate_theme_toml(
    name: &str,
    colors: &ColorPalette,
) -> Result<String, toml::ser::Error> {
    toml::to_string(&ThemeFileOut { name, colors })
}

/// Parse every `*.toml` file in `dir`, ordered by file name.
pub fn check_theme_files(dir: &Path) -> Vec<(PathBuf, Result<Theme, ThemeFileError>)> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut paths: Vec<_> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|e| e == "toml"))
        .collect();
    paths.sort();

    paths
        .into_iter()
        .map(|path| {
            let id = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("unknown")
                .to_string();
            let result = fs::read_to_string(&path)
                .map_err(ThemeFileError::from)
                .and_then(|content| parse_theme_toml(&id, &content));
            (path, result)
        })
        .collect()
}

/// Load every valid theme in `dir`. Broken files are logged and skipped.
pub fn load_themes_from_dir(dir: &Path) -> Vec<Theme> {
    check_theme_files(dir)
        .into_iter()
        .filter_map(|(path, result)| match result {
            Ok(theme) => {
                debug!(id = %theme.id, "Loaded user theme");
                Some(theme)
            }
            Err(e) => {
                warn!("Skipping theme {:?}: {}", path, e);
                None
            }
        })
        .collect()
}
