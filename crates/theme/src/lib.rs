mod builtin;
pub mod generate;
mod loader;
pub mod store;
pub mod style;
mod types;
pub mod validation;

pub use builtin::builtin_themes;
pub use generate::{GenerateError, GeneratorConfig, PaletteSource, ThemeGenerator};
pub use loader::{
    check_theme_files, generate_theme_toml, load_themes_from_dir, parse_theme_toml, ThemeFileError,
};
pub use store::{ThemeRequestError, ThemeStore};
pub use style::{render_root_css, RootStyle, StyleSink};
pub use types::{Color, ColorPalette, HexColor, PaletteSlot, Theme};

use std::path::Path;

/// Built-in themes followed by any user themes in `user_themes_dir`.
pub fn get_all_themes(user_themes_dir: Option<&Path>) -> Vec<Theme> {
    let mut themes = builtin_themes();
    if let Some(dir) = user_themes_dir {
        for theme in load_themes_from_dir(dir) {
            if themes.iter().any(|t| t.id == theme.id) {
                tracing::warn!(id = %theme.id, "User theme shadows a built-in id, skipping");
                continue;
            }
            themes.push(theme);
        }
    }
    themes
}

pub fn get_theme_by_id(id: &str, user_themes_dir: Option<&Path>) -> Option<Theme> {
    get_all_themes(user_themes_dir)
        .into_iter()
        .find(|t| t.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_user_themes_follow_builtins() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("dusk.toml"),
            "name = \"Dusk\"\n[colors]\nprimary = \"#F97316\"\nsecondary = \"#7C3AED\"\naccent = \"#FACC15\"\nbackground = \"#1E1B4B\"\ntext = \"#F5F3FF\"\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("forest.toml"),
            "name = \"Fake\"\n[colors]\nprimary = \"#F97316\"\nsecondary = \"#7C3AED\"\naccent = \"#FACC15\"\nbackground = \"#1E1B4B\"\ntext = \"#F5F3FF\"\n",
        )
        .unwrap();

        let themes = get_all_themes(Some(dir.path()));
        let ids: Vec<_> = themes.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["default", "forest", "dusk"]);
        assert_eq!(get_theme_by_id("forest", Some(dir.path())).unwrap().name, "Forest Green");
    }
}
