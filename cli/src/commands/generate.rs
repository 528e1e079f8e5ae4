use std::io::{self, Write};

use color_eyre::eyre::Result;
use prism_theme::generate::ChatTransport;
use prism_theme::{
    render_root_css, PaletteSource, RootStyle, Theme, ThemeGenerator, ThemeRequestError,
    ThemeStore,
};

use crate::config::UserConfig;

pub fn run(config: &UserConfig, prompt: &str, variations: Option<usize>, json: bool) -> Result<()> {
    let generator = ThemeGenerator::new(config.generator_config());
    if !generator.has_api_key() {
        eprintln!("No API key configured, using the fallback palette.");
    }

    let themes = match variations {
        Some(count) => variation_themes(&generator, prompt, count)?,
        None => vec![single_theme(generator, prompt)?],
    };

    let stdout = io::stdout();
    write_themes(&mut stdout.lock(), &themes, json)?;
    Ok(())
}

fn single_theme<P: PaletteSource>(source: P, prompt: &str) -> Result<Theme, ThemeRequestError> {
    let mut store = ThemeStore::new(source, RootStyle::new());
    store.request_ai_theme(prompt).cloned()
}

fn variation_themes<T: ChatTransport>(
    generator: &ThemeGenerator<T>,
    prompt: &str,
    count: usize,
) -> Result<Vec<Theme>, ThemeRequestError> {
    let prompt = prompt.trim();
    if prompt.is_empty() {
        return Err(ThemeRequestError::EmptyPrompt);
    }

    Ok(generator
        .generate_theme_variations(prompt, count)
        .into_iter()
        .enumerate()
        .map(|(i, colors)| Theme {
            id: format!("variation-{}", i + 1),
            name: format!("{} - variation {}", prompt, i + 1),
            colors,
            is_builtin: false,
        })
        .collect())
}

pub fn write_themes<W: Write>(out: &mut W, themes: &[Theme], json: bool) -> Result<()> {
    if json {
        let body = match themes {
            [theme] => serde_json::to_string_pretty(theme)?,
            _ => serde_json::to_string_pretty(themes)?,
        };
        writeln!(out, "{}", body)?;
        return Ok(());
    }

    for (i, theme) in themes.iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        write!(out, "{}", render_root_css(theme))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_theme::{ColorPalette, GeneratorConfig};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_single_theme_from_store() {
        let theme = single_theme(|_: &str| ColorPalette::fallback(), " neon city ").unwrap();
        assert!(theme.id.starts_with("ai-"));
        assert_eq!(theme.name, "Neon city");
        assert!(theme.colors.is_fallback());
    }

    #[test]
    fn test_single_theme_rejects_blank_prompt() {
        let err = single_theme(|_: &str| ColorPalette::fallback(), "   ").unwrap_err();
        assert_eq!(err.to_string(), "Please enter a theme description");
    }

    #[test]
    fn test_variations_without_key_fall_back() {
        let generator = ThemeGenerator::new(GeneratorConfig::default());
        let themes = variation_themes(&generator, "ocean", 2).unwrap();
        let names: Vec<_> = themes.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["ocean - variation 1", "ocean - variation 2"]);
        assert!(themes.iter().all(|t| t.colors.is_fallback()));
    }

    #[test]
    fn test_write_css() {
        let theme = single_theme(|_: &str| ColorPalette::fallback(), "mint").unwrap();
        let mut out = Vec::new();
        write_themes(&mut out, &[theme], false).unwrap();

        let css = String::from_utf8(out).unwrap();
        assert!(css.contains(":root {"));
        assert!(css.contains("  --color-primary: #3B82F6;"));
        assert!(css.contains("  --color-text: #1F2937;"));
    }

    #[test]
    fn test_write_json_single_and_many() {
        let theme = single_theme(|_: &str| ColorPalette::fallback(), "mint").unwrap();

        let mut out = Vec::new();
        write_themes(&mut out, std::slice::from_ref(&theme), true).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["name"], "Mint");
        assert_eq!(value["colors"]["background"], "#FFFFFF");

        let mut out = Vec::new();
        write_themes(&mut out, &[theme.clone(), theme], true).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value.as_array().map(Vec::len), Some(2));
    }
}
