//! Palette validation and contrast correction.
//!
//! Palettes arrive as untyped JSON written by a language model, so nothing is
//! trusted until every slot has been checked. A palette either passes as a
//! whole or is replaced by [`ColorPalette::fallback`]; the only repair ever
//! made is swapping an unreadable `text` color.

use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use crate::types::{Color, ColorPalette, HexColor, PaletteSlot};

/// Background/text luminance ratio a palette must exceed.
pub const MIN_LUMINANCE_RATIO: f64 = 1.5;

/// Text color used on light backgrounds.
pub const DARK_TEXT: &str = "#1F2937";
/// Text color used on dark backgrounds.
pub const LIGHT_TEXT: &str = "#FFFFFF";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Missing key in palette: {key}")]
    MissingKey { key: &'static str },
    #[error("Invalid hex color for {key}: {value}")]
    InvalidColor { key: &'static str, value: String },
}

/// Returns true for `#RRGGBB` and `#RGB`, case-insensitive.
pub fn validate_hex_color(value: &str) -> bool {
    HexColor::parse(value).is_some()
}

pub fn has_sufficient_contrast(background: &Color, text: &Color) -> bool {
    // NaN (black on black) compares false and counts as insufficient.
    background.luminance_ratio(text) > MIN_LUMINANCE_RATIO
}

/// Pick a readable text color for the given background.
pub fn adjust_text_for_contrast(background: &Color) -> HexColor {
    if background.luminance() > 0.5 {
        HexColor::literal(DARK_TEXT)
    } else {
        HexColor::literal(LIGHT_TEXT)
    }
}

/// Replace `text` when it cannot be read against `background`.
pub fn ensure_contrast(mut palette: ColorPalette) -> ColorPalette {
    let background = palette.background.rgb();
    if !has_sufficient_contrast(&background, &palette.text.rgb()) {
        let adjusted = adjust_text_for_contrast(&background);
        warn!(
            background = %palette.background,
            text = %palette.text,
            adjusted = %adjusted,
            "Insufficient contrast between background and text colors"
        );
        palette.text = adjusted;
    }
    palette
}

fn slot_color(raw: &Value, slot: PaletteSlot) -> Result<HexColor, ValidationError> {
    let key = slot.key();
    let value = raw.get(key).ok_or(ValidationError::MissingKey { key })?;

    value
        .as_str()
        .and_then(HexColor::parse)
        .ok_or_else(|| ValidationError::InvalidColor {
            key,
            value: value.as_str().map_or_else(|| value.to_string(), str::to_string),
        })
}

/// Check an untyped palette, reporting the first problem found.
///
/// Slots are checked in [`PaletteSlot::ALL`] order. Non-object input has no
/// keys, so it fails on `primary`.
pub fn check_palette(raw: &Value) -> Result<ColorPalette, ValidationError> {
    let palette = ColorPalette {
        primary: slot_color(raw, PaletteSlot::Primary)?,
        secondary: slot_color(raw, PaletteSlot::Secondary)?,
        accent: slot_color(raw, PaletteSlot::Accent)?,
        background: slot_color(raw, PaletteSlot::Background)?,
        text: slot_color(raw, PaletteSlot::Text)?,
    };
    Ok(ensure_contrast(palette))
}

/// Validate an untyped palette, falling back on any problem. Never fails.
pub fn validate_palette(raw: &Value) -> ColorPalette {
    match check_palette(raw) {
        Ok(palette) => palette,
        Err(e) => {
            warn!("{}", e);
            ColorPalette::fallback()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn sunset() -> Value {
        json!({
            "primary": "#FF5733",
            "secondary": "#C70039",
            "accent": "#FFC300",
            "background": "#FFFFFF",
            "text": "#000000"
        })
    }

    #[test]
    fn test_validate_hex_color_valid() {
        assert!(validate_hex_color("#ffffff"));
        assert!(validate_hex_color("#FFFFFF"));
        assert!(validate_hex_color("#1a2B3c"));
        assert!(validate_hex_color("#abc"));
        assert!(validate_hex_color("#ABC"));
    }

    #[test]
    fn test_validate_hex_color_invalid() {
        assert!(!validate_hex_color("ffffff"));
        assert!(!validate_hex_color("  #ffffff  "));
        assert!(!validate_hex_color("#gggggg"));
        assert!(!validate_hex_color("#12345"));
        assert!(!validate_hex_color("#1234567"));
        assert!(!validate_hex_color(""));
        assert!(!validate_hex_color("#"));
    }

    #[test]
    fn test_valid_palette_unchanged() {
        let palette = validate_palette(&sunset());
        assert_eq!(palette.primary, "#FF5733");
        assert_eq!(palette.secondary, "#C70039");
        assert_eq!(palette.accent, "#FFC300");
        assert_eq!(palette.background, "#FFFFFF");
        assert_eq!(palette.text, "#000000");
    }

    #[test]
    fn test_lowercase_preserved() {
        let raw = json!({
            "primary": "#ff5733",
            "secondary": "#c70039",
            "accent": "#ffc300",
            "background": "#0f172a",
            "text": "#f8fafc"
        });
        let palette = validate_palette(&raw);
        assert_eq!(palette.background, "#0f172a");
        assert_eq!(palette.text, "#f8fafc");
    }

    #[test]
    fn test_missing_any_key_falls_back() {
        for slot in PaletteSlot::ALL {
            let mut raw = sunset();
            raw.as_object_mut().unwrap().remove(slot.key());

            assert_eq!(
                check_palette(&raw),
                Err(ValidationError::MissingKey { key: slot.key() })
            );
            assert_eq!(validate_palette(&raw), ColorPalette::fallback());
        }
    }

    #[test]
    fn test_invalid_value_falls_back() {
        for slot in PaletteSlot::ALL {
            for bad in [json!("red"), json!("#12345"), json!(null), json!(0xFFFFFF)] {
                let mut raw = sunset();
                raw[slot.key()] = bad.clone();

                assert!(matches!(
                    check_palette(&raw),
                    Err(ValidationError::InvalidColor { key, .. }) if key == slot.key()
                ));
                assert_eq!(validate_palette(&raw), ColorPalette::fallback());
            }
        }
    }

    #[test]
    fn test_first_failing_key_reported() {
        let raw = json!({
            "primary": "#FF5733",
            "secondary": "nope",
            "background": "#FFFFFF",
            "text": "#000000"
        });
        assert_eq!(
            check_palette(&raw),
            Err(ValidationError::InvalidColor {
                key: "secondary",
                value: "nope".to_string()
            })
        );
    }

    #[test]
    fn test_non_object_falls_back() {
        for raw in [json!([]), json!("palette"), json!(null), json!(42)] {
            assert_eq!(
                check_palette(&raw),
                Err(ValidationError::MissingKey { key: "primary" })
            );
            assert_eq!(validate_palette(&raw), ColorPalette::fallback());
        }
    }

    #[test]
    fn test_low_contrast_on_light_background() {
        let mut raw = sunset();
        raw["background"] = json!("#FFFFFF");
        raw["text"] = json!("#F0F0F0");

        let palette = validate_palette(&raw);
        assert_eq!(palette.text, DARK_TEXT);
        assert_eq!(palette.primary, "#FF5733");
        assert_eq!(palette.background, "#FFFFFF");
    }

    #[test]
    fn test_low_contrast_on_dark_background() {
        let mut raw = sunset();
        raw["background"] = json!("#111111");
        raw["text"] = json!("#121212");

        let palette = validate_palette(&raw);
        assert_eq!(palette.text, LIGHT_TEXT);
        assert_eq!(palette.background, "#111111");
    }

    #[test]
    fn test_black_on_black_is_adjusted() {
        let mut raw = sunset();
        raw["background"] = json!("#000000");
        raw["text"] = json!("#000000");

        assert_eq!(validate_palette(&raw).text, LIGHT_TEXT);
    }

    #[test]
    fn test_mid_grey_background_uses_light_text() {
        // #808080 has luminance ~0.216, below the 0.5 split.
        let mut raw = sunset();
        raw["background"] = json!("#808080");
        raw["text"] = json!("#808080");

        assert_eq!(validate_palette(&raw).text, LIGHT_TEXT);
    }

    #[test]
    fn test_short_hex_expanded_before_contrast() {
        let mut raw = sunset();
        raw["background"] = json!("#fff");
        raw["text"] = json!("#eee");

        let palette = validate_palette(&raw);
        assert_eq!(palette.background, "#ffffff");
        assert_eq!(palette.text, DARK_TEXT);
    }

    #[test]
    fn test_contrast_boundary() {
        let white = Color::new(255, 255, 255);
        assert!(!has_sufficient_contrast(&white, &white));
        assert!(has_sufficient_contrast(&white, &Color::new(0, 0, 0)));
    }

    #[test]
    fn test_extra_keys_ignored() {
        let mut raw = sunset();
        raw["name"] = json!("Sunset");
        assert_eq!(validate_palette(&raw).primary, "#FF5733");
    }
}
