//! Core theme types.
//!
//! This module defines the fundamental types for the theme system:
//! - `Color` - RGB color representation
//! - `HexColor` - A syntactically valid `#RRGGBB` string with its RGB value
//! - `PaletteSlot` - The five named slots of a palette
//! - `ColorPalette` - The five colors applied to the page
//! - `Theme` - A palette with identity and display name

use std::fmt;

use serde::{Deserialize, Serialize};

/// RGB color representation.
///
/// Each component is a value from 0-255.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Create a new color from RGB components.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a 6-digit hex color string (e.g., "#ffffff" or "ffffff").
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Self { r, g, b })
    }

    /// Convert sRGB channel to linear for luminance calculation.
    fn linearize(val: u8) -> f64 {
        let v = val as f64 / 255.0;
        if v <= 0.03928 {
            v / 12.92
        } else {
            ((v + 0.055) / 1.055).powf(2.4)
        }
    }

    /// Calculate relative luminance (0.0 = black, 1.0 = white).
    pub fn luminance(&self) -> f64 {
        0.2126 * Self::linearize(self.r)
            + 0.7152 * Self::linearize(self.g)
            + 0.0722 * Self::linearize(self.b)
    }

    /// Plain ratio of the lighter to the darker luminance.
    ///
    /// Unlike the WCAG ratio there is no flare offset, so any pair involving
    /// pure black is infinite and black on black is NaN.
    pub fn luminance_ratio(&self, other: &Color) -> f64 {
        let l1 = self.luminance();
        let l2 = other.luminance();
        l1.max(l2) / l1.min(l2)
    }
}

/// A color string matching `#RRGGBB`, together with its parsed value.
///
/// The original spelling is preserved, so a palette that passes validation
/// is returned exactly as the model wrote it. Short `#RGB` input is expanded
/// to six digits on parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor {
    hex: String,
    rgb: Color,
}

impl HexColor {
    /// Parse `#RRGGBB` or `#RGB`. No surrounding whitespace is accepted.
    pub fn parse(value: &str) -> Option<Self> {
        let digits = value.strip_prefix('#')?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }

        let hex = match digits.len() {
            6 => value.to_string(),
            3 => {
                let mut expanded = String::with_capacity(7);
                expanded.push('#');
                for c in digits.chars() {
                    expanded.push(c);
                    expanded.push(c);
                }
                expanded
            }
            _ => return None,
        };

        let rgb = Color::from_hex(&hex)?;
        Some(Self { hex, rgb })
    }

    pub fn as_str(&self) -> &str {
        &self.hex
    }

    pub fn rgb(&self) -> Color {
        self.rgb
    }

    pub fn luminance(&self) -> f64 {
        self.rgb.luminance()
    }

    /// Parse a color literal that is known to be valid.
    pub(crate) fn literal(hex: &'static str) -> Self {
        Self::parse(hex).expect("color literal must be valid hex")
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.hex)
    }
}

impl TryFrom<String> for HexColor {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| format!("invalid hex color: {:?}", value))
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.hex
    }
}

impl PartialEq<&str> for HexColor {
    fn eq(&self, other: &&str) -> bool {
        self.hex == *other
    }
}

/// The five named color slots of a palette, in validation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaletteSlot {
    Primary,
    Secondary,
    Accent,
    Background,
    Text,
}

impl PaletteSlot {
    pub const ALL: [PaletteSlot; 5] = [
        PaletteSlot::Primary,
        PaletteSlot::Secondary,
        PaletteSlot::Accent,
        PaletteSlot::Background,
        PaletteSlot::Text,
    ];

    /// JSON key of the slot.
    pub fn key(&self) -> &'static str {
        match self {
            PaletteSlot::Primary => "primary",
            PaletteSlot::Secondary => "secondary",
            PaletteSlot::Accent => "accent",
            PaletteSlot::Background => "background",
            PaletteSlot::Text => "text",
        }
    }

    /// CSS custom property the slot is published under.
    pub fn css_var(&self) -> &'static str {
        match self {
            PaletteSlot::Primary => "--color-primary",
            PaletteSlot::Secondary => "--color-secondary",
            PaletteSlot::Accent => "--color-accent",
            PaletteSlot::Background => "--color-background",
            PaletteSlot::Text => "--color-text",
        }
    }
}

/// The five colors of a theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorPalette {
    pub primary: HexColor,
    pub secondary: HexColor,
    pub accent: HexColor,
    pub background: HexColor,
    pub text: HexColor,
}

impl ColorPalette {
    /// The palette used whenever generation or validation fails.
    pub fn fallback() -> Self {
        Self {
            primary: HexColor::literal("#3B82F6"),
            secondary: HexColor::literal("#10B981"),
            accent: HexColor::literal("#8B5CF6"),
            background: HexColor::literal("#FFFFFF"),
            text: HexColor::literal("#1F2937"),
        }
    }

    pub fn get(&self, slot: PaletteSlot) -> &HexColor {
        match slot {
            PaletteSlot::Primary => &self.primary,
            PaletteSlot::Secondary => &self.secondary,
            PaletteSlot::Accent => &self.accent,
            PaletteSlot::Background => &self.background,
            PaletteSlot::Text => &self.text,
        }
    }

    /// Iterate slots in their fixed order.
    pub fn slots(&self) -> impl Iterator<Item = (PaletteSlot, &HexColor)> {
        PaletteSlot::ALL.into_iter().map(move |slot| (slot, self.get(slot)))
    }

    pub fn is_fallback(&self) -> bool {
        *self == Self::fallback()
    }
}

/// A palette with metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    /// Unique identifier within the known themes
    pub id: String,
    /// Display name
    pub name: String,
    pub colors: ColorPalette,
    /// Whether this theme ships with prism
    #[serde(default)]
    pub is_builtin: bool,
}

impl Theme {
    pub fn is_generated(&self) -> bool {
        self.id.starts_with("ai-")
    }
}
