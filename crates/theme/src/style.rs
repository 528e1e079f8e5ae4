//! Publishing the active palette as CSS custom properties.

use std::collections::BTreeMap;

use crate::types::{ColorPalette, Theme};

/// Receives the active theme every time it changes.
///
/// This is the only channel from the theme store to whatever renders the
/// page; nothing is ever read back.
pub trait StyleSink {
    fn apply(&mut self, theme: &Theme);

    /// Called when a generation request starts or finishes.
    fn loading_changed(&mut self, _loading: bool) {}
}

/// `(property, value)` pairs in slot order.
pub fn css_variables(palette: &ColorPalette) -> Vec<(&'static str, &str)> {
    palette
        .slots()
        .map(|(slot, color)| (slot.css_var(), color.as_str()))
        .collect()
}

/// Make `text` safe inside a `/* ... */` comment.
fn comment_safe(text: &str) -> String {
    text.replace("*/", "* /")
}

/// Render a `:root` block declaring the theme's variables.
pub fn render_root_css(theme: &Theme) -> String {
    let mut css = format!(
        "/* {} ({}) */\n:root {{\n",
        comment_safe(&theme.name),
        comment_safe(&theme.id)
    );
    for (name, value) in css_variables(&theme.colors) {
        css.push_str(&format!("  {}: {};\n", name, value));
    }
    css.push_str("}\n");
    css
}

/// In-memory stand-in for the document root's inline style.
#[derive(Debug, Default, Clone)]
pub struct RootStyle {
    properties: BTreeMap<String, String>,
    applied: usize,
}

impl RootStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.properties.get(property).map(String::as_str)
    }

    pub fn set_property(&mut self, property: &str, value: &str) {
        self.properties
            .insert(property.to_string(), value.to_string());
    }

    /// Number of theme applications seen so far.
    pub fn applied_count(&self) -> usize {
        self.applied
    }

    pub fn properties(&self) -> impl Iterator<Item = (&str, &str)> {
        self.properties
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl StyleSink for RootStyle {
    fn apply(&mut self, theme: &Theme) {
        for (name, value) in css_variables(&theme.colors) {
            self.set_property(name, value);
        }
        self.applied += 1;
    }
}
