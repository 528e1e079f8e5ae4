use crate::types::{ColorPalette, HexColor, Theme};

fn theme(id: &str, name: &str, colors: [&'static str; 5]) -> Theme {
    let [primary, secondary, accent, background, text] = colors.map(HexColor::literal);
    Theme {
        id: id.into(),
        name: name.into(),
        colors: ColorPalette {
            primary,
            secondary,
            accent,
            background,
            text,
        },
        is_builtin: true,
    }
}

/// Themes available at the start of every session. The first is active.
pub fn builtin_themes() -> Vec<Theme> {
    vec![
        theme(
            "default",
            "Ocean Blue",
            ["#3B82F6", "#1E40AF", "#60A5FA", "#FFFFFF", "#1F2937"],
        ),
        theme(
            "forest",
            "Forest Green",
            ["#10B981", "#047857", "#34D399", "#F9FAFB", "#1F2937"],
        ),
    ]
}
