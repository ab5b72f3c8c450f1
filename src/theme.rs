//! Theme colors for the terminal form
//! Built-in palette, with per-color overrides from the `[theme]` config table

use ratatui::style::Color;

use crate::config::ThemeOverrides;

/// Theme colors for the UI
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub accent: Color,           // Input border, key hints
    pub danger: Color,           // Error line
    pub success: Color,          // Result values
    pub text: Color,             // Primary text
    pub text_dim: Color,         // Prompt, footer descriptions
    pub inactive: Color,         // Borders of the results box
    pub header: Color,           // Title
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent: Color::Rgb(250, 179, 135),
            danger: Color::Rgb(243, 139, 168),
            success: Color::Rgb(166, 218, 149),
            text: Color::Rgb(205, 214, 244),
            text_dim: Color::Rgb(147, 153, 178),
            inactive: Color::Rgb(88, 91, 112),
            header: Color::Rgb(243, 139, 168),
        }
    }
}

impl Theme {
    /// Default palette with any valid overrides applied
    pub fn load(overrides: &ThemeOverrides) -> Self {
        let mut theme = Self::default();

        let slots: [(&Option<String>, &mut Color, &str); 6] = [
            (&overrides.accent, &mut theme.accent, "accent"),
            (&overrides.danger, &mut theme.danger, "danger"),
            (&overrides.text, &mut theme.text, "text"),
            (&overrides.text_dim, &mut theme.text_dim, "text_dim"),
            (&overrides.inactive, &mut theme.inactive, "inactive"),
            (&overrides.header, &mut theme.header, "header"),
        ];

        for (value, slot, name) in slots {
            let Some(value) = value else { continue };
            match Self::parse_hex_color(value) {
                Some(color) => *slot = color,
                None => tracing::warn!("Ignoring invalid theme color {} = {:?}", name, value),
            }
        }

        // Results follow the accent unless the palette is left alone
        if overrides.accent.is_some() {
            theme.success = theme.accent;
        }

        theme
    }

    /// Parse a hex color string (#RRGGBB or #RGB)
    fn parse_hex_color(s: &str) -> Option<Color> {
        let s = s.trim().trim_start_matches('#');

        if !s.is_ascii() {
            return None;
        }

        if s.len() == 6 {
            let r = u8::from_str_radix(&s[0..2], 16).ok()?;
            let g = u8::from_str_radix(&s[2..4], 16).ok()?;
            let b = u8::from_str_radix(&s[4..6], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        } else if s.len() == 3 {
            let r = u8::from_str_radix(&s[0..1], 16).ok()? * 17;
            let g = u8::from_str_radix(&s[1..2], 16).ok()? * 17;
            let b = u8::from_str_radix(&s[2..3], 16).ok()? * 17;
            Some(Color::Rgb(r, g, b))
        } else {
            None
        }
    }
}
