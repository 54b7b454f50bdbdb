//! Design tokens derived from the CMS global settings.
//!
//! Editors pick two brand colors and a font family. Everything else the
//! stylesheet needs (light/dark shades, readable text color on top of each
//! brand color, the full font stack) is derived here and emitted as CSS custom
//! properties that `static/style.css` consumes.
//!
//! With no settings document, or with a setting left blank, the `[theme]`
//! defaults from `site.toml` apply unchanged.

use crate::config::ThemeDefaults;
use crate::documents::{Color, GlobalSettings};

/// Offset used for the light and dark variants of a brand color.
const TONAL_OFFSET: f64 = 0.2;

/// Minimum contrast ratio for white text on a brand color.
const CONTRAST_THRESHOLD: f64 = 3.0;

const LIGHT_TEXT: &str = "#fff";
const DARK_TEXT: &str = "rgba(0, 0, 0, 0.87)";

const FALLBACK_PRIMARY: Rgb = Rgb(0x00, 0x66, 0xcc);
const FALLBACK_SECONDARY: Rgb = Rgb(0x00, 0xa8, 0x96);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }

    fn map(self, f: impl Fn(f64) -> f64) -> Self {
        let channel = |c: u8| f(c as f64).round().clamp(0.0, 255.0) as u8;
        Rgb(channel(self.0), channel(self.1), channel(self.2))
    }

    pub fn lighten(self, coefficient: f64) -> Self {
        self.map(|c| c + (255.0 - c) * coefficient)
    }

    pub fn darken(self, coefficient: f64) -> Self {
        self.map(|c| c * (1.0 - coefficient))
    }

    /// WCAG relative luminance.
    pub fn luminance(self) -> f64 {
        let linear = |c: u8| {
            let c = c as f64 / 255.0;
            if c <= 0.03928 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        };
        0.2126 * linear(self.0) + 0.7152 * linear(self.1) + 0.0722 * linear(self.2)
    }

    pub fn contrast_ratio(self, other: Rgb) -> f64 {
        let (a, b) = (self.luminance(), other.luminance());
        (a.max(b) + 0.05) / (a.min(b) + 0.05)
    }
}

/// Parse `#rgb` or `#rrggbb` (case-insensitive).
pub fn parse_hex(raw: &str) -> Option<Rgb> {
    let hex = raw.trim().strip_prefix('#')?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let expanded: String = match hex.len() {
        3 => hex.chars().flat_map(|c| [c, c]).collect(),
        6 => hex.to_string(),
        _ => return None,
    };
    let channel = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).ok();
    Some(Rgb(channel(0)?, channel(2)?, channel(4)?))
}

#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub main: String,
    pub light: String,
    pub dark: String,
    pub contrast_text: &'static str,
}

impl Palette {
    pub fn from_rgb(main: Rgb) -> Self {
        let white = Rgb(0xff, 0xff, 0xff);
        Self {
            main: main.to_hex(),
            light: main.lighten(TONAL_OFFSET).to_hex(),
            dark: main.darken(TONAL_OFFSET).to_hex(),
            contrast_text: if main.contrast_ratio(white) >= CONTRAST_THRESHOLD {
                LIGHT_TEXT
            } else {
                DARK_TEXT
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub primary: Palette,
    pub secondary: Palette,
    /// Full CSS `font-family` value.
    pub font_family: String,
}

impl Theme {
    /// Theme built from `[theme]` alone.
    pub fn from_defaults(defaults: &ThemeDefaults) -> Self {
        Self {
            primary: Palette::from_rgb(parse_hex(&defaults.primary).unwrap_or(FALLBACK_PRIMARY)),
            secondary: Palette::from_rgb(
                parse_hex(&defaults.secondary).unwrap_or(FALLBACK_SECONDARY),
            ),
            font_family: font_stack(&defaults.font_family),
        }
    }

    /// Overlay whichever brand settings the editors filled in onto the defaults.
    pub fn from_settings(settings: Option<&GlobalSettings>, defaults: &ThemeDefaults) -> Self {
        let mut theme = Self::from_defaults(defaults);
        let Some(settings) = settings else {
            return theme;
        };
        if let Some(rgb) = settings_color(settings.primary_color.as_ref(), "primaryColor") {
            theme.primary = Palette::from_rgb(rgb);
        }
        if let Some(rgb) = settings_color(settings.secondary_color.as_ref(), "secondaryColor") {
            theme.secondary = Palette::from_rgb(rgb);
        }
        if let Some(font) = settings.font_family.as_deref().filter(|f| !f.trim().is_empty()) {
            theme.font_family = font_stack(font.trim());
        }
        theme
    }

    /// CSS custom properties for the stylesheet.
    pub fn to_css(&self) -> String {
        format!(
            r#":root {{
    --color-primary: {pm};
    --color-primary-light: {pl};
    --color-primary-dark: {pd};
    --color-primary-contrast: {pc};
    --color-secondary: {sm};
    --color-secondary-light: {sl};
    --color-secondary-dark: {sd};
    --color-secondary-contrast: {sc};
    --font-family: {font};
}}"#,
            pm = self.primary.main,
            pl = self.primary.light,
            pd = self.primary.dark,
            pc = self.primary.contrast_text,
            sm = self.secondary.main,
            sl = self.secondary.light,
            sd = self.secondary.dark,
            sc = self.secondary.contrast_text,
            font = self.font_family,
        )
    }
}

fn settings_color(color: Option<&Color>, field: &str) -> Option<Rgb> {
    let hex = color.map(|c| c.hex.as_str()).filter(|h| !h.is_empty())?;
    let parsed = parse_hex(hex);
    if parsed.is_none() {
        log::warn!(target: "theme", "ignoring globalSettings.{field}: {hex:?} is not a hex color");
    }
    parsed
}

pub fn font_stack(family: &str) -> String {
    format!(r#""{family}", "Roboto", "Helvetica", "Arial", sans-serif"#)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings_with_primary(hex: &str) -> GlobalSettings {
        GlobalSettings {
            primary_color: Some(Color {
                hex: hex.into(),
                alpha: None,
            }),
            ..GlobalSettings::default()
        }
    }

    // =========================================================================
    // Hex parsing
    // =========================================================================

    #[test]
    fn parse_hex_accepts_short_and_long_forms() {
        assert_eq!(parse_hex("#123456"), Some(Rgb(0x12, 0x34, 0x56)));
        assert_eq!(parse_hex("#fff"), Some(Rgb(0xff, 0xff, 0xff)));
        assert_eq!(parse_hex("#ABCDEF"), Some(Rgb(0xab, 0xcd, 0xef)));
    }

    #[test]
    fn parse_hex_rejects_garbage() {
        assert_eq!(parse_hex("123456"), None);
        assert_eq!(parse_hex("#12345"), None);
        assert_eq!(parse_hex("#gggggg"), None);
        assert_eq!(parse_hex("#ééé"), None);
    }

    // =========================================================================
    // Derivation
    // =========================================================================

    #[test]
    fn primary_color_from_settings_becomes_primary_main() {
        let theme = Theme::from_settings(
            Some(&settings_with_primary("#123456")),
            &ThemeDefaults::default(),
        );
        assert_eq!(theme.primary.main, "#123456");
    }

    #[test]
    fn no_settings_yields_default_theme() {
        let defaults = ThemeDefaults::default();
        assert_eq!(
            Theme::from_settings(None, &defaults),
            Theme::from_defaults(&defaults)
        );
        assert_eq!(Theme::from_defaults(&defaults).primary.main, "#0066cc");
    }

    #[test]
    fn invalid_settings_color_keeps_default() {
        let theme = Theme::from_settings(
            Some(&settings_with_primary("blue")),
            &ThemeDefaults::default(),
        );
        assert_eq!(theme.primary.main, "#0066cc");
    }

    #[test]
    fn font_family_builds_stack() {
        let settings = GlobalSettings {
            font_family: Some("Poppins".into()),
            ..GlobalSettings::default()
        };
        let theme = Theme::from_settings(Some(&settings), &ThemeDefaults::default());
        assert_eq!(
            theme.font_family,
            r#""Poppins", "Roboto", "Helvetica", "Arial", sans-serif"#
        );
    }

    #[test]
    fn tonal_variants_move_toward_white_and_black() {
        let palette = Palette::from_rgb(Rgb(100, 100, 100));
        assert_eq!(palette.light, "#838383");
        assert_eq!(palette.dark, "#505050");
    }

    #[test]
    fn contrast_text_picks_readable_color() {
        assert_eq!(Palette::from_rgb(Rgb(0, 0x33, 0x66)).contrast_text, LIGHT_TEXT);
        assert_eq!(Palette::from_rgb(Rgb(0xff, 0xee, 0x88)).contrast_text, DARK_TEXT);
    }

    #[test]
    fn css_exposes_all_tokens() {
        let css = Theme::from_defaults(&ThemeDefaults::default()).to_css();
        assert!(css.contains("--color-primary: #0066cc;"));
        assert!(css.contains("--color-secondary: #00a896;"));
        assert!(css.contains("--font-family: \"Inter\""));
    }
}
