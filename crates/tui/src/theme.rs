use ratatui::style::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    Light,
    Dark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemePreset {
    Dark,
    Light,
    HighContrast,
}

impl ThemePreset {
    pub const ALL: &[ThemePreset] = &[
        ThemePreset::Dark,
        ThemePreset::Light,
        ThemePreset::HighContrast,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ThemePreset::Dark => "dark",
            ThemePreset::Light => "light",
            ThemePreset::HighContrast => "high-contrast",
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().replace(' ', "-").as_str() {
            "light" => ThemePreset::Light,
            "high-contrast" | "high_contrast" | "highcontrast" | "contrast" => {
                ThemePreset::HighContrast
            }
            _ => ThemePreset::Dark,
        }
    }

    pub fn mode(self) -> ThemeMode {
        match self {
            ThemePreset::Light => ThemeMode::Light,
            _ => ThemeMode::Dark,
        }
    }

    pub fn palette(self) -> Theme {
        let mode = self.mode();
        match self {
            // white marks and a brown highlight on a dimmed black panel
            ThemePreset::Dark => Theme {
                mode,
                preset: self,
                bg_page: Color::Rgb(0, 0, 0),
                bg_panel: Color::Rgb(18, 18, 18),
                text_primary: Color::Rgb(235, 235, 235),
                text_secondary: Color::Rgb(140, 140, 140),
                mark: Color::Rgb(153, 153, 153),
                highlight: Color::Rgb(162, 132, 94),
                arrow: Color::Rgb(162, 132, 94),
            },
            ThemePreset::Light => Theme {
                mode,
                preset: self,
                bg_page: Color::Rgb(245, 240, 232),
                bg_panel: Color::Rgb(250, 246, 240),
                text_primary: Color::Rgb(28, 25, 23),
                text_secondary: Color::Rgb(120, 113, 108),
                mark: Color::Rgb(168, 162, 158),
                highlight: Color::Rgb(130, 91, 50),
                arrow: Color::Rgb(130, 91, 50),
            },
            ThemePreset::HighContrast => Theme {
                mode,
                preset: self,
                bg_page: Color::Rgb(0, 0, 0),
                bg_panel: Color::Rgb(0, 0, 0),
                text_primary: Color::Rgb(255, 255, 255),
                text_secondary: Color::Rgb(200, 200, 200),
                mark: Color::Rgb(255, 255, 255),
                highlight: Color::Rgb(255, 176, 0),
                arrow: Color::Rgb(255, 176, 0),
            },
        }
    }
}

pub(crate) fn parse_hex_color(s: &str) -> Option<Color> {
    let s = s.strip_prefix('#').unwrap_or(s);
    if s.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&s[0..2], 16).ok()?;
    let g = u8::from_str_radix(&s[2..4], 16).ok()?;
    let b = u8::from_str_radix(&s[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub mode: ThemeMode,
    pub preset: ThemePreset,

    pub bg_page: Color,
    pub bg_panel: Color,

    pub text_primary: Color,
    pub text_secondary: Color,

    /// Base layer marks.
    pub mark: Color,
    /// Marks inside the highlight window.
    pub highlight: Color,
    pub arrow: Color,
}

impl Theme {
    pub fn new(preset: ThemePreset) -> Self {
        preset.palette()
    }

    pub fn from_config(config: &distind_config::TuiConfig) -> Self {
        let mut theme = Self::new(ThemePreset::from_name(&config.theme));
        if let Some(ref hex) = config.accent {
            match parse_hex_color(hex) {
                Some(c) => {
                    theme.highlight = c;
                    theme.arrow = c;
                }
                None => tracing::warn!(accent = %hex, "Ignoring invalid accent colour"),
            }
        }
        theme
    }

    pub fn next_preset(&mut self) {
        let idx = ThemePreset::ALL
            .iter()
            .position(|&p| p == self.preset)
            .unwrap_or(0);
        let next = ThemePreset::ALL[(idx + 1) % ThemePreset::ALL.len()];
        *self = Self::new(next);
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(ThemePreset::Dark)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_round_trip() {
        for preset in ThemePreset::ALL {
            let name = preset.name();
            let parsed = ThemePreset::from_name(name);
            assert_eq!(*preset, parsed, "round-trip failed for {name}");
        }
    }

    #[test]
    fn unknown_name_is_dark() {
        assert_eq!(ThemePreset::from_name("sepia"), ThemePreset::Dark);
    }

    #[test]
    fn parse_hex() {
        assert_eq!(parse_hex_color("#ff0000"), Some(Color::Rgb(255, 0, 0)));
        assert_eq!(parse_hex_color("00ff00"), Some(Color::Rgb(0, 255, 0)));
        assert_eq!(parse_hex_color("#xyz"), None);
        assert_eq!(parse_hex_color(""), None);
    }

    #[test]
    fn accent_override_applied() {
        let config = distind_config::TuiConfig {
            theme: "light".to_string(),
            accent: Some("#00ff00".to_string()),
            ..Default::default()
        };
        let theme = Theme::from_config(&config);
        assert_eq!(theme.preset, ThemePreset::Light);
        assert_eq!(theme.highlight, Color::Rgb(0, 255, 0));
        assert_eq!(theme.arrow, Color::Rgb(0, 255, 0));
    }

    #[test]
    fn cycling_visits_every_preset() {
        let mut theme = Theme::default();
        let mut seen = vec![theme.preset];
        for _ in 1..ThemePreset::ALL.len() {
            theme.next_preset();
            seen.push(theme.preset);
        }
        assert_eq!(seen, ThemePreset::ALL);
        theme.next_preset();
        assert_eq!(theme.preset, ThemePreset::Dark);
    }
}
