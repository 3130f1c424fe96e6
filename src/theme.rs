use ratatui::style::Color;

/// Semantic color roles used by the renderer. Every role is resolved
/// through the active palette so the whole screen restyles when the mode
/// flips.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub bg: Color,
    pub fg: Color,
    /// Target characters not yet reached by the input.
    pub untyped: Color,
    /// Typed characters matching the target at the same position.
    pub correct: Color,
    /// Typed characters differing from the target.
    pub incorrect: Color,
    /// Stats and highlights.
    pub accent: Color,
    /// Key hints and other subdued chrome.
    pub hint: Color,
}

/// Palette for dark terminals.
pub const DARK: Palette = Palette {
    bg: Color::Rgb(17, 24, 39),
    fg: Color::Rgb(243, 244, 246),
    untyped: Color::Rgb(156, 163, 175),
    correct: Color::Rgb(74, 222, 128),
    incorrect: Color::Rgb(248, 113, 113),
    accent: Color::Rgb(250, 204, 21),
    hint: Color::Rgb(107, 114, 128),
};

/// Palette for light terminals.
pub const LIGHT: Palette = Palette {
    bg: Color::Rgb(255, 255, 255),
    fg: Color::Rgb(17, 24, 39),
    untyped: Color::Rgb(75, 85, 99),
    correct: Color::Rgb(22, 163, 74),
    incorrect: Color::Rgb(220, 38, 38),
    accent: Color::Rgb(59, 130, 246),
    hint: Color::Rgb(156, 163, 175),
};

/// Light/dark switch. Starts light; the toggle action flips it and every
/// consumer of the palette restyles on the next draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn from_dark_flag(dark_mode: bool) -> Self {
        if dark_mode {
            ThemeMode::Dark
        } else {
            ThemeMode::Light
        }
    }

    pub fn is_dark(self) -> bool {
        self == ThemeMode::Dark
    }

    pub fn toggle(&mut self) {
        *self = match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        };
    }

    pub fn palette(self) -> &'static Palette {
        match self {
            ThemeMode::Light => &LIGHT,
            ThemeMode::Dark => &DARK,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mode_is_light() {
        assert_eq!(ThemeMode::default(), ThemeMode::Light);
        assert!(!ThemeMode::default().is_dark());
    }

    #[test]
    fn test_toggle_twice_restores_original() {
        let mut mode = ThemeMode::Light;
        let original_palette = *mode.palette();

        mode.toggle();
        assert_eq!(mode, ThemeMode::Dark);
        assert_ne!(*mode.palette(), original_palette);

        mode.toggle();
        assert_eq!(mode, ThemeMode::Light);
        assert_eq!(*mode.palette(), original_palette);
    }

    #[test]
    fn test_palettes_differ_per_character_roles() {
        assert_ne!(LIGHT.untyped, DARK.untyped);
        assert_ne!(LIGHT.correct, DARK.correct);
        assert_ne!(LIGHT.incorrect, DARK.incorrect);
        assert_ne!(LIGHT.bg, DARK.bg);
        assert_ne!(LIGHT.fg, DARK.fg);
    }

    #[test]
    fn test_from_dark_flag() {
        assert_eq!(ThemeMode::from_dark_flag(true), ThemeMode::Dark);
        assert_eq!(ThemeMode::from_dark_flag(false), ThemeMode::Light);
    }

    #[test]
    fn test_mode_display_names() {
        assert_eq!(ThemeMode::Light.to_string(), "light");
        assert_eq!(ThemeMode::Dark.to_string(), "dark");
    }
}
