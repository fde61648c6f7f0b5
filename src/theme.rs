//! Light and dark colour themes for terminal output.

use std::fmt;

use crossterm::style::{Color, Stylize};

/// Which palette is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeKind {
    #[default]
    Light,
    Dark,
}

impl ThemeKind {
    pub fn toggled(self) -> Self {
        match self {
            ThemeKind::Light => ThemeKind::Dark,
            ThemeKind::Dark => ThemeKind::Light,
        }
    }
}

impl fmt::Display for ThemeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ThemeKind::Light => "LIGHT",
            ThemeKind::Dark => "DARK",
        })
    }
}

/// Meaning of a piece of output; each theme maps roles to colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Primary,
    Success,
    Error,
    Info,
    Warning,
}

/// Applies the active theme to text.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub kind: ThemeKind,
    pub enabled: bool,
}

impl Theme {
    pub fn new(enabled: bool) -> Self {
        Theme { kind: ThemeKind::default(), enabled }
    }

    pub fn toggle(&mut self) {
        self.kind = self.kind.toggled();
    }

    fn colour(&self, role: Role) -> Color {
        match (self.kind, role) {
            (ThemeKind::Light, Role::Primary) => Color::Black,
            (ThemeKind::Light, Role::Success) => Color::DarkGreen,
            (ThemeKind::Light, Role::Error) => Color::DarkRed,
            (ThemeKind::Light, Role::Info) => Color::DarkBlue,
            (ThemeKind::Light, Role::Warning) => Color::DarkYellow,
            (ThemeKind::Dark, Role::Primary) => Color::White,
            (ThemeKind::Dark, Role::Success) => Color::Green,
            (ThemeKind::Dark, Role::Error) => Color::Red,
            (ThemeKind::Dark, Role::Info) => Color::Cyan,
            (ThemeKind::Dark, Role::Warning) => Color::Yellow,
        }
    }

    /// `text` wrapped in the role's colour, or unchanged when colour is off.
    pub fn paint(&self, role: Role, text: impl fmt::Display) -> String {
        let text = text.to_string();
        if self.enabled {
            text.with(self.colour(role)).to_string()
        } else {
            text
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_between_light_and_dark() {
        let mut theme = Theme::new(false);
        assert_eq!(theme.kind, ThemeKind::Light);
        theme.toggle();
        assert_eq!(theme.kind, ThemeKind::Dark);
        theme.toggle();
        assert_eq!(theme.kind, ThemeKind::Light);
    }

    #[test]
    fn disabled_theme_leaves_text_plain() {
        let theme = Theme::new(false);
        assert_eq!(theme.paint(Role::Error, "Invalid choice."), "Invalid choice.");
    }

    #[test]
    fn themes_use_different_palettes() {
        let light = Theme::new(true);
        let mut dark = Theme::new(true);
        dark.toggle();
        assert_ne!(light.colour(Role::Info), dark.colour(Role::Info));
    }
}
