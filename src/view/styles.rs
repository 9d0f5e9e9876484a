//! List styling configuration.

use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Whether the viewer may emit colors.
///
/// `--no-color` and a set `NO_COLOR` (any value, see no-color.org) both
/// turn colors off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Resolve from the `--no-color` flag and the `NO_COLOR` variable.
    pub fn from_env_and_args(no_color: bool) -> Self {
        Self {
            enabled: !no_color && std::env::var_os("NO_COLOR").is_none(),
        }
    }

    /// Colors off regardless of environment.
    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    /// Whether styles should carry colors.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== ListStyles =====

/// Styles for the parts of the list surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListStyles {
    /// Whole content area, drawn before any item.
    pub container: Style,
    /// Rows occupied by each mounted item.
    pub item: Style,
    /// First line of each entry.
    pub title: Style,
    /// Remaining lines of each entry.
    pub body: Style,
    /// Rule drawn below each entry.
    pub separator: Style,
    /// Bottom status bar.
    pub status: Style,
}

impl ListStyles {
    /// Styles for the given color configuration.
    ///
    /// With colors disabled only text modifiers remain.
    pub fn with_color_config(config: ColorConfig) -> Self {
        let title = Style::default().add_modifier(Modifier::BOLD);
        let status = Style::default().add_modifier(Modifier::REVERSED);

        if config.colors_enabled() {
            Self {
                container: Style::default(),
                item: Style::default(),
                title: title.fg(Color::Cyan),
                body: Style::default(),
                separator: Style::default().fg(Color::DarkGray),
                status,
            }
        } else {
            Self {
                container: Style::default(),
                item: Style::default(),
                title,
                body: Style::default(),
                separator: Style::default(),
                status,
            }
        }
    }
}

impl Default for ListStyles {
    fn default() -> Self {
        Self::with_color_config(ColorConfig::from_env_and_args(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial(no_color)]
    fn flag_disables_colors_without_env() {
        std::env::remove_var("NO_COLOR");
        assert!(!ColorConfig::from_env_and_args(true).colors_enabled());
        assert!(ColorConfig::from_env_and_args(false).colors_enabled());
    }

    #[test]
    #[serial(no_color)]
    fn no_color_env_disables_colors_even_when_empty() {
        for value in ["1", ""] {
            std::env::set_var("NO_COLOR", value);
            let enabled = ColorConfig::from_env_and_args(false).colors_enabled();
            std::env::remove_var("NO_COLOR");
            assert!(!enabled, "NO_COLOR={value:?} left colors on");
        }
    }

    #[test]
    fn disabled_styles_have_no_colors() {
        let styles = ListStyles::with_color_config(ColorConfig::disabled());
        assert_eq!(styles.title.fg, None);
        assert_eq!(styles.separator.fg, None);
        assert!(styles.title.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn enabled_styles_color_titles() {
        let styles = ListStyles::with_color_config(ColorConfig { enabled: true });
        assert_eq!(styles.title.fg, Some(Color::Cyan));
    }
}
