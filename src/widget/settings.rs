use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Presentation toggles. None of these influence which reply is chosen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub auto_scroll: bool,
    pub typing_indicators: bool,
    pub sound: bool,
    pub theme: Theme,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            auto_scroll: true,
            typing_indicators: true,
            sound: false,
            theme: Theme::Light,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SettingToggle {
    AutoScroll,
    TypingIndicators,
    Sound,
}

impl SettingToggle {
    pub fn label(&self) -> &'static str {
        match self {
            SettingToggle::AutoScroll => "Auto-scroll",
            SettingToggle::TypingIndicators => "Typing indicators",
            SettingToggle::Sound => "Sound",
        }
    }
}

impl Settings {
    /// Flip one toggle and return its new value.
    pub fn toggle(&mut self, toggle: SettingToggle) -> bool {
        let slot = match toggle {
            SettingToggle::AutoScroll => &mut self.auto_scroll,
            SettingToggle::TypingIndicators => &mut self.typing_indicators,
            SettingToggle::Sound => &mut self.sound,
        };
        *slot = !*slot;
        *slot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_flips_only_named_setting() {
        let mut settings = Settings::default();
        assert!(!settings.toggle(SettingToggle::AutoScroll));
        assert!(!settings.auto_scroll);
        assert!(settings.typing_indicators);
        assert!(settings.toggle(SettingToggle::Sound));
        assert!(settings.sound);
    }

    #[test]
    fn test_theme_toggles_back_and_forth() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled().toggled(), Theme::Dark);
    }
}
