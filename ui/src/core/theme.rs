//! Light / dark appearance preference.

use crate::core::storage::{self, THEME_KEY};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn code(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Class applied to the application shell.
    pub fn css_class(self) -> &'static str {
        match self {
            Theme::Light => "theme-light",
            Theme::Dark => "theme-dark",
        }
    }

    /// Stored preference, light when absent or unreadable.
    pub fn restore() -> Self {
        storage::load_preference(THEME_KEY)
            .and_then(|code| Theme::from_code(&code))
            .unwrap_or_default()
    }

    pub fn persist(self) {
        storage::save_preference(THEME_KEY, self.code());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip_case_insensitively() {
        assert_eq!(Theme::from_code("DARK"), Some(Theme::Dark));
        assert_eq!(Theme::from_code(" light "), Some(Theme::Light));
        assert_eq!(Theme::from_code("sepia"), None);
    }

    #[test]
    fn toggle_flips() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled().css_class(), "theme-light");
    }
}
