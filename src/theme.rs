//! Terminal color theme
//!
//! The theme is a process-wide preference kept in local storage under its
//! own key, independent of the conversation and the archive.

use crate::error::Result;
use crate::storage::{LocalStore, THEME_KEY};
use colored::{Color, ColoredString, Colorize};
use std::fmt;

/// Color theme for terminal output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    /// Bright text for dark terminals
    #[default]
    Dark,
    /// Deeper colors for light terminals
    Light,
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dark => write!(f, "dark"),
            Self::Light => write!(f, "light"),
        }
    }
}

impl Theme {
    /// Parse a theme from a string
    ///
    /// # Examples
    ///
    /// ```
    /// use meeting_summarizer::theme::Theme;
    ///
    /// assert_eq!(Theme::parse_str("Light").unwrap(), Theme::Light);
    /// assert!(Theme::parse_str("sepia").is_err());
    /// ```
    pub fn parse_str(s: &str) -> std::result::Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            other => Err(format!("Unknown theme: {}", other)),
        }
    }

    /// The other theme
    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Read the stored theme, defaulting to dark
    ///
    /// # Errors
    ///
    /// Returns error if the storage backend cannot be read
    pub fn load(store: &dyn LocalStore) -> Result<Self> {
        let theme = match store.get(THEME_KEY)? {
            Some(value) => Self::parse_str(&value).unwrap_or_else(|e| {
                tracing::warn!("{}, using dark", e);
                Self::Dark
            }),
            None => Self::Dark,
        };
        Ok(theme)
    }

    /// Store this theme
    ///
    /// # Errors
    ///
    /// Returns error if the storage backend cannot be written
    pub fn save(self, store: &dyn LocalStore) -> Result<()> {
        store.set(THEME_KEY, &self.to_string())
    }

    fn accent_color(self) -> Color {
        match self {
            Self::Dark => Color::BrightCyan,
            Self::Light => Color::Blue,
        }
    }

    fn user_color(self) -> Color {
        match self {
            Self::Dark => Color::BrightGreen,
            Self::Light => Color::Green,
        }
    }

    fn muted_color(self) -> Color {
        match self {
            Self::Dark => Color::BrightBlack,
            Self::Light => Color::Black,
        }
    }

    /// Headings and assistant labels
    pub fn accent(self, text: &str) -> ColoredString {
        text.color(self.accent_color())
    }

    /// User labels
    pub fn user(self, text: &str) -> ColoredString {
        text.color(self.user_color())
    }

    /// Timestamps and secondary details
    pub fn muted(self, text: &str) -> ColoredString {
        text.color(self.muted_color())
    }
}
