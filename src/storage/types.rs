//! Keys used in local storage

/// Key holding the theme preference ("dark" or "light")
pub const THEME_KEY: &str = "chatbot-theme";

/// Key holding the archive as a JSON array of meeting summaries
pub const ARCHIVE_KEY: &str = "meeting-summaries";
