//! Project-wide constants.

use std::path::PathBuf;

use anyhow::{Context, Result};

pub const AUTHOR: &str = env!("CARGO_PKG_AUTHORS");
pub const HOMEPAGE: &str = env!("CARGO_PKG_HOMEPAGE");
pub const REPO: &str = env!("CARGO_PKG_REPOSITORY");

/// Default Gemini model for the drink concept.
pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash";

/// Default Imagen model for the drink photograph.
pub const DEFAULT_IMAGE_MODEL: &str = "imagen-4.0-generate-001";

/// Credential / provider key used in auth storage.
pub const PROVIDER: &str = "gemini";

/// Environment variables checked for an API key, in order.
pub const API_KEY_ENV_VARS: &[&str] = &["GEMINI_API_KEY", "API_KEY"];

/// Preset mood chips, in display order.
pub const MOOD_OPTIONS: &[&str] = &[
    "Happy",
    "Cozy",
    "Energetic",
    "Stressed",
    "Creative",
    "Nostalgic",
    "Adventurous",
    "Calm",
    "Romantic",
    "Sleepy",
    "Celebratory",
    "Focused",
];

/// Shown when the trimmed mood is empty.
pub const EMPTY_MOOD_MESSAGE: &str = "Please select or type a mood to begin!";

/// The single user-facing message for any provider failure.
pub const BREW_FAILED_MESSAGE: &str =
    "Oops! The brew master is busy. Please try again in a moment.";

/// Loader text while a brew is in flight.
pub const LOADING_MESSAGE: &str = "Brewing your perfect drink...";

/// Default database path: `~/.moodbrew/moodbrew.db`.
/// Single DB for config and credentials.
pub fn default_db_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("cannot determine home directory")?;
    Ok(home.join(".moodbrew").join("moodbrew.db"))
}

/// Default directory generated drink images are written to.
pub fn default_image_dir() -> PathBuf {
    std::env::temp_dir().join("moodbrew")
}

/// Format a number with comma separators (e.g. 1,234,567).
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, c) in s.chars().enumerate() {
        if i > 0 && (s.len() - i).is_multiple_of(3) {
            result.push(',');
        }
        result.push(c);
    }
    result
}
