//! Mood chips and the free-text mood that together form a mood prompt.

use crate::consts::MOOD_OPTIONS;

/// What the user has picked on the selector screen.
///
/// Chips keep the order in which they were toggled on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoodSelection {
    custom: String,
    selected: Vec<String>,
}

impl MoodSelection {
    pub const fn new() -> Self {
        Self {
            custom: String::new(),
            selected: Vec::new(),
        }
    }

    /// Flip a chip. Returns `true` if the chip is now selected.
    pub fn toggle(&mut self, mood: &str) -> bool {
        if let Some(pos) = self.selected.iter().position(|m| m == mood) {
            self.selected.remove(pos);
            false
        } else {
            self.selected.push(mood.to_string());
            true
        }
    }

    pub fn is_selected(&self, mood: &str) -> bool {
        self.selected.iter().any(|m| m == mood)
    }

    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    /// Store the typed mood as-is.
    pub fn set_custom(&mut self, text: &str) {
        self.custom = text.to_string();
    }

    pub fn custom(&self) -> &str {
        &self.custom
    }

    /// Custom text first, then chips; empty parts dropped, joined by `", "`.
    pub fn combined(&self) -> String {
        std::iter::once(self.custom.as_str())
            .chain(self.selected.iter().map(String::as_str))
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Consume the selection, leaving an empty one behind.
    pub fn take(&mut self) -> String {
        let combined = self.combined();
        *self = Self::default();
        combined
    }
}

/// Map user input to a preset chip: a 1-based index or a case-insensitive name.
pub fn resolve(token: &str) -> Option<&'static str> {
    let token = token.trim();
    if let Ok(n) = token.parse::<usize>() {
        return n.checked_sub(1).and_then(|i| MOOD_OPTIONS.get(i)).copied();
    }
    MOOD_OPTIONS
        .iter()
        .find(|m| m.eq_ignore_ascii_case(token))
        .copied()
}
