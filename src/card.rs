//! Terminal views for each phase: selector, card and error panel.
//!
//! Views are rendered to strings so the REPL decides where they go.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use base64::{Engine, engine::general_purpose::STANDARD};

use crate::brewer::DrinkRecommendation;
use crate::consts::MOOD_OPTIONS;
use crate::moods::MoodSelection;

const RULE_WIDTH: usize = 44;

/// The mood selector with chip marks.
pub fn render_selector(selection: &MoodSelection) -> String {
    let mut out = String::from("  How are you feeling today?\n\n");
    for (i, mood) in MOOD_OPTIONS.iter().enumerate() {
        let mark = if selection.is_selected(mood) { "●" } else { "○" };
        out.push_str(&format!("  {mark} {:>2}. {mood}\n", i + 1));
    }
    out.push_str("\n  Or type your own mood, vibe, or craving...\n");
    out.push_str("  /toggle <mood> picks a chip, /brew to Brew My Mood\n");
    out
}

/// The recommendation card.
pub fn render_card(rec: &DrinkRecommendation, image: Option<&Path>) -> String {
    let rule = "─".repeat(RULE_WIDTH);
    let image_line = match image {
        Some(path) => format!("  🖼  {}", path.display()),
        None => "  🖼  (image not saved)".to_string(),
    };
    format!(
        "\n  {rule}\n{image_line}\n\n  {name}\n\n  \"{quote}\"\n  {rule}\n  /reset  Start Over    /remix  Remix\n",
        name = rec.drink_name,
        quote = rec.quote,
    )
}

/// The error panel.
pub fn render_error(message: &str) -> String {
    format!("\n  ✗ {message}\n\n  /reset  Try Again\n")
}

/// Decode the card's image and write it as `<slug>.<ext>` under `dir`.
pub fn save_image(dir: &Path, rec: &DrinkRecommendation) -> Result<PathBuf> {
    let bytes = STANDARD
        .decode(rec.image.base64.trim())
        .context("image payload is not valid base64")?;

    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create image directory {}", dir.display()))?;

    let path = dir.join(format!(
        "{}.{}",
        slug(&rec.drink_name),
        extension(&rec.image.mime_type)
    ));
    fs::write(&path, bytes).with_context(|| format!("failed to write {}", path.display()))?;
    tracing::debug!(path = %path.display(), "image saved");
    Ok(path)
}

/// Lowercase ASCII alphanumerics joined by single dashes.
fn slug(name: &str) -> String {
    let slug = name
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("-");
    if slug.is_empty() {
        "drink".to_string()
    } else {
        slug
    }
}

fn extension(mime_type: &str) -> &'static str {
    match mime_type {
        "image/png" => "png",
        "image/webp" => "webp",
        _ => "jpg",
    }
}
