//! Errors surfaced by the brewing workflow.
//!
//! Provider failures are collapsed into two user-facing variants so the
//! caller never sees raw API payloads. The underlying cause stays attached
//! as the error source for logging.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BrewError {
    /// The text model could not produce a usable drink concept.
    #[error("Failed to get a drink recommendation from the AI.")]
    Recommendation(#[source] anyhow::Error),

    /// The image model could not produce a picture of the drink.
    #[error("Failed to generate an image for the drink.")]
    Image(#[source] anyhow::Error),

    /// The provider answered, but without a drink name.
    #[error("Could not generate a drink recommendation.")]
    MissingDrink,

    /// No credentials were found for the provider.
    #[error("no Gemini API key found. Run `moodbrew login` or set GEMINI_API_KEY.")]
    MissingApiKey,
}

impl BrewError {
    /// Wrap any failure from the text call.
    pub fn recommendation(err: impl Into<anyhow::Error>) -> Self {
        Self::Recommendation(err.into())
    }

    /// Wrap any failure from the image call.
    pub fn image(err: impl Into<anyhow::Error>) -> Self {
        Self::Image(err.into())
    }
}
