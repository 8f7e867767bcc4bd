pub mod gemini;
pub mod mock;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::BrewError;

const JPEG: &str = "image/jpeg";

/// A drink concept returned by the text model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrinkData {
    pub drink_name: String,
    pub quote: String,
}

/// A generated picture, still base64-encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    pub mime_type: String,
    pub base64: String,
}

impl GeneratedImage {
    pub fn jpeg(base64: impl Into<String>) -> Self {
        Self {
            mime_type: JPEG.to_string(),
            base64: base64.into(),
        }
    }

    /// `data:image/jpeg;base64,<bytes>`, usable as an image source.
    /// The prefix is always JPEG; `mime_type` only picks the saved file's
    /// extension.
    pub fn data_url(&self) -> String {
        format!("data:{JPEG};base64,{}", self.base64)
    }
}

/// The finished card: the drink concept plus its picture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrinkRecommendation {
    pub drink_name: String,
    pub quote: String,
    pub image: GeneratedImage,
}

impl DrinkRecommendation {
    pub fn new(drink: DrinkData, image: GeneratedImage) -> Self {
        Self {
            drink_name: drink.drink_name,
            quote: drink.quote,
            image,
        }
    }

    pub fn image_url(&self) -> String {
        self.image.data_url()
    }
}

/// Token usage from a single text call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

impl TokenUsage {
    /// Accumulate another usage into this one.
    pub fn add(&mut self, other: TokenUsage) {
        self.input_tokens += other.input_tokens;
        self.output_tokens += other.output_tokens;
    }

    /// Total tokens (input + output).
    pub fn total(&self) -> u64 {
        self.input_tokens + self.output_tokens
    }
}

/// The result of a text call: the concept + optional token usage.
#[derive(Debug, Clone)]
pub struct Recommendation {
    pub drink: DrinkData,
    pub usage: Option<TokenUsage>,
}

/// The generative backend. Could be Gemini or a test script.
#[async_trait]
pub trait Brewer: Send + Sync {
    /// Ask for a drink concept matching the mood.
    async fn recommend(&self, mood: &str) -> Result<Recommendation, BrewError>;

    /// Ask for a photograph of the named drink.
    async fn render(&self, drink_name: &str) -> Result<GeneratedImage, BrewError>;
}
