use anyhow::{Result, anyhow, bail};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::auth::AuthStorage;
use crate::consts::{API_KEY_ENV_VARS, DEFAULT_IMAGE_MODEL, DEFAULT_TEXT_MODEL, PROVIDER};
use crate::error::BrewError;
use crate::prompts::drink::{
    build_image_prompt, build_recommendation_prompt, recommendation_schema,
};

use super::{Brewer, DrinkData, GeneratedImage, Recommendation, TokenUsage};

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const IMAGE_MIME_TYPE: &str = "image/jpeg";
const IMAGE_ASPECT_RATIO: &str = "1:1";

/// A brewer backed by the Google Generative Language API:
/// Gemini for the drink concept, Imagen for the photo.
pub struct GeminiBrewer {
    text_model: String,
    image_model: String,
    auth: AuthStorage,
    client: reqwest::Client,
}

impl GeminiBrewer {
    pub fn new(text_model: Option<String>, image_model: Option<String>, auth: AuthStorage) -> Self {
        Self {
            text_model: text_model.unwrap_or_else(|| DEFAULT_TEXT_MODEL.to_string()),
            image_model: image_model.unwrap_or_else(|| DEFAULT_IMAGE_MODEL.to_string()),
            auth,
            client: reqwest::Client::new(),
        }
    }

    pub fn text_model(&self) -> &str {
        &self.text_model
    }

    pub fn image_model(&self) -> &str {
        &self.image_model
    }

    /// Look up the key. Storage failures are wrapped by `stage`, so the log
    /// names the call that needed the key.
    fn api_key(&self, stage: fn(anyhow::Error) -> BrewError) -> Result<String, BrewError> {
        self.auth
            .get_api_key(PROVIDER, API_KEY_ENV_VARS)
            .map_err(stage)?
            .ok_or(BrewError::MissingApiKey)
    }

    fn endpoint(model: &str, method: &str) -> String {
        let model = model.strip_prefix("models/").unwrap_or(model);
        format!("{API_BASE}/models/{model}:{method}")
    }

    fn build_text_request(mood: &str) -> TextRequest {
        TextRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![TextPart {
                    text: build_recommendation_prompt(mood),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: recommendation_schema(),
            },
        }
    }

    fn build_image_request(drink_name: &str) -> ImageRequest {
        ImageRequest {
            instances: vec![ImageInstance {
                prompt: build_image_prompt(drink_name),
            }],
            parameters: ImageParameters {
                sample_count: 1,
                aspect_ratio: IMAGE_ASPECT_RATIO.to_string(),
                output_options: OutputOptions {
                    mime_type: IMAGE_MIME_TYPE.to_string(),
                },
            },
        }
    }

    async fn post<B: Serialize + ?Sized>(
        &self,
        url: &str,
        api_key: &str,
        body: &B,
    ) -> Result<reqwest::Response> {
        tracing::debug!(%url, "sending request");
        let resp = self
            .client
            .post(url)
            .header("x-goog-api-key", api_key)
            .json(body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            bail!("Gemini API error ({}): {}", status, text);
        }
        Ok(resp)
    }

    /// Join the text parts of the first candidate.
    fn extract_text(resp: &TextResponse) -> Result<String> {
        if let Some(err) = &resp.error {
            bail!("Gemini API error: {}", err.message);
        }
        let text: String = resp
            .candidates
            .as_deref()
            .and_then(|c| c.first())
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            bail!("Gemini API returned empty response");
        }
        Ok(text)
    }

    /// Parse the model's JSON answer. Both fields must be non-empty.
    fn parse_drink(text: &str) -> Result<DrinkData> {
        let json_str = extract_json(text);
        let raw: RawDrink = serde_json::from_str(json_str)
            .map_err(|e| anyhow!("failed to parse drink JSON: {}\nraw: {}", e, text))?;

        match (raw.drink_name, raw.quote) {
            (Some(drink_name), Some(quote)) if !drink_name.is_empty() && !quote.is_empty() => {
                Ok(DrinkData { drink_name, quote })
            }
            _ => bail!("Invalid data structure from API."),
        }
    }

    /// Take the first prediction that actually carries image bytes.
    fn extract_image(resp: ImageResponse) -> Result<GeneratedImage> {
        resp.predictions
            .unwrap_or_default()
            .into_iter()
            .find_map(|p| {
                let bytes = p.bytes_base64_encoded.filter(|b| !b.is_empty())?;
                Some(GeneratedImage {
                    mime_type: p.mime_type.unwrap_or_else(|| IMAGE_MIME_TYPE.to_string()),
                    base64: bytes,
                })
            })
            .ok_or_else(|| anyhow!("No image was generated."))
    }

    async fn fetch_drink(&self, api_key: &str, mood: &str) -> Result<Recommendation> {
        let url = Self::endpoint(&self.text_model, "generateContent");
        let body = Self::build_text_request(mood);
        let resp: TextResponse = self.post(&url, api_key, &body).await?.json().await?;

        let usage = resp.usage_metadata.as_ref().map(|u| TokenUsage {
            input_tokens: u.prompt_token_count,
            output_tokens: u.candidates_token_count,
        });
        if let Some(usage) = usage {
            tracing::debug!(
                input = usage.input_tokens,
                output = usage.output_tokens,
                "token usage"
            );
        }

        let text = Self::extract_text(&resp)?;
        let drink = Self::parse_drink(&text)?;
        Ok(Recommendation { drink, usage })
    }

    async fn fetch_image(&self, api_key: &str, drink_name: &str) -> Result<GeneratedImage> {
        let url = Self::endpoint(&self.image_model, "predict");
        let body = Self::build_image_request(drink_name);
        let resp: ImageResponse = self.post(&url, api_key, &body).await?.json().await?;
        Self::extract_image(resp)
    }
}

#[async_trait]
impl Brewer for GeminiBrewer {
    async fn recommend(&self, mood: &str) -> Result<Recommendation, BrewError> {
        let api_key = self.api_key(BrewError::recommendation)?;
        self.fetch_drink(&api_key, mood)
            .await
            .map_err(BrewError::recommendation)
    }

    async fn render(&self, drink_name: &str) -> Result<GeneratedImage, BrewError> {
        let api_key = self.api_key(BrewError::image)?;
        self.fetch_image(&api_key, drink_name)
            .await
            .map_err(BrewError::image)
    }
}

/// Extract JSON from text that may be wrapped in markdown code fences.
/// Opening and closing fences are stripped independently.
fn extract_json(text: &str) -> &str {
    let mut json = text.trim();
    json = json
        .strip_prefix("```json")
        .or_else(|| json.strip_prefix("```"))
        .unwrap_or(json);
    json = json.strip_suffix("```").unwrap_or(json);
    json.trim()
}

// --- API types ---

#[derive(Serialize)]
struct TextRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<TextPart>,
}

#[derive(Serialize)]
struct TextPart {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: Value,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TextResponse {
    candidates: Option<Vec<Candidate>>,
    usage_metadata: Option<UsageMetadata>,
    error: Option<ApiError>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u64,
    #[serde(default)]
    candidates_token_count: u64,
}

#[derive(Deserialize)]
struct ApiError {
    message: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDrink {
    drink_name: Option<String>,
    quote: Option<String>,
}

#[derive(Serialize)]
struct ImageRequest {
    instances: Vec<ImageInstance>,
    parameters: ImageParameters,
}

#[derive(Serialize)]
struct ImageInstance {
    prompt: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageParameters {
    sample_count: u32,
    aspect_ratio: String,
    output_options: OutputOptions,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OutputOptions {
    mime_type: String,
}

#[derive(Deserialize)]
struct ImageResponse {
    predictions: Option<Vec<Prediction>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Prediction {
    bytes_base64_encoded: Option<String>,
    mime_type: Option<String>,
}
