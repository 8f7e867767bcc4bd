use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{Brewer, DrinkData, GeneratedImage, Recommendation, TokenUsage};
use crate::error::BrewError;

/// One scripted answer. `Err` carries the failure cause.
pub type Reply<T> = Result<T, String>;

/// A scripted brewer for tests. Returns pre-defined replies in order and
/// records what it was asked.
pub struct MockBrewer {
    drinks: Vec<Reply<DrinkData>>,
    images: Vec<Reply<GeneratedImage>>,
    usage: Option<TokenUsage>,
    drink_index: AtomicUsize,
    image_index: AtomicUsize,
    moods: Mutex<Vec<String>>,
    names: Mutex<Vec<String>>,
}

impl MockBrewer {
    pub fn new(drinks: Vec<Reply<DrinkData>>, images: Vec<Reply<GeneratedImage>>) -> Self {
        Self {
            drinks,
            images,
            usage: None,
            drink_index: AtomicUsize::new(0),
            image_index: AtomicUsize::new(0),
            moods: Mutex::new(Vec::new()),
            names: Mutex::new(Vec::new()),
        }
    }

    /// Report this usage on every successful text call.
    pub fn with_usage(mut self, usage: TokenUsage) -> Self {
        self.usage = Some(usage);
        self
    }

    /// Moods passed to `recommend`, in call order.
    pub fn moods(&self) -> Vec<String> {
        self.moods.lock().unwrap().clone()
    }

    /// Drink names passed to `render`, in call order.
    pub fn rendered(&self) -> Vec<String> {
        self.names.lock().unwrap().clone()
    }
}

#[async_trait]
impl Brewer for MockBrewer {
    async fn recommend(&self, mood: &str) -> Result<Recommendation, BrewError> {
        self.moods.lock().unwrap().push(mood.to_string());
        let i = self.drink_index.fetch_add(1, Ordering::SeqCst);
        let reply = self.drinks.get(i).ok_or_else(|| {
            BrewError::recommendation(anyhow::anyhow!(
                "MockBrewer: no more drinks (called {} times)",
                i + 1
            ))
        })?;
        match reply {
            Ok(drink) => Ok(Recommendation {
                drink: drink.clone(),
                usage: self.usage,
            }),
            Err(cause) => Err(BrewError::recommendation(anyhow::anyhow!("{cause}"))),
        }
    }

    async fn render(&self, drink_name: &str) -> Result<GeneratedImage, BrewError> {
        self.names.lock().unwrap().push(drink_name.to_string());
        let i = self.image_index.fetch_add(1, Ordering::SeqCst);
        let reply = self.images.get(i).ok_or_else(|| {
            BrewError::image(anyhow::anyhow!(
                "MockBrewer: no more images (called {} times)",
                i + 1
            ))
        })?;
        reply
            .clone()
            .map_err(|cause| BrewError::image(anyhow::anyhow!("{cause}")))
    }
}
