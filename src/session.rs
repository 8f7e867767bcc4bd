//! The brew workflow: validate the mood, ask for a drink, ask for its
//! picture, show the card. One request at a time, no retries.

use crate::brewer::{Brewer, DrinkRecommendation, Recommendation, TokenUsage};
use crate::consts::{BREW_FAILED_MESSAGE, EMPTY_MOOD_MESSAGE};
use crate::error::BrewError;
use crate::events::{Event, EventBus};

/// Which screen the user is looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Success,
    Error,
}

/// Session state. Loading, result and error are mutually exclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrewState {
    /// Mood selector is shown.
    Idle,
    /// A brew is in flight.
    Loading,
    /// The card is shown.
    Success(DrinkRecommendation),
    /// The error panel is shown, with its message.
    Error(String),
}

impl BrewState {
    pub fn phase(&self) -> Phase {
        match self {
            Self::Idle => Phase::Idle,
            Self::Loading => Phase::Loading,
            Self::Success(_) => Phase::Success,
            Self::Error(_) => Phase::Error,
        }
    }

    pub fn recommendation(&self) -> Option<&DrinkRecommendation> {
        match self {
            Self::Success(rec) => Some(rec),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error(msg) => Some(msg),
            _ => None,
        }
    }
}

/// Wires a [`Brewer`] to the UI state machine.
pub struct BrewSession {
    brewer: Box<dyn Brewer>,
    events: EventBus,
    mood_prompt: String,
    state: BrewState,
    usage: TokenUsage,
    brews: u64,
}

impl BrewSession {
    pub fn new(brewer: Box<dyn Brewer>) -> Self {
        Self {
            brewer,
            events: EventBus::default(),
            mood_prompt: String::new(),
            state: BrewState::Idle,
            usage: TokenUsage::default(),
            brews: 0,
        }
    }

    pub fn state(&self) -> &BrewState {
        &self.state
    }

    /// The last submitted mood prompt, used by remix.
    pub fn mood_prompt(&self) -> &str {
        &self.mood_prompt
    }

    /// Accumulated token usage across all text calls.
    pub fn usage(&self) -> TokenUsage {
        self.usage
    }

    /// Number of successful brews.
    pub fn brews(&self) -> u64 {
        self.brews
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Remember the mood (even if blank), then brew it.
    pub async fn submit(&mut self, mood: &str) -> &BrewState {
        self.mood_prompt = mood.to_string();
        self.brew(mood).await
    }

    /// Brew again with the remembered mood. No-op when there is none.
    pub async fn remix(&mut self) -> &BrewState {
        if !self.mood_prompt.is_empty() {
            let mood = self.mood_prompt.clone();
            self.brew(&mood).await;
        }
        &self.state
    }

    /// Back to the selector, forgetting the mood.
    pub fn reset(&mut self) {
        self.mood_prompt.clear();
        self.transition(BrewState::Idle);
    }

    /// Drop an interrupted brew. The mood is kept.
    pub fn abort(&mut self) {
        if self.state == BrewState::Loading {
            self.transition(BrewState::Idle);
        }
    }

    /// Run the workflow once. Any provider failure collapses into a
    /// single generic message; the cause goes to the log.
    pub async fn brew(&mut self, mood: &str) -> &BrewState {
        if mood.trim().is_empty() {
            self.transition(BrewState::Error(EMPTY_MOOD_MESSAGE.to_string()));
            return &self.state;
        }

        self.transition(BrewState::Loading);

        let next = match self.fetch(mood).await {
            Ok(rec) => {
                self.brews += 1;
                tracing::info!(drink = %rec.drink_name, "brewed");
                self.events.emit(Event::Brewed {
                    mood: mood.to_string(),
                    drink_name: rec.drink_name.clone(),
                });
                BrewState::Success(rec)
            }
            Err(err) => {
                tracing::error!("brew failed: {:#}", anyhow::Error::from(err));
                BrewState::Error(BREW_FAILED_MESSAGE.to_string())
            }
        };
        self.transition(next);
        &self.state
    }

    async fn fetch(&mut self, mood: &str) -> Result<DrinkRecommendation, BrewError> {
        let Recommendation { drink, usage } = self.brewer.recommend(mood).await?;
        if let Some(usage) = usage {
            self.usage.add(usage);
        }
        if drink.drink_name.is_empty() {
            return Err(BrewError::MissingDrink);
        }
        let image = self.brewer.render(&drink.drink_name).await?;
        Ok(DrinkRecommendation::new(drink, image))
    }

    fn transition(&mut self, next: BrewState) {
        let from = self.state.phase();
        self.state = next;
        let to = self.state.phase();
        tracing::debug!(?from, ?to, "phase changed");
        self.events.emit(Event::PhaseChanged { from, to });
    }
}
