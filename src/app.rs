//! The interactive front end: routes REPL input to commands or the mood
//! form, runs brews under the spinner, and prints the view for each phase.

use std::path::PathBuf;

use anyhow::{Result, bail};

use crate::card::{render_card, render_error, render_selector, save_image};
use crate::commands::{CommandRegistry, CommandResult, SessionInfo, StateChange};
use crate::config::Settings;
use crate::moods::MoodSelection;
use crate::session::{BrewSession, BrewState, Phase};
use crate::spinner::Spinner;

/// Whether the REPL keeps going after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

enum BrewAction {
    Submit(String),
    Remix,
}

pub struct App {
    session: BrewSession,
    selection: MoodSelection,
    commands: CommandRegistry,
    settings: Settings,
    auth_status: String,
    db_path: String,
    open_images: bool,
    last_image: Option<PathBuf>,
}

impl App {
    pub fn new(
        session: BrewSession,
        settings: Settings,
        auth_status: String,
        db_path: String,
        open_images: bool,
    ) -> Self {
        Self {
            session,
            selection: MoodSelection::new(),
            commands: CommandRegistry::new(),
            settings,
            auth_status,
            db_path,
            open_images,
            last_image: None,
        }
    }

    pub fn session(&self) -> &BrewSession {
        &self.session
    }

    pub fn selection(&self) -> &MoodSelection {
        &self.selection
    }

    pub fn auth_status(&self) -> &str {
        &self.auth_status
    }

    /// Where the current card's image was written, if any.
    pub fn last_image(&self) -> Option<&PathBuf> {
        self.last_image.as_ref()
    }

    /// Prompt text for the current phase.
    pub fn prompt(&self) -> &'static str {
        match self.session.state().phase() {
            Phase::Idle => "mood> ",
            _ => "moodbrew> ",
        }
    }

    /// Handle one line of REPL input.
    /// Commands are matched on the trimmed line; a typed mood is kept as
    /// typed, minus the line ending.
    pub async fn handle_line(&mut self, line: &str) -> Flow {
        let typed = line.trim_end_matches(['\n', '\r']);
        let input = typed.trim();
        if input.is_empty() {
            return Flow::Continue;
        }

        let result = {
            let info = self.info();
            self.commands.dispatch(input, &info).await
        };

        match result {
            CommandResult::NotACommand => self.type_mood(typed).await,
            CommandResult::Handled => {}
            CommandResult::StateChanged(change) => self.apply(change).await,
            CommandResult::Quit => return Flow::Quit,
        }
        Flow::Continue
    }

    /// Brew a single mood without the REPL. Fails with the user-facing
    /// message when the brew does.
    pub async fn brew_once(&mut self, mood: &str) -> Result<()> {
        self.run(BrewAction::Submit(mood.to_string())).await;
        if let Some(msg) = self.session.state().error() {
            bail!("{msg}");
        }
        self.show();
        Ok(())
    }

    /// Print the view for the current phase.
    pub fn show(&mut self) {
        match self.session.state() {
            BrewState::Idle => print!("{}", render_selector(&self.selection)),
            BrewState::Loading => {}
            BrewState::Success(rec) => {
                let path = match save_image(&self.settings.image_dir, rec) {
                    Ok(path) => Some(path),
                    Err(e) => {
                        tracing::warn!("could not save image: {e:#}");
                        None
                    }
                };
                if self.open_images
                    && let Some(path) = &path
                    && let Err(e) = open::that(path)
                {
                    tracing::warn!("could not open image: {e}");
                }
                println!("{}", render_card(rec, path.as_deref()));
                self.last_image = path;
            }
            BrewState::Error(msg) => println!("{}", render_error(msg)),
        }
    }

    fn info(&self) -> SessionInfo<'_> {
        SessionInfo {
            text_model: &self.settings.text_model,
            image_model: &self.settings.image_model,
            auth_status: &self.auth_status,
            phase: self.session.state().phase(),
            mood_prompt: self.session.mood_prompt(),
            selection: &self.selection,
            usage: self.session.usage(),
            brews: self.session.brews(),
            db_path: &self.db_path,
        }
    }

    async fn type_mood(&mut self, text: &str) {
        if self.session.state().phase() != Phase::Idle {
            println!("  /remix for another drink, /reset to start over");
            return;
        }
        self.selection.set_custom(text);
        self.submit().await;
    }

    async fn submit(&mut self) {
        let mood = self.selection.take();
        self.run(BrewAction::Submit(mood)).await;
        self.show();
    }

    async fn apply(&mut self, change: StateChange) {
        match change {
            StateChange::ToggleMood(mood) => {
                let mark = if self.selection.toggle(&mood) { "●" } else { "○" };
                println!("  {mark} {mood}");
            }
            StateChange::Brew => self.submit().await,
            StateChange::Remix => {
                self.run(BrewAction::Remix).await;
                self.show();
            }
            StateChange::Reset => {
                self.session.reset();
                self.selection = MoodSelection::new();
                self.last_image = None;
                self.show();
            }
            StateChange::Auth(status) => self.auth_status = status,
        }
    }

    /// Submit `mood`, abandoning the brew if `interrupt` resolves first.
    /// The session then returns to the selector with the mood kept.
    pub async fn submit_until(&mut self, mood: &str, interrupt: impl Future<Output = ()>) {
        self.run_until(BrewAction::Submit(mood.to_string()), interrupt)
            .await;
        self.show();
    }

    /// Run a brew under the spinner. Ctrl+C cancels the brew, not the REPL.
    async fn run(&mut self, action: BrewAction) {
        let ctrl_c = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::warn!("cannot listen for Ctrl+C: {e}");
                std::future::pending::<()>().await;
            }
        };
        self.run_until(action, ctrl_c).await;
    }

    async fn run_until(&mut self, action: BrewAction, interrupt: impl Future<Output = ()>) {
        let spinner = Spinner::brewing();
        let session = &mut self.session;
        let interrupted = tokio::select! {
            biased;
            _ = async {
                match &action {
                    BrewAction::Submit(mood) => { session.submit(mood).await; }
                    BrewAction::Remix => { session.remix().await; }
                }
            } => false,
            _ = interrupt => true,
        };
        spinner.stop().await;

        if interrupted {
            self.session.abort();
            println!("\n  interrupted");
        }
    }
}
