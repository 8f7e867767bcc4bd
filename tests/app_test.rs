use std::fs;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use moodbrew::app::{App, Flow};
use moodbrew::brewer::mock::MockBrewer;
use moodbrew::brewer::{Brewer, DrinkData, GeneratedImage, Recommendation};
use moodbrew::config::Settings;
use moodbrew::consts::{BREW_FAILED_MESSAGE, EMPTY_MOOD_MESSAGE};
use moodbrew::error::BrewError;
use moodbrew::session::{BrewSession, Phase};

fn drink(name: &str) -> DrinkData {
    DrinkData {
        drink_name: name.to_string(),
        quote: "One sip at a time.".to_string(),
    }
}

/// Shares a mock with the test. With `stall` set, the first text call
/// never answers, like a request the user gives up on.
struct Tracked {
    mock: Arc<MockBrewer>,
    stall: AtomicBool,
}

impl Tracked {
    fn new(mock: MockBrewer, stall: bool) -> (Self, Arc<MockBrewer>) {
        let mock = Arc::new(mock);
        let tracked = Self {
            mock: mock.clone(),
            stall: AtomicBool::new(stall),
        };
        (tracked, mock)
    }
}

#[async_trait]
impl Brewer for Tracked {
    async fn recommend(&self, mood: &str) -> Result<Recommendation, BrewError> {
        if self.stall.swap(false, Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
        self.mock.recommend(mood).await
    }

    async fn render(&self, drink_name: &str) -> Result<GeneratedImage, BrewError> {
        self.mock.render(drink_name).await
    }
}

fn build_app(mock: MockBrewer, dir: &tempfile::TempDir) -> App {
    build_app_with(Box::new(mock), dir)
}

fn build_app_with(brewer: Box<dyn Brewer>, dir: &tempfile::TempDir) -> App {
    let settings = Settings {
        text_model: "gemini-2.5-flash".to_string(),
        image_model: "imagen-4.0-generate-001".to_string(),
        image_dir: dir.path().join("images"),
    };
    App::new(
        BrewSession::new(brewer),
        settings,
        "API key ✓".to_string(),
        ":memory:".to_string(),
        false,
    )
}

fn happy_mock() -> MockBrewer {
    MockBrewer::new(
        vec![Ok(drink("Maple Ember Latte")), Ok(drink("Cinnamon Drift"))],
        vec![
            Ok(GeneratedImage::jpeg("aGVsbG8=")),
            Ok(GeneratedImage::jpeg("d29ybGQ=")),
        ],
    )
}

#[tokio::test]
async fn typed_mood_brews_and_saves_image() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = build_app(happy_mock(), &dir);

    assert_eq!(app.handle_line("rainy afternoon\n").await, Flow::Continue);

    assert_eq!(app.session().state().phase(), Phase::Success);
    assert_eq!(app.session().mood_prompt(), "rainy afternoon");
    let path = app.last_image().expect("image saved").clone();
    assert_eq!(path, dir.path().join("images").join("maple-ember-latte.jpg"));
    assert_eq!(fs::read(path).unwrap(), b"hello");
}

#[tokio::test]
async fn chips_and_typed_mood_are_combined() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = build_app(happy_mock(), &dir);

    app.handle_line("/toggle cozy").await;
    app.handle_line("/t 1").await;
    assert_eq!(app.selection().selected().len(), 2);

    app.handle_line("need a hug").await;

    assert_eq!(app.session().mood_prompt(), "need a hug, Cozy, Happy");
    // Submitting consumes the selection.
    assert!(app.selection().selected().is_empty());
    assert!(app.selection().custom().is_empty());
}

#[tokio::test]
async fn toggling_twice_unselects() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = build_app(happy_mock(), &dir);

    app.handle_line("/toggle calm").await;
    app.handle_line("/toggle Calm").await;

    assert!(app.selection().selected().is_empty());
}

#[tokio::test]
async fn brew_command_with_nothing_selected_errors() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = build_app(happy_mock(), &dir);

    app.handle_line("/brew").await;

    assert_eq!(app.session().state().error(), Some(EMPTY_MOOD_MESSAGE));
}

#[tokio::test]
async fn brew_command_uses_chips_only() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = build_app(happy_mock(), &dir);

    app.handle_line("/toggle energetic").await;
    app.handle_line("/brew").await;

    assert_eq!(app.session().mood_prompt(), "Energetic");
    assert_eq!(app.session().state().phase(), Phase::Success);
}

#[tokio::test]
async fn remix_then_reset() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = build_app(happy_mock(), &dir);

    app.handle_line("sleepy").await;
    app.handle_line("/remix").await;

    let rec = app.session().state().recommendation().unwrap();
    assert_eq!(rec.drink_name, "Cinnamon Drift");
    assert_eq!(app.session().brews(), 2);

    app.handle_line("/reset").await;
    assert_eq!(app.session().state().phase(), Phase::Idle);
    assert!(app.session().mood_prompt().is_empty());
    assert!(app.last_image().is_none());
}

#[tokio::test]
async fn typed_text_is_refused_on_card() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = build_app(happy_mock(), &dir);

    app.handle_line("sleepy").await;
    app.handle_line("something else").await;

    assert_eq!(app.session().mood_prompt(), "sleepy");
    assert_eq!(app.session().brews(), 1);
}

#[tokio::test]
async fn failure_shows_error_then_try_again_returns_to_selector() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = build_app(
        MockBrewer::new(vec![Err("quota".to_string())], vec![]),
        &dir,
    );

    app.handle_line("celebratory").await;
    assert_eq!(app.session().state().error(), Some(BREW_FAILED_MESSAGE));

    app.handle_line("/again").await;
    assert_eq!(app.session().state().phase(), Phase::Idle);
}

#[tokio::test]
async fn remix_is_ignored_on_selector() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = build_app(MockBrewer::new(vec![], vec![]), &dir);

    app.handle_line("/remix").await;

    assert_eq!(app.session().state().phase(), Phase::Idle);
}

#[tokio::test]
async fn quit_stops_the_loop() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = build_app(MockBrewer::new(vec![], vec![]), &dir);

    assert_eq!(app.handle_line("/quit").await, Flow::Quit);
    assert_eq!(app.handle_line("exit").await, Flow::Quit);
}

#[tokio::test]
async fn blank_line_is_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = build_app(MockBrewer::new(vec![], vec![]), &dir);

    assert_eq!(app.handle_line("   ").await, Flow::Continue);
    assert_eq!(app.session().state().phase(), Phase::Idle);
}

#[tokio::test]
async fn brew_once_fails_with_user_message() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = build_app(
        MockBrewer::new(vec![Err("down".to_string())], vec![]),
        &dir,
    );

    let err = app.brew_once("wired").await.unwrap_err();
    assert_eq!(err.to_string(), BREW_FAILED_MESSAGE);
}

#[tokio::test]
async fn brew_once_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = build_app(happy_mock(), &dir);

    app.brew_once("wired").await.unwrap();
    assert!(app.last_image().is_some());
}

#[tokio::test]
async fn prompt_follows_phase() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = build_app(happy_mock(), &dir);

    assert_eq!(app.prompt(), "mood> ");
    app.handle_line("calm").await;
    assert_eq!(app.prompt(), "moodbrew> ");
}

#[tokio::test]
async fn mood_starting_with_quit_word_is_brewed() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = build_app(happy_mock(), &dir);

    assert_eq!(app.handle_line("exit the grind").await, Flow::Continue);
    assert_eq!(app.session().mood_prompt(), "exit the grind");
}

#[tokio::test]
async fn typed_mood_reaches_the_brewer_as_typed() {
    let dir = tempfile::tempdir().unwrap();
    let (brewer, mock) = Tracked::new(happy_mock(), false);
    let mut app = build_app_with(Box::new(brewer), &dir);

    app.handle_line("  energetic \n").await;

    assert_eq!(app.session().mood_prompt(), "  energetic ");
    assert_eq!(mock.moods(), vec!["  energetic ".to_string()]);
}

#[tokio::test]
async fn interrupted_brew_can_be_remixed() {
    let dir = tempfile::tempdir().unwrap();
    let (brewer, mock) = Tracked::new(happy_mock(), true);
    let mut app = build_app_with(Box::new(brewer), &dir);

    app.submit_until("cozy", async {}).await;

    assert_eq!(app.session().state().phase(), Phase::Idle);
    assert_eq!(app.session().mood_prompt(), "cozy");

    app.handle_line("/remix").await;

    let rec = app.session().state().recommendation().expect("card");
    assert_eq!(rec.drink_name, "Maple Ember Latte");
    assert_eq!(mock.moods(), vec!["cozy".to_string()]);
}
