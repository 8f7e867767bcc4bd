//! The loader: an animated line on stderr while a brew is in flight.

use std::io::Write;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::consts::LOADING_MESSAGE;

/// Steam rising over a cup.
const FRAMES: &[&str] = &["☕ ", "☕.", "☕:", "☕⁖", "☕⁘", "☕⁙"];

const INTERVAL: Duration = Duration::from_millis(120);

/// A terminal spinner that runs in a background task.
///
/// Writes to stderr so the card on stdout stays clean.
pub struct Spinner {
    handle: JoinHandle<()>,
    cancel: watch::Sender<bool>,
}

impl Spinner {
    /// Start the standard "Brewing your perfect drink..." loader.
    pub fn brewing() -> Self {
        Self::start(LOADING_MESSAGE)
    }

    pub fn start(message: &str) -> Self {
        let (cancel, mut cancel_rx) = watch::channel(false);
        let message = message.to_string();

        let handle = tokio::spawn(async move {
            for frame in FRAMES.iter().cycle() {
                // \x1b[2K clears the line, \r returns to its start
                eprint!("\x1b[2K\r  {frame} {message}");
                let _ = std::io::stderr().flush();

                tokio::select! {
                    _ = tokio::time::sleep(INTERVAL) => {}
                    _ = cancel_rx.changed() => break,
                }
            }
            eprint!("\x1b[2K\r");
            let _ = std::io::stderr().flush();
        });

        Self { handle, cancel }
    }

    /// Stop the spinner and clear its line.
    pub async fn stop(self) {
        let _ = self.cancel.send(true);
        let _ = self.handle.await;
    }
}
