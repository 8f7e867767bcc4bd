use anyhow::Result;
use async_trait::async_trait;

use super::{Command, CommandResult, SessionInfo, StateChange};
use crate::auth::{self, AuthStorage};
use crate::consts::{API_KEY_ENV_VARS, PROVIDER};

const KEY_URL: &str = "https://aistudio.google.com/app/apikey";

pub struct LoginCommand;

/// Store the key and return the new auth status.
fn save_key(db_path: &str, key: &str) -> Result<String> {
    auth::login(db_path, PROVIDER, key)?;
    AuthStorage::open(db_path)?.status(PROVIDER, API_KEY_ENV_VARS)
}

#[async_trait]
impl Command for LoginCommand {
    fn name(&self) -> &str {
        "/login"
    }

    fn description(&self) -> &str {
        "save a Gemini API key"
    }

    async fn execute(&self, _args: &str, info: &SessionInfo<'_>) -> CommandResult {
        println!("  Get a key at {KEY_URL}\n");
        print!("  Paste your Gemini API key: ");
        if std::io::Write::flush(&mut std::io::stdout()).is_err() {
            return CommandResult::Handled;
        }

        let mut key = String::new();
        if std::io::stdin().read_line(&mut key).is_err() {
            eprintln!("  ✗ failed to read input");
            return CommandResult::Handled;
        }

        match save_key(info.db_path, &key) {
            Ok(status) => {
                println!("  ✓ API key saved");
                CommandResult::StateChanged(StateChange::Auth(status))
            }
            Err(e) => {
                eprintln!("  ✗ login failed: {e:#}");
                CommandResult::Handled
            }
        }
    }
}
