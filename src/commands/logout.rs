use async_trait::async_trait;

use super::{Command, CommandResult, SessionInfo, StateChange};
use crate::auth::{self, AuthStorage};
use crate::consts::{API_KEY_ENV_VARS, PROVIDER};

pub struct LogoutCommand;

#[async_trait]
impl Command for LogoutCommand {
    fn name(&self) -> &str {
        "/logout"
    }

    fn description(&self) -> &str {
        "forget the saved API key"
    }

    async fn execute(&self, _args: &str, info: &SessionInfo<'_>) -> CommandResult {
        if let Err(e) = auth::logout(info.db_path, PROVIDER) {
            eprintln!("  ✗ {e:#}");
            return CommandResult::Handled;
        }
        println!("  ✓ saved API key removed");

        // An environment key may still be in effect.
        let status = AuthStorage::open(info.db_path)
            .and_then(|s| s.status(PROVIDER, API_KEY_ENV_VARS))
            .unwrap_or_else(|_| "not authenticated".to_string());
        CommandResult::StateChanged(StateChange::Auth(status))
    }
}
