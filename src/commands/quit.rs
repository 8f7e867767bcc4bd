use async_trait::async_trait;

use super::{Command, CommandResult, SessionInfo};
use crate::session::Phase;

/// Leaves the REPL. Bare `quit` / `exit` work too, so a user who never read
/// `/help` can still get out.
pub struct QuitCommand;

impl QuitCommand {
    fn farewell(info: &SessionInfo<'_>) -> &'static str {
        match (info.phase, info.brews) {
            (Phase::Success, _) => "  enjoy your drink ☕",
            (_, 0) => "  no drinks today, maybe next time",
            _ => "  see you next brew",
        }
    }
}

#[async_trait]
impl Command for QuitCommand {
    fn name(&self) -> &str {
        "/quit"
    }

    fn aliases(&self) -> &[&str] {
        &["quit", "exit", "/exit", "/bye"]
    }

    fn description(&self) -> &str {
        "leave MoodBrew"
    }

    async fn execute(&self, _args: &str, info: &SessionInfo<'_>) -> CommandResult {
        println!("{}", Self::farewell(info));
        CommandResult::Quit
    }
}
