use async_trait::async_trait;

use super::{Command, CommandResult, SessionInfo, StateChange};
use crate::session::Phase;

pub struct BrewCommand;

#[async_trait]
impl Command for BrewCommand {
    fn name(&self) -> &str {
        "/brew"
    }

    fn aliases(&self) -> &[&str] {
        &["/b"]
    }

    fn description(&self) -> &str {
        "brew my mood from the selected chips"
    }

    async fn execute(&self, _args: &str, info: &SessionInfo<'_>) -> CommandResult {
        if info.phase != Phase::Idle {
            println!("  /remix for another drink, /reset to start over");
            return CommandResult::Handled;
        }
        CommandResult::StateChanged(StateChange::Brew)
    }
}
