use async_trait::async_trait;

use super::{Command, CommandResult, SessionInfo, StateChange};
use crate::session::Phase;

pub struct RemixCommand;

#[async_trait]
impl Command for RemixCommand {
    fn name(&self) -> &str {
        "/remix"
    }

    fn aliases(&self) -> &[&str] {
        &["/r"]
    }

    fn description(&self) -> &str {
        "brew another drink for the same mood"
    }

    async fn execute(&self, _args: &str, info: &SessionInfo<'_>) -> CommandResult {
        // An interrupted brew leaves the selector up with its mood kept.
        let kept = info.phase == Phase::Idle && !info.mood_prompt.is_empty();
        if info.phase != Phase::Success && !kept {
            println!("  nothing to remix yet");
            return CommandResult::Handled;
        }
        CommandResult::StateChanged(StateChange::Remix)
    }
}
