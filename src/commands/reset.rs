use async_trait::async_trait;

use super::{Command, CommandResult, SessionInfo, StateChange};

pub struct ResetCommand;

#[async_trait]
impl Command for ResetCommand {
    fn name(&self) -> &str {
        "/reset"
    }

    fn aliases(&self) -> &[&str] {
        &["/back", "/again"]
    }

    fn description(&self) -> &str {
        "start over (back to the mood selector)"
    }

    async fn execute(&self, _args: &str, _info: &SessionInfo<'_>) -> CommandResult {
        CommandResult::StateChanged(StateChange::Reset)
    }
}
