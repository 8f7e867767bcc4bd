use async_trait::async_trait;

use super::{Command, CommandResult, SessionInfo};
use crate::card::render_selector;
use crate::session::Phase;

pub struct MoodsCommand;

#[async_trait]
impl Command for MoodsCommand {
    fn name(&self) -> &str {
        "/moods"
    }

    fn aliases(&self) -> &[&str] {
        &["/m"]
    }

    fn description(&self) -> &str {
        "show the mood chips and what is selected"
    }

    async fn execute(&self, _args: &str, info: &SessionInfo<'_>) -> CommandResult {
        if info.phase != Phase::Idle {
            println!("  moods are picked on the selector, /reset to start over");
            return CommandResult::Handled;
        }
        print!("{}", render_selector(info.selection));
        CommandResult::Handled
    }
}
