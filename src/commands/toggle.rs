use async_trait::async_trait;

use super::{Command, CommandResult, SessionInfo, StateChange};
use crate::moods::resolve;
use crate::session::Phase;

pub struct ToggleCommand;

#[async_trait]
impl Command for ToggleCommand {
    fn name(&self) -> &str {
        "/toggle"
    }

    fn aliases(&self) -> &[&str] {
        &["/t"]
    }

    fn usage(&self) -> &str {
        "<mood|number>"
    }

    fn description(&self) -> &str {
        "select or unselect a mood chip"
    }

    async fn execute(&self, args: &str, info: &SessionInfo<'_>) -> CommandResult {
        if info.phase != Phase::Idle {
            println!("  moods are picked on the selector, /reset to start over");
            return CommandResult::Handled;
        }
        if args.is_empty() {
            eprintln!("  ✗ usage: /toggle <mood|number>  (see /moods)");
            return CommandResult::Handled;
        }
        match resolve(args) {
            Some(mood) => CommandResult::StateChanged(StateChange::ToggleMood(mood.to_string())),
            None => {
                eprintln!("  ✗ unknown mood: {args}  (see /moods)");
                CommandResult::Handled
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::{info_in, test_info};

    #[tokio::test]
    async fn toggles_by_name() {
        match ToggleCommand.execute("calm", &test_info()).await {
            CommandResult::StateChanged(StateChange::ToggleMood(m)) => assert_eq!(m, "Calm"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn toggles_by_number() {
        match ToggleCommand.execute("1", &test_info()).await {
            CommandResult::StateChanged(StateChange::ToggleMood(m)) => {
                assert_eq!(m, crate::consts::MOOD_OPTIONS[0])
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn unknown_mood_is_handled() {
        assert!(matches!(
            ToggleCommand.execute("grumpy", &test_info()).await,
            CommandResult::Handled
        ));
    }

    #[tokio::test]
    async fn missing_argument_is_handled() {
        assert!(matches!(
            ToggleCommand.execute("", &test_info()).await,
            CommandResult::Handled
        ));
    }

    #[tokio::test]
    async fn refused_while_card_is_shown() {
        assert!(matches!(
            ToggleCommand.execute("calm", &info_in(Phase::Success)).await,
            CommandResult::Handled
        ));
    }
}
