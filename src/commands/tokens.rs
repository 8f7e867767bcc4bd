use async_trait::async_trait;

use super::{Command, CommandResult, SessionInfo};
use crate::consts::format_number;

pub struct TokensCommand;

impl TokensCommand {
    fn report(info: &SessionInfo<'_>) -> String {
        let usage = info.usage;
        if usage.total() == 0 {
            return "  no tokens used yet".to_string();
        }
        let mut line = format!(
            "  text model: {} in + {} out = {}",
            format_number(usage.input_tokens),
            format_number(usage.output_tokens),
            format_number(usage.total()),
        );
        if info.brews > 0 {
            line.push_str(&format!(
                " (~{} per drink)",
                format_number(usage.total() / info.brews)
            ));
        }
        line
    }
}

#[async_trait]
impl Command for TokensCommand {
    fn name(&self) -> &str {
        "/tokens"
    }

    fn description(&self) -> &str {
        "show token usage for this session"
    }

    async fn execute(&self, _args: &str, info: &SessionInfo<'_>) -> CommandResult {
        println!("{}", Self::report(info));
        CommandResult::Handled
    }
}
