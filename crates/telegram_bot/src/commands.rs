//! Slash commands

use teloxide::utils::command::BotCommands;

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Команды бота:")]
pub enum ChatCommand {
    #[command(description = "Баланс месяца и главное меню.")]
    Start,
    #[command(description = "Как вносить записи одной строкой.")]
    Help,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands_with_and_without_bot_name() {
        assert_eq!(
            ChatCommand::parse("/start", "finance_bot").unwrap(),
            ChatCommand::Start
        );
        assert_eq!(
            ChatCommand::parse("/help@finance_bot", "finance_bot").unwrap(),
            ChatCommand::Help
        );
        assert!(ChatCommand::parse("/export", "finance_bot").is_err());
    }
}
