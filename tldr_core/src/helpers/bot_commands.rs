use teloxide::utils::command::BotCommands;

#[derive(BotCommands, Clone)]
#[command(
    rename_rule = "lowercase",
    description = "These commands are supported:"
)]
pub enum Command {
    #[command(description = "Summarize recent chat messages, e.g. /tldr -h 2.")]
    Tldr(String),
    #[command(description = "Display this text.")]
    Help,
}
