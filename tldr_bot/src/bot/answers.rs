use anyhow::Result;
use teloxide::{Bot, prelude::*, types::Message};
use tldr_core::helpers::bot_commands::Command;

use crate::dependencies::BotDependencies;
use crate::summarize::handler::{handle_tldr, send_help};

pub async fn answers(
    bot: Bot,
    msg: Message,
    cmd: Command,
    bot_deps: BotDependencies,
) -> Result<()> {
    match cmd {
        Command::Help => send_help(&bot, msg.chat.id).await?,
        Command::Tldr(arg_string) => {
            // Last-resort hook: anything the pipeline did not report itself
            // is logged and answered with one generic message.
            if let Err(e) = handle_tldr(bot.clone(), msg.clone(), &arg_string, bot_deps).await {
                log::error!("tldr command failed: {e:#}");
                bot.send_message(
                    msg.chat.id,
                    "❌ An error occurred while processing your request.",
                )
                .await?;
            }
        }
    }
    Ok(())
}
