use anyhow::Result;
use teloxide::{
    dispatching::{DpHandlerDescription, HandlerExt, UpdateFilterExt},
    dptree::{self, Handler},
    types::{Message, Update},
};
use tldr_core::helpers::bot_commands::Command;

use crate::bot::answers::answers;
use crate::dependencies::BotDependencies;

pub fn handler_tree() -> Handler<'static, Result<()>, DpHandlerDescription> {
    dptree::entry().branch(
        Update::filter_message()
            // Record group texts into the history buffer (passthrough). The
            // command message itself is recorded too; only the bot's own
            // messages are excluded, at fetch time.
            .inspect_async(|bot_deps: BotDependencies, msg: Message| async move {
                bot_deps.history.record(&msg);
            })
            .branch(
                dptree::entry()
                    .filter_command::<Command>()
                    .endpoint(answers),
            ),
    )
}
