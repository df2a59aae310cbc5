use std::env;
use std::sync::Arc;

use teloxide::prelude::*;
use tldr_core::ai::handler::AI;

mod bot;
mod dependencies;
mod message_history;
mod summarize;

use crate::bot::handler_tree::handler_tree;
use crate::dependencies::BotDependencies;
use crate::message_history::handler::HistoryBuffer;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();
    log::info!("Starting tldr_bot...");

    // Missing credentials are fatal at startup, never a per-invocation error.
    let openai_api_key = env::var("OPENAI_API_KEY").expect("OPENAI_API_KEY not set");
    let bot = Bot::from_env();
    let me = bot.get_me().await.expect("Failed to get bot info");

    let ai = AI::new(&openai_api_key).expect("Failed to create OpenAI client");

    let bot_deps = BotDependencies {
        ai,
        history: Arc::new(HistoryBuffer::new()),
        bot_user_id: me.user.id,
    };

    Dispatcher::builder(bot, handler_tree())
        .dependencies(dptree::deps![bot_deps])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}
