use std::sync::Arc;

use teloxide::types::UserId;
use tldr_core::ai::handler::AI;

use crate::message_history::handler::HistoryBuffer;

#[derive(Clone)]
pub struct BotDependencies {
    pub ai: AI,
    pub history: Arc<HistoryBuffer>,
    /// The bot's own identity, read-only, used for self-message exclusion.
    pub bot_user_id: UserId,
}
