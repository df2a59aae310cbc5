use std::collections::VecDeque;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use teloxide::types::{ChatId, Message, User, UserId};

/// One stored line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageEntry {
    pub sender_id: Option<UserId>,
    pub sender: Option<String>,
    pub text: String,
    pub sent_at: DateTime<Utc>,
}

impl MessageEntry {
    /// Build one entry from message parts. Sender display prefers the
    /// username, then the first name; the text is capped at `MAX_CHARS`.
    pub fn new(from: Option<&User>, text: &str, sent_at: DateTime<Utc>) -> Self {
        let sender_id = from.map(|u| u.id);
        let sender = from.and_then(|u| u.username.clone().or_else(|| Some(u.first_name.clone())));

        let mut text = text.to_owned();
        if text.chars().count() > MAX_CHARS {
            text = text.chars().take(MAX_CHARS).collect();
            text.push('…');
        }

        Self {
            sender_id,
            sender,
            text,
            sent_at,
        }
    }
}

/// Per-chat cap; the oldest entry is dropped first.
const MAX_MESSAGES_PER_CHAT: usize = 2048;
const MAX_CHARS: usize = 1000;

/// Rolling per-chat message buffer. The Bot API has no history-read
/// endpoint, so the handler tree records every group text as it arrives.
pub struct HistoryBuffer {
    chats: DashMap<ChatId, VecDeque<MessageEntry>>,
}

impl HistoryBuffer {
    pub fn new() -> Self {
        Self {
            chats: DashMap::new(),
        }
    }

    /// Log a new group text. Skips DMs (never recorded, for privacy) and
    /// non-text messages.
    pub fn record(&self, msg: &Message) {
        if msg.chat.is_private() {
            return;
        }
        let Some(text) = msg.text() else { return };

        self.push(
            msg.chat.id,
            MessageEntry::new(msg.from.as_ref(), text, msg.date),
        );
    }

    pub fn push(&self, chat_id: ChatId, entry: MessageEntry) {
        let mut buf = self.chats.entry(chat_id).or_default();
        if buf.len() >= MAX_MESSAGES_PER_CHAT {
            buf.pop_front(); // drop oldest
        }
        buf.push_back(entry);
    }
}

impl Default for HistoryBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Narrow interface to the channel-history collaborator.
#[async_trait]
pub trait ChannelHistory: Send + Sync {
    /// Every message strictly after `cutoff`, oldest first, unbounded.
    async fn messages_after(
        &self,
        chat_id: ChatId,
        cutoff: DateTime<Utc>,
    ) -> anyhow::Result<Vec<MessageEntry>>;

    /// The most recent `limit` messages, newest first.
    async fn recent_messages(
        &self,
        chat_id: ChatId,
        limit: usize,
    ) -> anyhow::Result<Vec<MessageEntry>>;
}

#[async_trait]
impl ChannelHistory for HistoryBuffer {
    async fn messages_after(
        &self,
        chat_id: ChatId,
        cutoff: DateTime<Utc>,
    ) -> anyhow::Result<Vec<MessageEntry>> {
        Ok(self
            .chats
            .get(&chat_id)
            .map(|buf| buf.iter().filter(|e| e.sent_at > cutoff).cloned().collect())
            .unwrap_or_default())
    }

    async fn recent_messages(
        &self,
        chat_id: ChatId,
        limit: usize,
    ) -> anyhow::Result<Vec<MessageEntry>> {
        Ok(self
            .chats
            .get(&chat_id)
            .map(|buf| buf.iter().rev().take(limit).cloned().collect())
            .unwrap_or_default())
    }
}
