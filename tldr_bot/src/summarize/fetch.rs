use chrono::{Duration, Utc};
use teloxide::types::{ChatId, UserId};

use crate::message_history::handler::{ChannelHistory, MessageEntry};
use crate::summarize::args::WindowArg;
use crate::summarize::error::TldrError;

/// Resolve a window spec against the history collaborator. Returns a
/// non-empty chronological window with the bot's own messages removed.
pub async fn fetch_window(
    history: &dyn ChannelHistory,
    chat_id: ChatId,
    window: &WindowArg,
    bot_user_id: UserId,
) -> Result<Vec<MessageEntry>, TldrError> {
    let entries = match window {
        WindowArg::Hours(raw) => {
            let hours: f64 = raw
                .parse()
                .map_err(|_| TldrError::InvalidNumber(raw.clone()))?;
            if !hours.is_finite() {
                return Err(TldrError::InvalidNumber(raw.clone()));
            }
            let cutoff = Utc::now()
                .checked_sub_signed(Duration::milliseconds((hours * 3_600_000.0) as i64))
                .ok_or_else(|| TldrError::InvalidNumber(raw.clone()))?;
            // already oldest-first
            history
                .messages_after(chat_id, cutoff)
                .await
                .map_err(TldrError::Fetch)?
        }
        WindowArg::Count(raw) => {
            let limit: i64 = raw
                .parse()
                .map_err(|_| TldrError::InvalidNumber(raw.clone()))?;
            // Zero or negative passes through as an empty request.
            let mut recent = history
                .recent_messages(chat_id, limit.max(0) as usize)
                .await
                .map_err(TldrError::Fetch)?;
            recent.reverse(); // newest-first to chronological
            recent
        }
    };

    // Never summarize the bot's own prior summaries.
    let window_entries: Vec<MessageEntry> = entries
        .into_iter()
        .filter(|e| e.sender_id != Some(bot_user_id))
        .collect();

    if window_entries.is_empty() {
        return Err(TldrError::EmptyWindow);
    }
    Ok(window_entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message_history::handler::HistoryBuffer;
    use async_trait::async_trait;
    use chrono::{DateTime, Duration, Utc};

    const BOT: UserId = UserId(999);
    const CHAT: ChatId = ChatId(-100);

    fn entry(user: u64, text: &str, sent_at: DateTime<Utc>) -> MessageEntry {
        MessageEntry {
            sender_id: Some(UserId(user)),
            sender: Some(format!("user{user}")),
            text: text.to_owned(),
            sent_at,
        }
    }

    fn seeded_buffer() -> HistoryBuffer {
        let buffer = HistoryBuffer::new();
        let now = Utc::now();
        buffer.push(CHAT, entry(1, "old news", now - Duration::hours(5)));
        buffer.push(CHAT, entry(2, "question", now - Duration::minutes(90)));
        buffer.push(CHAT, entry(999, "previous summary", now - Duration::minutes(60)));
        buffer.push(CHAT, entry(1, "answer", now - Duration::minutes(30)));
        buffer.push(CHAT, entry(3, "followup", now - Duration::minutes(5)));
        buffer
    }

    #[tokio::test]
    async fn hours_window_is_cutoff_bounded_and_chronological() {
        let buffer = seeded_buffer();
        let window = fetch_window(&buffer, CHAT, &WindowArg::Hours("2".into()), BOT)
            .await
            .unwrap();
        let texts: Vec<_> = window.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, ["question", "answer", "followup"]);
    }

    #[tokio::test]
    async fn count_window_is_bounded_and_chronological() {
        let buffer = seeded_buffer();
        let window = fetch_window(&buffer, CHAT, &WindowArg::Count("2".into()), BOT)
            .await
            .unwrap();
        let texts: Vec<_> = window.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, ["answer", "followup"]);
        assert!(window.len() <= 2);
    }

    #[tokio::test]
    async fn bot_messages_are_always_excluded() {
        let buffer = seeded_buffer();
        for window in [
            WindowArg::Hours("24".into()),
            WindowArg::Count("100".into()),
        ] {
            let got = fetch_window(&buffer, CHAT, &window, BOT).await.unwrap();
            assert!(got.iter().all(|e| e.sender_id != Some(BOT)));
        }
    }

    #[tokio::test]
    async fn window_of_only_bot_messages_is_empty() {
        let buffer = HistoryBuffer::new();
        buffer.push(CHAT, entry(999, "summary one", Utc::now()));
        buffer.push(CHAT, entry(999, "summary two", Utc::now()));

        let err = fetch_window(&buffer, CHAT, &WindowArg::Count("10".into()), BOT)
            .await
            .unwrap_err();
        assert!(matches!(err, TldrError::EmptyWindow));
        assert!(err.is_informational());
    }

    #[tokio::test]
    async fn garbage_numbers_fail_as_invalid_number() {
        let buffer = seeded_buffer();
        for window in [
            WindowArg::Hours("soon".into()),
            WindowArg::Hours("nan".into()),
            WindowArg::Hours("inf".into()),
            WindowArg::Count("2.5".into()),
        ] {
            let err = fetch_window(&buffer, CHAT, &window, BOT).await.unwrap_err();
            assert!(matches!(err, TldrError::InvalidNumber(_)), "{window:?}");
        }
    }

    #[tokio::test]
    async fn non_positive_count_yields_empty_window() {
        let buffer = seeded_buffer();
        for raw in ["0", "-5"] {
            let err = fetch_window(&buffer, CHAT, &WindowArg::Count(raw.into()), BOT)
                .await
                .unwrap_err();
            assert!(matches!(err, TldrError::EmptyWindow));
        }
    }

    struct FailingHistory;

    #[async_trait]
    impl ChannelHistory for FailingHistory {
        async fn messages_after(
            &self,
            _chat_id: ChatId,
            _cutoff: DateTime<Utc>,
        ) -> anyhow::Result<Vec<MessageEntry>> {
            Err(anyhow::anyhow!("connection reset"))
        }

        async fn recent_messages(
            &self,
            _chat_id: ChatId,
            _limit: usize,
        ) -> anyhow::Result<Vec<MessageEntry>> {
            Err(anyhow::anyhow!("connection reset"))
        }
    }

    #[tokio::test]
    async fn collaborator_faults_map_to_fetch_error() {
        for window in [WindowArg::Hours("1".into()), WindowArg::Count("10".into())] {
            let err = fetch_window(&FailingHistory, CHAT, &window, BOT)
                .await
                .unwrap_err();
            assert!(matches!(err, TldrError::Fetch(_)), "{window:?}");
        }
    }
}
