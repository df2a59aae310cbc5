use crate::message_history::handler::MessageEntry;

pub const SUMMARY_PROMPT: &str = "Provide a concise summary of the following group conversation. \
Include what the discussion was about, users' opinions, experiences, etc. \
When needed, highlight important information in bold. \
Respond in the language the conversation took place in.";

const UNNAMED_SENDER: &str = "unknown";

pub const HELP_TEXT: &str = "📄 <b>TLDR Bot Help</b> 📄\n\n\
<b>Commands:</b>\n\
/tldr -h [hours] - Get a summary of the last [hours] hours of the chat as a DM.\n\
/tldr -m [messages] - Get a summary of the last [messages] messages as a DM.\n\
-c \"Your custom prompt\" - Add a custom prompt to ask specific questions about the conversation.\n\
-p - Post the summary in the chat instead of a DM.\n\
/tldr --help - Display this help message.\n\n\
<b>Examples:</b>\n\
/tldr -h 2 - Summarize the last 2 hours of conversation privately.\n\
/tldr -m 50 -p - Summarize the last 50 messages publicly in the chat.\n\
/tldr -h 1 -c \"What were the main decisions made during this discussion?\" - Summarize the last 1 hour of conversation with a specific focus.";

/// Newline-joined `sender: text` lines, chronological order preserved.
pub fn render_transcript(entries: &[MessageEntry]) -> String {
    entries
        .iter()
        .map(|e| {
            format!(
                "{}: {}",
                e.sender.as_deref().unwrap_or(UNNAMED_SENDER),
                e.text
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Fixed base instruction, then the optional custom clause, then the
/// transcript, in that order. No truncation here; output is bounded at the
/// model call.
pub fn build_summary_prompt(transcript: &str, custom_prompt: Option<&str>) -> String {
    match custom_prompt {
        Some(custom) => {
            format!("{SUMMARY_PROMPT}\n\nAdditionally: {custom}\n\nConversation: {transcript}")
        }
        None => format!("{SUMMARY_PROMPT}\n\n{transcript}"),
    }
}
