use thiserror::Error;

/// Everything that can end a `/tldr` invocation early. Each variant maps to
/// one specific user-visible reply; nothing here is retried and nothing
/// propagates past the invocation boundary.
#[derive(Debug, Error)]
pub enum TldrError {
    #[error("error parsing arguments: {0}")]
    MalformedArguments(String),
    #[error("the `{0}` flag requires a value")]
    MissingFlagValue(&'static str),
    #[error("unrecognized flag `{0}`")]
    UnrecognizedFlag(String),
    #[error("both `-h` and `-m` were given")]
    ConflictingWindowSpec,
    #[error("neither `-h` nor `-m` was given")]
    MissingWindowSpec,
    #[error("invalid number `{0}`")]
    InvalidNumber(String),
    #[error("no messages in the requested window")]
    EmptyWindow,
    #[error("history retrieval failed: {0}")]
    Fetch(anyhow::Error),
    #[error("summarization failed: {0}")]
    Summarization(anyhow::Error),
    #[error("private delivery blocked by recipient settings")]
    PrivateDeliveryBlocked,
}

impl TldrError {
    /// The reply sent to the requester for this failure.
    pub fn user_message(&self) -> String {
        match self {
            TldrError::MalformedArguments(detail) => {
                format!("❌ Error parsing arguments: {detail}.")
            }
            TldrError::MissingFlagValue(flag) => match *flag {
                "-h" => "❌ The `-h` flag requires a numerical value for hours.".to_owned(),
                "-m" => "❌ The `-m` flag requires a numerical value for messages.".to_owned(),
                "-c" => "❌ The `-c` flag requires a custom prompt.".to_owned(),
                other => format!("❌ The `{other}` flag requires a value."),
            },
            TldrError::UnrecognizedFlag(token) => {
                format!("❌ Unrecognized flag `{token}`.")
            }
            TldrError::ConflictingWindowSpec => {
                "❌ Please use either `-h` (hours) or `-m` (messages), not both.".to_owned()
            }
            TldrError::MissingWindowSpec => {
                "❌ You must specify either `-h [hours]` or `-m [messages]`.".to_owned()
            }
            TldrError::InvalidNumber(_) => {
                "❌ Invalid number format for hours or messages.".to_owned()
            }
            TldrError::EmptyWindow => {
                "ℹ️ No messages found for the specified criteria.".to_owned()
            }
            TldrError::Fetch(_) => {
                "❌ An unexpected error occurred while fetching messages.".to_owned()
            }
            TldrError::Summarization(_) => "❌ Failed to generate summary.".to_owned(),
            TldrError::PrivateDeliveryBlocked => {
                "❌ I couldn't send you a DM. Please check your privacy settings.".to_owned()
            }
        }
    }

    /// An empty window is a "nothing found" notice, not a failure.
    pub fn is_informational(&self) -> bool {
        matches!(self, TldrError::EmptyWindow)
    }
}
