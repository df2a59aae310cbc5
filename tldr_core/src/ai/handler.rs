use open_ai_rust_responses_by_sshift::{Client as OAIClient, Model, Request};

/// Output cap for one summary, in tokens. Truncation is the model's
/// concern; the prompt itself is sent whole.
const MAX_SUMMARY_TOKENS: u32 = 4096;
const SUMMARY_TEMPERATURE: f32 = 0.5;

#[derive(Clone)]
pub struct AI {
    openai_client: OAIClient,
}

impl AI {
    pub fn new(openai_api_key: &str) -> Result<Self, anyhow::Error> {
        let openai_client = OAIClient::new(openai_api_key)?;
        Ok(Self { openai_client })
    }

    /// One summarization call: fixed model, fixed sampling, bounded output.
    /// Any transport or API fault surfaces as an error; callers report it
    /// once and never retry.
    pub async fn summarize(&self, prompt: &str) -> Result<String, anyhow::Error> {
        let request = Request::builder()
            .model(Model::GPT4o)
            .input(prompt)
            .max_output_tokens(MAX_SUMMARY_TOKENS)
            .temperature(SUMMARY_TEMPERATURE)
            .build();

        let response = self.openai_client.responses.create(request).await?;
        let summary = response.output_text().trim().to_string();

        if summary.is_empty() {
            return Err(anyhow::anyhow!("Generated summary is empty"));
        }

        Ok(summary)
    }
}
