// OpenAI chat completions over plain HTTP

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::TextGenerator;
use crate::errors::Error;

const SYSTEM_PROMPT: &str =
    "You are a helpful assistant that writes short, personal dog-care notifications.";
const MAX_TOKENS: u32 = 100;
const TEMPERATURE: f32 = 0.7;

pub struct OpenAiTextGenerator {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAiTextGenerator {
    pub fn new(api_key: String, model: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn request_body<'a>(&'a self, prompt: &'a str) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        }
    }
}

#[async_trait]
impl TextGenerator for OpenAiTextGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, Error> {
        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&self.request_body(prompt))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(Error::generation(&format!(
                "OpenAI request failed with status {status}: {error_text}"
            )));
        }

        let body: ChatResponse = response.json().await?;
        first_choice_text(body)
    }
}

fn first_choice_text(body: ChatResponse) -> Result<String, Error> {
    let text = body
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|content| content.trim().to_string())
        .unwrap_or_default();

    if text.is_empty() {
        return Err(Error::generation("OpenAI returned no content"));
    }

    Ok(text)
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}
