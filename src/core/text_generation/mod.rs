pub mod openai;

use async_trait::async_trait;

use crate::errors::Error;

/// Plain text in, plain text out.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, Error>;
}

/// Used when no API key is configured; every call fails so composed
/// messages fall back to the placeholder text.
pub struct DisabledTextGenerator;

#[async_trait]
impl TextGenerator for DisabledTextGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, Error> {
        Err(Error::generation("text generation is not configured"))
    }
}
