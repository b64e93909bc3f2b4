//! Chat-model adapter over the OpenAI-compatible REST client.

use async_trait::async_trait;
use openai_client::{ChatRequest, Message, OpenAIClient};

use crate::error::{PipelineError, Result};
use crate::traits::ChatModel;

/// [`ChatModel`] backed by an OpenAI-compatible chat endpoint.
///
/// Works against the hosted OpenAI API or any locally hosted model
/// exposing the same wire shape (via the client's base URL).
pub struct OpenAiChatModel {
    client: OpenAIClient,
    model: String,
}

impl OpenAiChatModel {
    pub fn new(client: OpenAIClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }
}

#[async_trait]
impl ChatModel for OpenAiChatModel {
    async fn complete_chat(&self, system_prompt: &str, user_message: &str) -> Result<String> {
        let request = ChatRequest::new(&self.model)
            .message(Message::system(system_prompt))
            .message(Message::user(user_message));

        let response = self
            .client
            .chat_completion(request)
            .await
            .map_err(|e| PipelineError::Upstream(format!("language model call failed: {e}")))?;

        Ok(response.content)
    }
}
