//! Summarise stage: language-model digest memoised by the rendered
//! markdown.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::cache::{cache_aside, CacheStore};
use crate::error::{PipelineError, Result};
use crate::markdown::events_to_markdown;
use crate::traits::{ChatModel, Summarizer};
use crate::types::{FamilyEvent, SummaryResult};

/// Stage name and cache-key prefix.
const STAGE_NAME: &str = "summarise";

/// Advisory character limit folded into the prompt when the caller
/// does not supply one.
pub const DEFAULT_CHARACTER_LIMIT: u32 = 400;

/// Sends rendered event markdown to a chat model and memoises the
/// digest.
///
/// The cache key covers the markdown bytes only; the character limit
/// is part of the prompt but not the key, matching the deployed
/// behaviour.
pub struct SummarizeStage {
    cache: Arc<dyn CacheStore>,
    model: Arc<dyn ChatModel>,
}

impl SummarizeStage {
    pub fn new(cache: Arc<dyn CacheStore>, model: Arc<dyn ChatModel>) -> Self {
        Self { cache, model }
    }

    /// Summarise pre-rendered markdown. This is the cacheable unit the
    /// summarise service exposes directly.
    pub async fn summarize_markdown(
        &self,
        markdown: &str,
        character_limit: u32,
    ) -> Result<SummaryResult> {
        cache_aside(
            self.cache.as_ref(),
            STAGE_NAME,
            markdown.as_bytes(),
            || async {
                debug!(character_limit, "requesting summary from language model");

                let system_prompt = system_prompt(character_limit);
                let user_message = format!(
                    "Please summarize the following markdown content:\n```markdown\n{markdown}\n```"
                );

                let summary = self
                    .model
                    .complete_chat(&system_prompt, &user_message)
                    .await?;

                if summary.trim().is_empty() {
                    return Err(PipelineError::Upstream(
                        "language model returned an empty summary".to_string(),
                    ));
                }

                Ok(SummaryResult { summary })
            },
        )
        .await
    }
}

fn system_prompt(character_limit: u32) -> String {
    format!(
        "You are a helpful assistant that specializes in summarizing markdown content. \
         Your task is to generate a concise summary of the data provided. \
         Highlight the main themes of the data in a short paragraph, with no more than \
         {character_limit} characters. \
         Use friendly and playful language. \
         Do not mention that the summary is generated from data input. \
         Do not include the raw original data in your response. \
         Format the summary in plain text."
    )
}

#[async_trait]
impl Summarizer for SummarizeStage {
    async fn summarize(
        &self,
        events: &[FamilyEvent],
        character_limit: u32,
    ) -> Result<SummaryResult> {
        let markdown = events_to_markdown(events);
        self.summarize_markdown(&markdown, character_limit).await
    }
}
