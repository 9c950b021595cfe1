//! Question answering over the loaded table.
//!
//! The backend is an external text-completion service behind [`ChatBackend`].
//! Only a placeholder ships here; history is owned by the caller's session.

use serde::Serialize;

use crate::analysis::TableSummary;
use crate::error::{DashError, Result};

pub const PLACEHOLDER_ANSWER: &str = "[chat backend response goes here]";

/// Prompt sent to the backend: the table summary plus the user's question.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatPrompt {
    pub question: String,
    pub text: String,
}

impl ChatPrompt {
    pub fn new(summary: &TableSummary, question: &str) -> Self {
        let summary_json = serde_json::to_string(summary).unwrap_or_else(|e| {
            log::warn!("Could not serialize table summary for prompt: {}", e);
            String::from("{}")
        });
        Self {
            question: question.to_string(),
            text: format!(
                "You are a helpful assistant. Price table summary:\n{}\nUser: {}\nAssistant:",
                summary_json, question
            ),
        }
    }
}

pub trait ChatBackend {
    /// A short identifier for this implementation (for logs).
    fn name(&self) -> &'static str;

    fn answer(&self, prompt: &ChatPrompt) -> anyhow::Result<String>;
}

/// Stand-in backend that never calls out; always returns [`PLACEHOLDER_ANSWER`].
#[derive(Debug, Default, Clone, Copy)]
pub struct PlaceholderChat;

impl ChatBackend for PlaceholderChat {
    fn name(&self) -> &'static str {
        "Placeholder"
    }

    fn answer(&self, _prompt: &ChatPrompt) -> anyhow::Result<String> {
        Ok(PLACEHOLDER_ANSWER.to_string())
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ChatExchange {
    pub question: String,
    pub answer: String,
}

/// Append-only list of exchanges for one session.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct ChatHistory {
    entries: Vec<ChatExchange>,
}

impl ChatHistory {
    pub fn entries(&self) -> &[ChatExchange] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Asks `backend` and records the exchange. Nothing is recorded on failure.
    pub fn ask(
        &mut self,
        backend: &dyn ChatBackend,
        summary: &TableSummary,
        question: &str,
    ) -> Result<&ChatExchange> {
        let question = question.trim();
        if question.is_empty() {
            return Err(DashError::Validation("question is empty".to_string()));
        }

        let prompt = ChatPrompt::new(summary, question);
        let answer = backend
            .answer(&prompt)
            .map_err(|e| DashError::Chat(format!("{}: {:#}", backend.name(), e)))?;

        self.entries.push(ChatExchange {
            question: prompt.question,
            answer,
        });
        Ok(&self.entries[self.entries.len() - 1])
    }
}
