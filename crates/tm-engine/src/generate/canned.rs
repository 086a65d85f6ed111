//! Scripted generator for tests and offline runs.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use tm_core::Locale;

use super::{GenerateError, NarrativeGenerator};

/// [`NarrativeGenerator`] that replays queued replies.
///
/// Once the queue runs dry it answers with a localized plain-text line,
/// which no JSON extraction accepts. That makes exhaustion behave like a
/// model refusing to cooperate: event callers fall back to the default
/// event, fate callers report a malformed generation.
#[derive(Debug, Default)]
pub struct CannedGenerator {
    replies: Mutex<VecDeque<String>>,
}

impl CannedGenerator {
    /// Generator with an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `reply` to be returned by a future `generate` call.
    pub fn push_reply(&self, reply: impl Into<String>) {
        let mut replies = self.replies.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        replies.push_back(reply.into());
    }

    fn fallback_line(locale: Locale) -> String {
        match locale {
            Locale::Ko => "안개가 걷히기를 기다린다.".to_string(),
            Locale::En => "The mist refuses to part.".to_string(),
            Locale::Zh => "迷雾未散。".to_string(),
        }
    }
}

#[async_trait]
impl NarrativeGenerator for CannedGenerator {
    async fn generate(&self, _prompt: &str, locale: Locale) -> Result<String, GenerateError> {
        let next = {
            let mut replies = self.replies.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            replies.pop_front()
        };
        Ok(next.unwrap_or_else(|| Self::fallback_line(locale)))
    }
}
