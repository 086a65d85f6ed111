//! Text generation behind event instantiation and fate drawing.
//!
//! The engine treats the generator as an unreliable collaborator: callers
//! bound every request with a timeout and decide per call site whether a
//! failure falls back (events) or propagates (fates).

use async_trait::async_trait;

use tm_core::Locale;

/// Scripted generator for tests and offline runs.
pub mod canned;
/// Gemini REST client.
pub mod gemini;
/// JSON extraction from model replies.
pub mod parse;
/// Prompt placeholder substitution.
pub mod template;

pub use canned::CannedGenerator;
pub use gemini::GeminiClient;

/// Errors from a narrative generator.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// The HTTP exchange itself failed.
    #[error("generation transport: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("generation api status {status}: {message}")]
    Api {
        /// HTTP status code returned by the service.
        status: u16,
        /// Response body, as far as it could be read.
        message: String,
    },

    /// The service answered success but carried no usable text.
    #[error("generation reply was empty")]
    EmptyReply,

    /// No API key was configured.
    #[error("generation api key is not configured")]
    MissingApiKey,
}

/// A source of generated narrative text.
#[async_trait]
pub trait NarrativeGenerator: Send + Sync {
    /// Produce text for `prompt`. `locale` is advisory; prompts already
    /// carry the language instruction, but scripted generators use it to
    /// localize fallback lines.
    async fn generate(&self, prompt: &str, locale: Locale) -> Result<String, GenerateError>;
}
