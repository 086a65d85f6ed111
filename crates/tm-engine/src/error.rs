//! Error types for the game engine.

use std::time::Duration;

use thiserror::Error;
use tm_core::{EventId, SessionId, StatKey, UserId};
use tm_mechanics::LedgerError;

use crate::generate::GenerateError;
use crate::store::StoreError;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// The coarse failure taxonomy callers dispatch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A referenced profile, event, session, option, or template is absent.
    NotFound,
    /// The request itself was unacceptable.
    InvalidInput,
    /// A second resolution was attempted on a terminal session.
    AlreadyResolved,
    /// Storage or the generation collaborator failed.
    DependencyUnavailable,
}

/// Errors that can occur during engine operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// No profile exists for the user.
    #[error("profile not found for user '{0}'")]
    ProfileNotFound(UserId),

    /// A profile already exists for the user; creation happens once.
    #[error("profile already exists for user '{0}'")]
    ProfileExists(UserId),

    /// No catalog metadata for the event archetype.
    #[error("event '{0}' not found in catalog")]
    EventNotFound(EventId),

    /// No stored session under the id, or it belongs to another user.
    #[error("session '{0}' not found")]
    SessionNotFound(SessionId),

    /// The chosen option is not part of the offered event.
    #[error("option '{option_id}' not found in session '{session_id}'")]
    OptionNotFound {
        /// The session that was being resolved.
        session_id: SessionId,
        /// The option id the caller asked for.
        option_id: String,
    },

    /// No fate template stored under the id.
    #[error("fate template '{0}' not found")]
    TemplateNotFound(String),

    /// No user is registered under the username.
    #[error("username '{0}' not found")]
    UsernameNotFound(String),

    /// The username is already registered to another user.
    #[error("username '{0}' is already taken")]
    UsernameTaken(String),

    /// The session was already resolved. Rewards are granted at most once.
    #[error("session '{0}' is already resolved")]
    AlreadyResolved(SessionId),

    /// A stat requirement gate failed at instantiation.
    #[error("requirement not met: {key} is {actual}, needs {required}")]
    RequirementNotMet {
        /// The stat that fell short.
        key: StatKey,
        /// Minimum value the archetype demands.
        required: u32,
        /// The character's current value.
        actual: u32,
    },

    /// The generation reply carried no usable JSON payload.
    #[error("malformed generation output: {0}")]
    MalformedGeneration(String),

    /// The ledger rejected the experience amount.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// The storage collaborator failed.
    #[error("storage: {0}")]
    Storage(#[from] StoreError),

    /// The generation collaborator failed.
    #[error("generation: {0}")]
    Generation(#[from] GenerateError),

    /// The generation collaborator exceeded the configured deadline.
    #[error("generation timed out after {0:?}")]
    GenerationTimeout(Duration),

    /// A record could not be encoded to or decoded from storage.
    #[error("record encoding: {0}")]
    Encoding(#[from] serde_json::Error),
}

impl EngineError {
    /// The coarse kind of this error, for callers that map failures to
    /// transport-level responses.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ProfileNotFound(_)
            | Self::EventNotFound(_)
            | Self::SessionNotFound(_)
            | Self::OptionNotFound { .. }
            | Self::TemplateNotFound(_)
            | Self::UsernameNotFound(_) => ErrorKind::NotFound,
            Self::ProfileExists(_)
            | Self::UsernameTaken(_)
            | Self::RequirementNotMet { .. }
            | Self::MalformedGeneration(_)
            | Self::Ledger(_) => ErrorKind::InvalidInput,
            Self::AlreadyResolved(_) => ErrorKind::AlreadyResolved,
            Self::Storage(_)
            | Self::Generation(_)
            | Self::GenerationTimeout(_)
            | Self::Encoding(_) => ErrorKind::DependencyUnavailable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_the_taxonomy() {
        let session = SessionId::new();
        assert_eq!(
            EngineError::ProfileNotFound(UserId::new("u1")).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            EngineError::UsernameTaken("mu".into()).kind(),
            ErrorKind::InvalidInput
        );
        assert_eq!(
            EngineError::AlreadyResolved(session).kind(),
            ErrorKind::AlreadyResolved
        );
        assert_eq!(
            EngineError::GenerationTimeout(Duration::from_secs(15)).kind(),
            ErrorKind::DependencyUnavailable
        );
    }

    #[test]
    fn ledger_rejections_are_invalid_input() {
        let err = EngineError::from(LedgerError::NegativeAmount(-3));
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn messages_name_the_offender() {
        let err = EngineError::EventNotFound(EventId::new("cave_exploration"));
        assert!(err.to_string().contains("cave_exploration"));
    }
}
