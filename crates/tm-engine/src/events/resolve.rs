//! The offered-to-resolved state machine.

use std::sync::Arc;

use tm_core::{EventHistory, EventResult, SessionId, SessionState, StoredSession, UserId};
use tm_mechanics::{build_result, roll_success};

use crate::clock::Clock;
use crate::error::{EngineError, EngineResult};
use crate::history::HistoryLog;
use crate::locks::KeyedLocks;
use crate::profiles::{apply_result, load_profile, save_profile};
use crate::random::Randomness;
use crate::store::{keys, KeyValueStore};

/// Resolves offered sessions, at most once each.
pub struct Resolver {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    randomness: Arc<dyn Randomness>,
    locks: Arc<KeyedLocks>,
}

impl Resolver {
    /// Resolver rolling through `randomness`, stamping through `clock`.
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
        randomness: Arc<dyn Randomness>,
        locks: Arc<KeyedLocks>,
    ) -> Self {
        Self { store, clock, randomness, locks }
    }

    /// Resolve `option_id` of the session `session_id` for `user`.
    ///
    /// The whole sequence runs under the user lock. A session owned by a
    /// different user reads as absent rather than revealing it exists. The
    /// session flips to its terminal state before the outcome touches the
    /// profile, so a crash in between loses the outcome but can never
    /// grant it twice.
    pub async fn resolve(
        &self,
        user: &UserId,
        session_id: &SessionId,
        option_id: &str,
    ) -> EngineResult<EventResult> {
        let _guard = self.locks.acquire(&keys::profile(user)).await;

        let session_key = keys::session(session_id);
        let raw = self
            .store
            .get(&session_key)
            .await?
            .ok_or(EngineError::SessionNotFound(*session_id))?;
        let mut session: StoredSession = serde_json::from_str(&raw)?;
        if session.user_id != *user {
            return Err(EngineError::SessionNotFound(*session_id));
        }
        if session.is_resolved() {
            return Err(EngineError::AlreadyResolved(*session_id));
        }
        let option = session.option(option_id).cloned().ok_or_else(|| {
            EngineError::OptionNotFound {
                session_id: *session_id,
                option_id: option_id.to_string(),
            }
        })?;

        let mut profile = load_profile(&*self.store, user).await?;

        let roll = self.randomness.probability();
        let success = roll_success(option.success.probability, roll);
        let result = build_result(&option, success);

        session.state = SessionState::Resolved;
        self.store.set(&session_key, serde_json::to_string(&session)?).await?;

        apply_result(&mut profile, &result)?;
        save_profile(&*self.store, &profile).await?;

        let entry = EventHistory {
            user_id: user.clone(),
            event_id: session.event_id.clone(),
            timestamp: self.clock.now(),
            option_id: option_id.to_string(),
            result: result.clone(),
        };
        HistoryLog::new(self.store.clone()).record(&entry).await?;

        tracing::info!(
            user = %user,
            session = %session_id,
            option = option_id,
            success = result.success,
            "event resolved"
        );
        Ok(result)
    }
}
