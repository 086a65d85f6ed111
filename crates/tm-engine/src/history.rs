//! Append-only event history.
//!
//! Storage keeps each user's history oldest-first; reads reverse and cut,
//! so "recent" queries return newest-first without rewriting the list.

use std::sync::Arc;

use tm_core::{EventHistory, UserId};

use crate::error::EngineResult;
use crate::store::{keys, KeyValueStore};

/// The per-user resolution audit log.
pub struct HistoryLog {
    store: Arc<dyn KeyValueStore>,
}

impl HistoryLog {
    /// Log writing through `store`.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Append one resolution record.
    pub async fn record(&self, entry: &EventHistory) -> EngineResult<()> {
        let raw = serde_json::to_string(entry)?;
        self.store.append_to_list(&keys::history(&entry.user_id), raw).await?;
        Ok(())
    }

    /// Up to `limit` most recent records for `user`, newest first.
    pub async fn recent(&self, user: &UserId, limit: usize) -> EngineResult<Vec<EventHistory>> {
        let raw = self.store.list(&keys::history(user)).await?;
        let mut entries = Vec::with_capacity(limit.min(raw.len()));
        for item in raw.iter().rev().take(limit) {
            entries.push(serde_json::from_str(item)?);
        }
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use tm_core::{EventId, EventResult};

    use super::*;
    use crate::store::MemoryStore;

    fn entry(user: &UserId, option: &str) -> EventHistory {
        EventHistory {
            user_id: user.clone(),
            event_id: EventId::new("cave_exploration"),
            timestamp: Utc::now(),
            option_id: option.into(),
            result: EventResult {
                success: true,
                narrative: "done".into(),
                rewards: None,
                penalties: None,
            },
        }
    }

    #[tokio::test]
    async fn empty_history_reads_as_empty() {
        let log = HistoryLog::new(Arc::new(MemoryStore::new()));
        let got = log.recent(&UserId::new("u1"), 10).await.unwrap();
        assert!(got.is_empty());
    }

    #[tokio::test]
    async fn recent_returns_newest_first_with_limit() {
        let log = HistoryLog::new(Arc::new(MemoryStore::new()));
        let user = UserId::new("u1");
        for option in ["first", "second", "third"] {
            log.record(&entry(&user, option)).await.unwrap();
        }

        let got = log.recent(&user, 2).await.unwrap();
        let options: Vec<&str> = got.iter().map(|e| e.option_id.as_str()).collect();
        assert_eq!(options, vec!["third", "second"]);
    }

    #[tokio::test]
    async fn limit_beyond_length_returns_everything() {
        let log = HistoryLog::new(Arc::new(MemoryStore::new()));
        let user = UserId::new("u1");
        log.record(&entry(&user, "only")).await.unwrap();

        let got = log.recent(&user, 50).await.unwrap();
        assert_eq!(got.len(), 1);
    }

    #[tokio::test]
    async fn histories_are_per_user() {
        let log = HistoryLog::new(Arc::new(MemoryStore::new()));
        log.record(&entry(&UserId::new("u1"), "a")).await.unwrap();
        log.record(&entry(&UserId::new("u2"), "b")).await.unwrap();

        assert_eq!(log.recent(&UserId::new("u1"), 10).await.unwrap().len(), 1);
        assert_eq!(log.recent(&UserId::new("u2"), 10).await.unwrap().len(), 1);
    }
}
