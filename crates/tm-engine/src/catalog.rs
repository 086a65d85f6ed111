//! The event archetype catalog.
//!
//! Archetypes are administrative data: seeded out of band and read-only to
//! normal gameplay. Each lives at its own `event:meta:` key; listing scans
//! the prefix.

use std::sync::Arc;

use tm_core::{EventId, EventMetadata};

use crate::error::{EngineError, EngineResult};
use crate::store::{keys, KeyValueStore};

/// Catalog of event archetype definitions.
pub struct EventCatalog {
    store: Arc<dyn KeyValueStore>,
}

impl EventCatalog {
    /// Catalog reading from `store`.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// The archetype definition for `event`.
    pub async fn metadata(&self, event: &EventId) -> EngineResult<EventMetadata> {
        let raw = self
            .store
            .get(&keys::event_meta(event))
            .await?
            .ok_or_else(|| EngineError::EventNotFound(event.clone()))?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// All archetypes, ordered by id.
    pub async fn list(&self) -> EngineResult<Vec<EventMetadata>> {
        let mut entries = Vec::new();
        for key in self.store.list_keys(keys::EVENT_META_PREFIX).await? {
            if let Some(raw) = self.store.get(&key).await? {
                entries.push(serde_json::from_str::<EventMetadata>(&raw)?);
            }
        }
        entries.sort_by(|a, b| a.id.as_str().cmp(b.id.as_str()));
        Ok(entries)
    }

    /// Write `entries` into the catalog, replacing same-id definitions.
    /// Returns the number written.
    pub async fn seed(&self, entries: &[EventMetadata]) -> EngineResult<usize> {
        for meta in entries {
            let raw = serde_json::to_string(meta)?;
            self.store.set(&keys::event_meta(&meta.id), raw).await?;
        }
        Ok(entries.len())
    }
}

/// The starter archetypes installed by `init`.
pub fn builtin_archetypes() -> Vec<EventMetadata> {
    use tm_core::StatKey;

    vec![
        EventMetadata {
            id: EventId::new("cave_exploration"),
            kind: "exploration".to_string(),
            time_cost: 30,
            ep_reward: 20,
            risk: 0.3,
            life_delta: None,
            required_stats: None,
            required_items: None,
        },
        EventMetadata {
            id: EventId::new("mountain_meditation"),
            kind: "cultivation".to_string(),
            time_cost: 60,
            ep_reward: 30,
            risk: 0.1,
            life_delta: None,
            required_stats: Some([(StatKey::Clarity, 2)].into_iter().collect()),
            required_items: None,
        },
        EventMetadata {
            id: EventId::new("village_errand"),
            kind: "social".to_string(),
            time_cost: 45,
            ep_reward: 15,
            risk: 0.2,
            life_delta: None,
            required_stats: None,
            required_items: None,
        },
    ]
}
