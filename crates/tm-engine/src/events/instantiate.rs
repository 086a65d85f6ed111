//! Archetype to offered-event instantiation.

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;

use tm_core::{Event, EventId, EventOption, Locale, SessionState, StoredSession, UserId};
use tm_mechanics::first_unmet_requirement;

use crate::catalog::EventCatalog;
use crate::clock::Clock;
use crate::error::{EngineError, EngineResult};
use crate::events::default_event;
use crate::generate::template::fill_template;
use crate::generate::{parse, NarrativeGenerator};
use crate::profiles::load_profile;
use crate::random::Randomness;
use crate::store::{keys, KeyValueStore};

const EVENT_PROMPT: &str = "You are the narrator of a xianxia cultivation world. \
Create one short interactive event for the character named {{username}}. \
Event type: {{eventType}}. In-world time spent: {{timeCost}} minutes. \
Danger level: {{risk}} of 1. Write all prose in the language with code {{locale}}. \
Respond with JSON only, no prose around it, in this shape: \
{\"narrative\": string, \"options\": [{\"id\": string, \"text\": string, \
\"success\": {\"probability\": number between 0 and 1, \"narrative\": string, \
\"rewards\": {\"ep\": object mapping stat names to integers, \"life\": integer}}, \
\"failure\": {\"narrative\": string, \"penalties\": {\"life\": negative integer}}}]}. \
Offer two to four options.";

/// The reply shape instantiation asks the generator for.
#[derive(Debug, Deserialize)]
struct GeneratedEvent {
    narrative: String,
    #[serde(default)]
    options: Vec<EventOption>,
}

/// Turns catalog archetypes into offered events.
pub struct Instantiator {
    store: Arc<dyn KeyValueStore>,
    generator: Arc<dyn NarrativeGenerator>,
    clock: Arc<dyn Clock>,
    randomness: Arc<dyn Randomness>,
    generation_timeout: Duration,
}

impl Instantiator {
    /// Instantiator generating through `generator` with the given deadline.
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        generator: Arc<dyn NarrativeGenerator>,
        clock: Arc<dyn Clock>,
        randomness: Arc<dyn Randomness>,
        generation_timeout: Duration,
    ) -> Self {
        Self { store, generator, clock, randomness, generation_timeout }
    }

    /// Offer an instance of `event` to `user`.
    ///
    /// Missing metadata or profile fails before anything is written; a
    /// failing stat gate likewise. Generation trouble of any kind degrades
    /// to the built-in default event instead of failing. On success the
    /// session is persisted as `offered` under a fresh unguessable id.
    pub async fn instantiate(
        &self,
        user: &UserId,
        event: &EventId,
        locale_override: Option<Locale>,
    ) -> EngineResult<Event> {
        let metadata = EventCatalog::new(self.store.clone()).metadata(event).await?;
        let profile = load_profile(&*self.store, user).await?;

        if let Some(unmet) = first_unmet_requirement(&profile, &metadata) {
            return Err(EngineError::RequirementNotMet {
                key: unmet.key,
                required: unmet.required,
                actual: unmet.actual,
            });
        }

        let locale = locale_override.unwrap_or(profile.locale);
        let prompt = fill_template(
            EVENT_PROMPT,
            &[
                ("username", profile.username.as_str()),
                ("locale", locale.code()),
                ("eventType", metadata.kind.as_str()),
                ("timeCost", &metadata.time_cost.to_string()),
                ("risk", &metadata.risk.to_string()),
            ],
        );

        let (narrative, options) = match self.generate_scene(&prompt, locale).await {
            Ok(scene) => scene,
            Err(reason) => {
                tracing::warn!(
                    user = %user,
                    event = %event,
                    %reason,
                    "generation unusable, offering default event"
                );
                default_event(locale)
            }
        };

        let session_id = self.randomness.session_id();
        let session = StoredSession {
            session_id,
            user_id: user.clone(),
            event_id: event.clone(),
            narrative: narrative.clone(),
            options: options.clone(),
            state: SessionState::Offered,
            created_at: self.clock.now(),
        };
        self.store.set(&keys::session(&session_id), serde_json::to_string(&session)?).await?;

        tracing::info!(user = %user, event = %event, session = %session_id, "event offered");
        Ok(Event { id: event.clone(), session_id, metadata, narrative, options })
    }

    /// One bounded generation attempt, parsed and validated.
    async fn generate_scene(
        &self,
        prompt: &str,
        locale: Locale,
    ) -> Result<(String, Vec<EventOption>), String> {
        let reply = tokio::time::timeout(
            self.generation_timeout,
            self.generator.generate(prompt, locale),
        )
        .await
        .map_err(|_| format!("timed out after {:?}", self.generation_timeout))?
        .map_err(|e| e.to_string())?;

        let generated: GeneratedEvent =
            parse::extract_json(&reply).ok_or("reply carried no event JSON")?;
        validate(&generated)?;
        Ok((generated.narrative, generated.options))
    }
}

/// Schema checks beyond what deserialization enforces.
fn validate(generated: &GeneratedEvent) -> Result<(), String> {
    if generated.narrative.trim().is_empty() {
        return Err("empty narrative".to_string());
    }
    if generated.options.is_empty() {
        return Err("no options".to_string());
    }
    for option in &generated.options {
        if option.id.trim().is_empty() {
            return Err("option with empty id".to_string());
        }
        let p = option.success.probability;
        if !p.is_finite() || !(0.0..=1.0).contains(&p) {
            return Err(format!("option '{}' probability {p} out of range", option.id));
        }
    }
    let mut ids: Vec<&str> = generated.options.iter().map(|o| o.id.as_str()).collect();
    ids.sort_unstable();
    ids.dedup();
    if ids.len() != generated.options.len() {
        return Err("duplicate option ids".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generated(json: &str) -> GeneratedEvent {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn well_formed_generation_passes() {
        let scene = generated(
            r#"{
                "narrative": "A stranger waits by the road.",
                "options": [
                    {"id": "greet", "text": "Greet", "success": {"probability": 0.8, "narrative": "ok", "rewards": {}}},
                    {"id": "pass", "text": "Pass by", "success": {"narrative": "ok", "rewards": {}}}
                ]
            }"#,
        );
        assert!(validate(&scene).is_ok());
    }

    #[test]
    fn empty_narrative_is_rejected() {
        let scene = generated(r#"{"narrative": "  ", "options": []}"#);
        assert!(validate(&scene).is_err());
    }

    #[test]
    fn missing_options_are_rejected() {
        let scene = generated(r#"{"narrative": "scene"}"#);
        assert_eq!(validate(&scene).unwrap_err(), "no options");
    }

    #[test]
    fn out_of_range_probability_is_rejected() {
        let scene = generated(
            r#"{
                "narrative": "scene",
                "options": [
                    {"id": "a", "text": "A", "success": {"probability": 1.5, "narrative": "n", "rewards": {}}}
                ]
            }"#,
        );
        assert!(validate(&scene).unwrap_err().contains("probability"));
    }

    #[test]
    fn duplicate_option_ids_are_rejected() {
        let scene = generated(
            r#"{
                "narrative": "scene",
                "options": [
                    {"id": "a", "text": "A", "success": {"narrative": "n", "rewards": {}}},
                    {"id": "a", "text": "Again", "success": {"narrative": "n", "rewards": {}}}
                ]
            }"#,
        );
        assert_eq!(validate(&scene).unwrap_err(), "duplicate option ids");
    }

    #[test]
    fn prompt_placeholders_all_resolve() {
        let filled = fill_template(
            EVENT_PROMPT,
            &[
                ("username", "MuYun"),
                ("locale", "ko"),
                ("eventType", "exploration"),
                ("timeCost", "30"),
                ("risk", "0.3"),
            ],
        );
        assert!(!filled.contains("{{"));
        assert!(filled.contains("MuYun"));
    }
}
