//! Fate generation and assignment.
//!
//! A fate is generated once per character from a stored prompt template.
//! Because it carries starting stats, i.e. profile state, failures here
//! always propagate; there is no fallback fate.

use std::sync::Arc;
use std::time::Duration;

use tm_core::{FateResult, FateTemplate, Locale, UserId};

use crate::error::{EngineError, EngineResult};
use crate::generate::template::fill_template;
use crate::generate::{parse, NarrativeGenerator};
use crate::locks::KeyedLocks;
use crate::profiles::{apply_fate, load_profile, save_profile};
use crate::store::{keys, KeyValueStore};

/// Fate template storage and fate generation.
pub struct FateService {
    store: Arc<dyn KeyValueStore>,
    generator: Arc<dyn NarrativeGenerator>,
    locks: Arc<KeyedLocks>,
    generation_timeout: Duration,
}

impl FateService {
    /// Service generating through `generator` with the given deadline.
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        generator: Arc<dyn NarrativeGenerator>,
        locks: Arc<KeyedLocks>,
        generation_timeout: Duration,
    ) -> Self {
        Self { store, generator, locks, generation_timeout }
    }

    /// The stored template under `id`.
    pub async fn template(&self, id: &str) -> EngineResult<FateTemplate> {
        let raw = self
            .store
            .get(&keys::fate_template(id))
            .await?
            .ok_or_else(|| EngineError::TemplateNotFound(id.to_string()))?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Store `template`, replacing any previous version under its id.
    pub async fn save_template(&self, template: &FateTemplate) -> EngineResult<()> {
        let raw = serde_json::to_string(template)?;
        self.store.set(&keys::fate_template(&template.id), raw).await?;
        Ok(())
    }

    /// The user's stored fate, if one has been generated.
    pub async fn of_user(&self, user: &UserId) -> EngineResult<Option<FateResult>> {
        match self.store.get(&keys::user_fate(user)).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Generate a fate for `user` from the template under `template_id` and
    /// assign it to the profile.
    ///
    /// Runs under the user lock: the profile read, the fate write, and the
    /// profile write are one serialized sequence. The generation call is
    /// bounded by the configured deadline.
    pub async fn generate(
        &self,
        user: &UserId,
        template_id: &str,
        locale_override: Option<Locale>,
    ) -> EngineResult<FateResult> {
        let _guard = self.locks.acquire(&keys::profile(user)).await;

        let mut profile = load_profile(&*self.store, user).await?;
        let template = self.template(template_id).await?;
        let locale = locale_override.unwrap_or(profile.locale);

        let prompt = fill_template(
            &template.prompt_template,
            &[("username", &profile.username), ("locale", locale.code())],
        );
        let reply = tokio::time::timeout(
            self.generation_timeout,
            self.generator.generate(&prompt, locale),
        )
        .await
        .map_err(|_| EngineError::GenerationTimeout(self.generation_timeout))??;

        let fate: FateResult = parse::extract_json(&reply)
            .ok_or_else(|| EngineError::MalformedGeneration(excerpt(&reply)))?;

        self.store.set(&keys::user_fate(user), serde_json::to_string(&fate)?).await?;
        apply_fate(&mut profile, &fate);
        save_profile(&*self.store, &profile).await?;

        tracing::info!(user = %user, fate = %fate.fate, "fate assigned");
        Ok(fate)
    }
}

/// The built-in template installed by `init`.
pub fn default_template() -> FateTemplate {
    FateTemplate {
        id: "default-fate".to_string(),
        prompt_template: "You are the arbiter of fates in a xianxia cultivation world. \
Draw a fate for the character named {{username}}. Write all prose in the language \
with code {{locale}}. Respond with JSON only, no prose around it, in this shape: \
{\"fate\": string, \"description\": string, \"startingStats\": object mapping stat \
names (attack, fortitude, critical, technique, qiGeneration, perception, \
cultSpeed, clarity, pillRefining, forging, alchemy, gemCarving, luck, \
fiveElements) to integers between 1 and 10, \"startingTraits\": array of short \
strings}."
            .to_string(),
        default_translations: Default::default(),
    }
}

/// First characters of a reply, for error messages.
fn excerpt(reply: &str) -> String {
    reply.chars().take(120).collect()
}
