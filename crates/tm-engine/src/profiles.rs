//! Profile creation, lookup, and mutation.
//!
//! Public operations take the per-user lock themselves. Resolution and
//! fate assignment instead hold the lock across a wider sequence, so they
//! use the lock-free `load`/`save` primitives plus the pure `apply_*`
//! helpers below.

use std::sync::Arc;

use tm_core::{
    CharacterProfile, EventPenalties, EventResult, EventRewards, FateResult, Locale, StatKey,
    UserId,
};
use tm_mechanics::{apply_experience, experience_gain, GradeReport, LedgerResult};

use crate::error::{EngineError, EngineResult};
use crate::locks::KeyedLocks;
use crate::store::{keys, KeyValueStore};

/// Profile registry and mutation service.
pub struct ProfileService {
    store: Arc<dyn KeyValueStore>,
    locks: Arc<KeyedLocks>,
}

impl ProfileService {
    /// Service reading and writing through `store`, serializing per-user
    /// writes through `locks`.
    pub fn new(store: Arc<dyn KeyValueStore>, locks: Arc<KeyedLocks>) -> Self {
        Self { store, locks }
    }

    /// Create a fresh profile for `id` under `username`.
    ///
    /// Usernames are unique case-insensitively; the check and the index
    /// write happen under the username's lock so two concurrent creations
    /// of the same name cannot both pass.
    pub async fn create(
        &self,
        id: UserId,
        username: &str,
        locale: Locale,
    ) -> EngineResult<CharacterProfile> {
        let index_key = keys::username_index(username);
        let _guard = self.locks.acquire(&index_key).await;

        if self.store.get(&index_key).await?.is_some() {
            return Err(EngineError::UsernameTaken(username.to_string()));
        }
        if self.store.get(&keys::profile(&id)).await?.is_some() {
            return Err(EngineError::ProfileExists(id));
        }

        let profile = CharacterProfile::new(id.clone(), username, locale);
        self.save(&profile).await?;
        self.store.set(&index_key, id.to_string()).await?;
        Ok(profile)
    }

    /// The profile for `user`.
    pub async fn get(&self, user: &UserId) -> EngineResult<CharacterProfile> {
        self.load(user).await
    }

    /// The profile registered under `username`, case-insensitively.
    pub async fn find_by_username(&self, username: &str) -> EngineResult<CharacterProfile> {
        let id = self
            .store
            .get(&keys::username_index(username))
            .await?
            .ok_or_else(|| EngineError::UsernameNotFound(username.to_string()))?;
        self.load(&UserId::new(id)).await
    }

    /// Deposit a raw experience amount into one stat.
    pub async fn add_experience(
        &self,
        user: &UserId,
        key: StatKey,
        amount: i64,
    ) -> EngineResult<(CharacterProfile, GradeReport)> {
        let _guard = self.locks.acquire(&keys::profile(user)).await;
        let mut profile = self.load(user).await?;
        let report = apply_experience(profile.stat_mut(key), amount)?;
        self.save(&profile).await?;
        Ok((profile, report))
    }

    /// Run a timed training session against one stat.
    ///
    /// The gain scales with the stat's current value and is floored to a
    /// whole experience amount before deposit.
    pub async fn train(
        &self,
        user: &UserId,
        key: StatKey,
        base_rate: f64,
        duration_minutes: u32,
    ) -> EngineResult<(CharacterProfile, GradeReport)> {
        let _guard = self.locks.acquire(&keys::profile(user)).await;
        let mut profile = self.load(user).await?;
        let gain = experience_gain(base_rate, duration_minutes, profile.stat(key).value);
        let report = apply_experience(profile.stat_mut(key), gain.floor() as i64)?;
        self.save(&profile).await?;
        Ok((profile, report))
    }

    async fn load(&self, user: &UserId) -> EngineResult<CharacterProfile> {
        load_profile(&*self.store, user).await
    }

    async fn save(&self, profile: &CharacterProfile) -> EngineResult<()> {
        save_profile(&*self.store, profile).await
    }
}

/// Read a profile without taking its lock. Callers that mutate must hold
/// the user lock across load, mutation, and save.
pub(crate) async fn load_profile(
    store: &dyn KeyValueStore,
    user: &UserId,
) -> EngineResult<CharacterProfile> {
    let raw = store
        .get(&keys::profile(user))
        .await?
        .ok_or_else(|| EngineError::ProfileNotFound(user.clone()))?;
    Ok(serde_json::from_str(&raw)?)
}

/// Write a profile without taking its lock.
pub(crate) async fn save_profile(
    store: &dyn KeyValueStore,
    profile: &CharacterProfile,
) -> EngineResult<()> {
    let raw = serde_json::to_string(profile)?;
    store.set(&keys::profile(&profile.id), raw).await?;
    Ok(())
}

/// Apply a resolution outcome to a profile, in memory.
///
/// Success outcomes carry rewards, failure outcomes penalties; either side
/// may be absent. Errors leave the profile partially updated, so callers
/// must not persist it after a failure.
pub fn apply_result(profile: &mut CharacterProfile, result: &EventResult) -> LedgerResult<()> {
    if let Some(rewards) = &result.rewards {
        apply_rewards(profile, rewards)?;
    }
    if let Some(penalties) = &result.penalties {
        apply_penalties(profile, penalties);
    }
    Ok(())
}

/// Apply success rewards to a profile, in memory.
///
/// Item grants are recorded in the result but not interpreted here; there
/// is no inventory system.
pub fn apply_rewards(profile: &mut CharacterProfile, rewards: &EventRewards) -> LedgerResult<()> {
    if let Some(ep) = &rewards.ep {
        for (key, amount) in ep {
            let amount = i64::try_from(*amount).unwrap_or(i64::MAX);
            apply_experience(profile.stat_mut(*key), amount)?;
        }
    }
    if let Some(delta) = rewards.life {
        profile.adjust_life(delta);
    }
    if let Some(traits) = &rewards.traits {
        for name in traits {
            profile.add_trait(name.clone());
        }
    }
    if let Some(achievement) = &rewards.achievement {
        profile.add_achievement(achievement.clone());
    }
    Ok(())
}

/// Apply failure penalties to a profile, in memory. Life deltas arrive
/// signed, negative for a loss.
pub fn apply_penalties(profile: &mut CharacterProfile, penalties: &EventPenalties) {
    if let Some(delta) = penalties.life {
        profile.adjust_life(delta);
    }
    if let Some(traits) = &penalties.traits {
        for name in traits {
            profile.remove_trait(name);
        }
    }
}

/// Assign a generated fate to a profile, in memory.
///
/// Starting stats raise a stat's value to the starting level but never
/// lower one already above it. Starting traits are set-unioned in.
pub fn apply_fate(profile: &mut CharacterProfile, fate: &FateResult) {
    profile.fate = Some(fate.fate.clone());
    for (key, starting) in &fate.starting_stats {
        let stat = profile.stat_mut(*key);
        if *starting > stat.value {
            stat.value = *starting;
        }
    }
    for name in &fate.starting_traits {
        profile.add_trait(name.clone());
    }
}
