//! Configuration for the game engine.

use std::time::Duration;

/// Tunable engine parameters. `Default` gives production values.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Deadline for one narrative generation call. On the event path an
    /// expired deadline falls back to the default event; on the fate path
    /// it propagates as a dependency failure.
    pub generation_timeout: Duration,
    /// Id of the fate template used when no explicit id is given.
    pub fate_template_id: String,
    /// Maximum history records returned by a default `recent` query.
    pub history_page_size: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            generation_timeout: Duration::from_secs(15),
            fate_template_id: "default-fate".to_string(),
            history_page_size: 10,
        }
    }
}

impl EngineConfig {
    /// Set the generation deadline.
    pub fn with_generation_timeout(mut self, timeout: Duration) -> Self {
        self.generation_timeout = timeout;
        self
    }

    /// Set the default fate template id.
    pub fn with_fate_template_id(mut self, id: impl Into<String>) -> Self {
        self.fate_template_id = id.into();
        self
    }

    /// Set the history page size (at least 1).
    pub fn with_history_page_size(mut self, size: usize) -> Self {
        self.history_page_size = size.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.generation_timeout, Duration::from_secs(15));
        assert_eq!(cfg.fate_template_id, "default-fate");
        assert_eq!(cfg.history_page_size, 10);
    }

    #[test]
    fn builder_methods() {
        let cfg = EngineConfig::default()
            .with_generation_timeout(Duration::from_millis(50))
            .with_fate_template_id("trial-fate")
            .with_history_page_size(25);
        assert_eq!(cfg.generation_timeout, Duration::from_millis(50));
        assert_eq!(cfg.fate_template_id, "trial-fate");
        assert_eq!(cfg.history_page_size, 25);
    }

    #[test]
    fn page_size_never_drops_to_zero() {
        let cfg = EngineConfig::default().with_history_page_size(0);
        assert_eq!(cfg.history_page_size, 1);
    }
}
