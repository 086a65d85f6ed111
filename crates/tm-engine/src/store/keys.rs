//! The storage key scheme.
//!
//! Every persisted record lives under one of these key shapes. Keys embed
//! raw identifiers; usernames are lowercased so lookups are
//! case-insensitive.

use tm_core::{EventId, SessionId, UserId};

/// Prefix shared by all event metadata keys.
pub const EVENT_META_PREFIX: &str = "event:meta:";

/// Key of a user's character profile.
pub fn profile(user: &UserId) -> String {
    format!("user:{user}:profile")
}

/// Key of the username uniqueness index entry for `username`.
pub fn username_index(username: &str) -> String {
    format!("index:username:{}", username.to_lowercase())
}

/// Key of the catalog metadata for `event`.
pub fn event_meta(event: &EventId) -> String {
    format!("{EVENT_META_PREFIX}{event}")
}

/// Key of the stored session for `session`.
pub fn session(session: &SessionId) -> String {
    format!("event:session:{session}")
}

/// Key of a user's event history list.
pub fn history(user: &UserId) -> String {
    format!("user:{user}:event_history")
}

/// Key of the fate template `template`.
pub fn fate_template(template: &str) -> String {
    format!("fate:templates:{template}")
}

/// Key of a user's generated fate.
pub fn user_fate(user: &UserId) -> String {
    format!("user:{user}:fate")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_key_embeds_user_id() {
        let user = UserId::new("u-42");
        assert_eq!(profile(&user), "user:u-42:profile");
    }

    #[test]
    fn username_index_is_case_insensitive() {
        assert_eq!(username_index("WanderingCloud"), username_index("wanderingcloud"));
        assert_eq!(username_index("MuYun"), "index:username:muyun");
    }

    #[test]
    fn event_meta_key_uses_listing_prefix() {
        let key = event_meta(&EventId::new("cave-entrance"));
        assert!(key.starts_with(EVENT_META_PREFIX));
        assert_eq!(key, "event:meta:cave-entrance");
    }

    #[test]
    fn session_key_round_trips_display() {
        let sid = SessionId::new();
        assert_eq!(session(&sid), format!("event:session:{sid}"));
    }

    #[test]
    fn fate_keys() {
        assert_eq!(fate_template("default-fate"), "fate:templates:default-fate");
        let user = UserId::new("u-1");
        assert_eq!(user_fate(&user), "user:u-1:fate");
        assert_eq!(history(&user), "user:u-1:event_history");
    }
}
