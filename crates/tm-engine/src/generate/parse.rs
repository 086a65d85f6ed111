//! JSON extraction from model replies.
//!
//! Models wrap JSON in prose and markdown fences despite instructions.
//! Extraction tries the likeliest shapes in order and gives up with
//! `None`; callers decide whether that is a fallback or an error.

use serde::de::DeserializeOwned;

/// Pull a `T` out of a model reply.
///
/// Tried in order: a fenced ```` ```json ```` block, the whole trimmed
/// text, then the widest `{`..`}` slice.
pub fn extract_json<T: DeserializeOwned>(reply: &str) -> Option<T> {
    if let Some(block) = fenced_block(reply) {
        if let Ok(value) = serde_json::from_str(block) {
            return Some(value);
        }
    }
    if let Ok(value) = serde_json::from_str(reply.trim()) {
        return Some(value);
    }
    let start = reply.find('{')?;
    let end = reply.rfind('}')?;
    if start >= end {
        return None;
    }
    serde_json::from_str(&reply[start..=end]).ok()
}

/// The body of the first markdown code fence, with an optional `json`
/// language tag stripped.
fn fenced_block(reply: &str) -> Option<&str> {
    let open = reply.find("```")?;
    let rest = &reply[open + 3..];
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let close = rest.find("```")?;
    Some(rest[..close].trim())
}
