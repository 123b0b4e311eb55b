//! Identity-keyed registration merging for tools, resources, and prompts.
use std::collections::HashSet;

use tracing::debug;

use crate::capability::{RegisteredPrompt, RegisteredResource, RegisteredTool};

/// An item identified by a string key within its collection.
pub trait Keyed {
    /// Collection label used in logs.
    const KIND: &'static str;

    fn key(&self) -> &str;
}

impl Keyed for RegisteredTool {
    const KIND: &'static str = "tool";

    fn key(&self) -> &str {
        self.name()
    }
}

impl Keyed for RegisteredResource {
    const KIND: &'static str = "resource";

    fn key(&self) -> &str {
        self.uri()
    }
}

impl Keyed for RegisteredPrompt {
    const KIND: &'static str = "prompt";

    fn key(&self) -> &str {
        self.name()
    }
}

/// Append each item of `adding` whose key is not already in `existing`.
///
/// Keys are checked against `existing` as it was when the call started, so
/// duplicates within `adding` itself are kept.
pub fn deduplicate<T: Keyed>(existing: Vec<T>, adding: impl IntoIterator<Item = T>) -> Vec<T> {
    let existing_keys: HashSet<String> =
        existing.iter().map(|item| item.key().to_owned()).collect();
    let mut merged = existing;

    for item in adding {
        if existing_keys.contains(item.key()) {
            debug!(
                target: "fast_mcp::registry",
                kind = T::KIND,
                key = item.key(),
                "Skipping duplicate registration"
            );
            continue;
        }
        merged.push(item);
    }

    merged
}
