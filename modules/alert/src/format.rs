//! Display helpers for the dashboard, kept out of the engine itself.

use pulseproof_common::alert::Category;

/// The label a category is summarized under: the tag, case-normalized, with
/// underscores replaced by spaces.
pub fn category_label(category: Category) -> String {
    category.as_str().replace('_', " ")
}

/// Truncated badge for a contract hash, e.g. `0xdead…beef`.
///
/// Hashes short enough to display whole are returned unchanged.
pub fn hash_badge(hash: &str) -> String {
    const PREFIX: usize = 6;
    const SUFFIX: usize = 4;

    if hash.len() <= PREFIX + SUFFIX {
        return hash.to_string();
    }
    match (hash.get(..PREFIX), hash.get(hash.len() - SUFFIX..)) {
        (Some(prefix), Some(suffix)) => format!("{prefix}…{suffix}"),
        // not sliceable on char boundaries, so not a hex hash anyway
        _ => hash.to_string(),
    }
}
