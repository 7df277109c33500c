//! Strategy name normalization.
//!
//! The host appends an instance counter to strategies that share a name,
//! e.g. `Alpha (2)`. Output files are keyed by the name without it.

/// Everything before the first `(`, trimmed. Names without `(` are
/// returned unchanged.
pub fn normalize_strategy_name(display_name: &str) -> &str {
    match display_name.find('(') {
        Some(idx) => display_name[..idx].trim(),
        None => display_name,
    }
}
