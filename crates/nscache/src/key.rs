//! # Key Derivation
//!
//! Maps a (namespace, key) pair onto the physical Redis key string.

/// Separator between the namespace and the logical key.
pub const SEPARATOR: &str = "::";

/// Derive the physical Redis key for a namespaced entry.
///
/// The mapping is injective as long as neither input embeds `"::"` in a
/// conflicting position; callers that do so accept the collision risk.
#[must_use]
pub fn cache_key(namespace: &str, key: &str) -> String {
    format!("{namespace}{SEPARATOR}{key}")
}

/// Prefix shared by every key in `namespace`, used for prefix scans.
#[must_use]
pub fn namespace_prefix(namespace: &str) -> String {
    cache_key(namespace, "")
}

/// Build the KEYS glob pattern matching every entry in `namespace`.
///
/// Glob metacharacters in the namespace are backslash-escaped so a
/// namespace like `"a*b"` only matches its own keys.
#[must_use]
pub(crate) fn scan_pattern(namespace: &str) -> String {
    let prefix = namespace_prefix(namespace);
    let mut pattern = String::with_capacity(prefix.len() + 1);
    for ch in prefix.chars() {
        if matches!(ch, '*' | '?' | '[' | ']' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('*');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_concatenation() {
        assert_eq!(cache_key("a", "b"), "a::b");
        assert_eq!(cache_key("session", "user-42"), "session::user-42");
    }

    #[test]
    fn test_cache_key_deterministic() {
        assert_eq!(cache_key("ns", "k"), cache_key("ns", "k"));
    }

    #[test]
    fn test_cache_key_empty_inputs() {
        assert_eq!(cache_key("", ""), "::");
        assert_eq!(cache_key("", "k"), "::k");
        assert_eq!(cache_key("ns", ""), "ns::");
    }

    #[test]
    fn test_namespace_prefix() {
        assert_eq!(namespace_prefix("ns"), "ns::");
        assert_eq!(namespace_prefix(""), "::");
    }

    #[test]
    fn test_scan_pattern_plain() {
        assert_eq!(scan_pattern("ns"), "ns::*");
    }

    #[test]
    fn test_scan_pattern_escapes_glob_metacharacters() {
        assert_eq!(scan_pattern("a*b"), "a\\*b::*");
        assert_eq!(scan_pattern("q?"), "q\\?::*");
        assert_eq!(scan_pattern("[set]"), "\\[set\\]::*");
        assert_eq!(scan_pattern("back\\slash"), "back\\\\slash::*");
    }
}
