//! Clause kinds, operation names, and builder defaults.

/// Boolean-combination role a compiled clause plays inside a `bool` query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClauseKind {
    Must,
    Should,
    Filter,
    MustNot,
}

impl ClauseKind {
    /// All kinds, in the order buckets are emitted.
    pub const ALL: [ClauseKind; 4] = [
        ClauseKind::Must,
        ClauseKind::Should,
        ClauseKind::Filter,
        ClauseKind::MustNot,
    ];

    /// The key this kind occupies inside a `bool` object.
    pub fn as_str(self) -> &'static str {
        match self {
            ClauseKind::Must => "must",
            ClauseKind::Should => "should",
            ClauseKind::Filter => "filter",
            ClauseKind::MustNot => "must_not",
        }
    }
}

/// Pagination defaults for a fresh `QueryBuilder`.
pub const DEFAULT_FROM: u64 = 0;
pub const DEFAULT_SIZE: u64 = 15;

// Term-level operations.
pub const TERM: &str = "term";
pub const TERMS: &str = "terms";
pub const RANGE: &str = "range";
pub const EXISTS: &str = "exists";
pub const PREFIX: &str = "prefix";
pub const WILDCARD: &str = "wildcard";
pub const REGEXP: &str = "regexp";
pub const FUZZY: &str = "fuzzy";
pub const IDS: &str = "ids";

// Full-text operations.
pub const MATCH: &str = "match";
pub const MATCH_PHRASE: &str = "match_phrase";
pub const MATCH_PHRASE_PREFIX: &str = "match_phrase_prefix";
pub const MULTI_MATCH: &str = "multi_match";
pub const QUERY_STRING: &str = "query_string";
pub const SIMPLE_QUERY_STRING: &str = "simple_query_string";

// Match-everything / match-nothing.
pub const MATCH_ALL: &str = "match_all";
pub const MATCH_NONE: &str = "match_none";

// Joining operation for nested documents.
pub const NESTED: &str = "nested";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_keys() {
        assert_eq!(ClauseKind::Must.as_str(), "must");
        assert_eq!(ClauseKind::MustNot.as_str(), "must_not");
    }

    #[test]
    fn test_all_kinds_distinct() {
        let keys: Vec<&str> = ClauseKind::ALL.iter().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["must", "should", "filter", "must_not"]);
    }
}
