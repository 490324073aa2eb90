// ---------------------------------------------------------------------------
// Category tokenizer
// ---------------------------------------------------------------------------
//
// The catalog CSV stores multi-valued categorical columns as semi-structured
// strings: either a plain comma-joined value (`Action, Comedy`) or a Python
// list literal left over from the upstream export (`['Action', 'Comedy']`).
// Every call site that needs atomic category values goes through this one
// function so the options list and the filter-match path can never disagree
// on what a token is.

/// Split a raw multi-valued cell into clean atomic tokens.
///
/// * `None` or an empty/whitespace-only string → empty vec
/// * `"['Action', 'Comedy']"` → `["Action", "Comedy"]`
/// * `"Action, Comedy"` → `["Action", "Comedy"]`
///
/// Tokens are trimmed, de-quoted, and never empty. Idempotent on
/// already-clean input.
pub fn tokenize(raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw else {
        return Vec::new();
    };

    raw.trim()
        .trim_start_matches('[')
        .trim_end_matches(']')
        .split(',')
        .map(|piece| piece.trim().trim_matches(|c| c == '\'' || c == '"').trim())
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_and_empty_yield_nothing() {
        assert_eq!(tokenize(None), Vec::<String>::new());
        assert_eq!(tokenize(Some("")), Vec::<String>::new());
        assert_eq!(tokenize(Some("   ")), Vec::<String>::new());
        assert_eq!(tokenize(Some("[]")), Vec::<String>::new());
    }

    #[test]
    fn list_literal_form() {
        assert_eq!(
            tokenize(Some("['Action', 'Comedy']")),
            vec!["Action", "Comedy"]
        );
        assert_eq!(tokenize(Some("[\"Isekai\"]")), vec!["Isekai"]);
    }

    #[test]
    fn comma_joined_form() {
        assert_eq!(tokenize(Some("Action, Comedy")), vec!["Action", "Comedy"]);
        assert_eq!(tokenize(Some("Action,Comedy")), vec!["Action", "Comedy"]);
    }

    #[test]
    fn whitespace_and_empty_pieces_dropped() {
        assert_eq!(
            tokenize(Some("[' Action ', '', 'Comedy ']")),
            vec!["Action", "Comedy"]
        );
    }

    #[test]
    fn idempotent_on_clean_input() {
        let clean = tokenize(Some("['Sci-Fi', 'Slice of Life']"));
        let joined = clean.join(", ");
        assert_eq!(tokenize(Some(&joined)), clean);
    }

    #[test]
    fn round_trip_preserves_token_set() {
        let original = tokenize(Some("['Mecha', 'Isekai', 'Music']"));
        let mut rejoined = tokenize(Some(&original.join(",")));
        let mut expected = original.clone();
        rejoined.sort();
        expected.sort();
        assert_eq!(rejoined, expected);
    }
}
