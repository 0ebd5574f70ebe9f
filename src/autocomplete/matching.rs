//! Candidate matching
//!
//! Filtering is a pure projection: it never reorders or mutates the
//! candidate list.

use crate::models::Suggestion;

/// Items whose name contains the trimmed query, case-insensitively.
/// A blank query keeps every item.
pub fn filter_suggestions(suggestions: &[Suggestion], query: &str) -> Vec<Suggestion> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return suggestions.to_vec();
    }

    suggestions
        .iter()
        .filter(|item| item.name.to_lowercase().contains(&query))
        .cloned()
        .collect()
}

/// Trim, lowercase and collapse internal whitespace runs to one space.
pub fn normalize_label(label: &str) -> String {
    label
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// First candidate whose normalized name equals the normalized text
pub fn find_exact<'a>(suggestions: &'a [Suggestion], text: &str) -> Option<&'a Suggestion> {
    let wanted = normalize_label(text);
    if wanted.is_empty() {
        return None;
    }
    suggestions.iter().find(|item| normalize_label(&item.name) == wanted)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fruits() -> Vec<Suggestion> {
        vec![
            Suggestion::new(1, "Apple"),
            Suggestion::new(2, "Banana"),
            Suggestion::new(3, "Pineapple"),
            Suggestion::new(4, "Grape"),
        ]
    }

    #[test]
    fn test_filter_keeps_order_and_matches_case_insensitively() {
        let filtered = filter_suggestions(&fruits(), "AP");
        let names: Vec<_> = filtered.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Apple", "Pineapple", "Grape"]);
    }

    #[test]
    fn test_filter_blank_query_returns_everything() {
        assert_eq!(filter_suggestions(&fruits(), ""), fruits());
        assert_eq!(filter_suggestions(&fruits(), "   "), fruits());
    }

    #[test]
    fn test_filter_ignores_surrounding_whitespace() {
        for query in ["ap ", " ap", "  Ap\t"] {
            let filtered = filter_suggestions(&fruits(), query);
            let names: Vec<_> = filtered.iter().map(|s| s.name.as_str()).collect();
            assert_eq!(names, vec!["Apple", "Pineapple", "Grape"], "query {query:?}");
        }
        // inner spaces are part of the needle
        assert!(filter_suggestions(&fruits(), "a p").is_empty());
    }

    #[test]
    fn test_filter_result_is_subsequence() {
        let all = fruits();
        for query in ["a", "an", "pp", "zzz", "e"] {
            let filtered = filter_suggestions(&all, query);
            let mut cursor = all.iter();
            for item in &filtered {
                assert!(item.name.to_lowercase().contains(query));
                assert!(cursor.any(|c| c == item), "{query}: not a subsequence");
            }
            let expected = all.iter().filter(|s| s.name.to_lowercase().contains(query)).count();
            assert_eq!(filtered.len(), expected);
        }
    }

    #[test]
    fn test_normalize_label() {
        assert_eq!(normalize_label("  New   York\tCity "), "new york city");
        assert_eq!(normalize_label(""), "");
    }

    #[test]
    fn test_find_exact_ignores_case_and_spacing() {
        let items = vec![Suggestion::new("ny", "New York"), Suggestion::new("nj", "New Jersey")];
        assert_eq!(find_exact(&items, " new   YORK ").map(|s| s.id.as_str()), Some("ny"));
        assert!(find_exact(&items, "new").is_none());
        assert!(find_exact(&items, "   ").is_none());
    }
}
