//! Medical list-field normalizer.
//!
//! The intake forms historically submitted allergies, chronic illnesses,
//! and current medications either as free text or as a list, and numeric
//! junk occasionally ended up persisted. Normalization runs at write time:
//! free text is split on commas and newlines, tokens are trimmed, empties
//! are dropped, and purely numeric tokens are filtered out before anything
//! reaches the store.

use serde::{Deserialize, Serialize};

/// A list field as submitted: free text or an explicit list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ListInput {
    Text(String),
    Items(Vec<String>),
}

impl From<&str> for ListInput {
    fn from(s: &str) -> Self {
        ListInput::Text(s.to_string())
    }
}

impl From<Vec<String>> for ListInput {
    fn from(items: Vec<String>) -> Self {
        ListInput::Items(items)
    }
}

/// Coerce a submitted list field into an ordered list of trimmed,
/// non-empty strings.
pub fn normalize_list_field(input: &ListInput) -> Vec<String> {
    match input {
        ListInput::Text(text) => split_list_text(text),
        ListInput::Items(items) => items
            .iter()
            .map(|item| item.trim().to_string())
            .filter(|item| !item.is_empty())
            .collect(),
    }
}

/// Split free text on commas and newlines, dropping empty tokens.
pub fn split_list_text(text: &str) -> Vec<String> {
    text.split(['\n', ','])
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Drop tokens that are purely numeric.
pub fn filter_words_only(items: &[String]) -> Vec<String> {
    items
        .iter()
        .filter(|item| !is_numeric_token(item))
        .cloned()
        .collect()
}

/// Normalize and filter in one pass, as the patient repository does
/// before every write.
pub fn clean_list_field(input: &ListInput) -> Vec<String> {
    filter_words_only(&normalize_list_field(input))
}

fn is_numeric_token(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_on_commas_and_newlines() {
        let items = split_list_text("penicillin, peanuts\nlatex");
        assert_eq!(items, vec!["penicillin", "peanuts", "latex"]);
    }

    #[test]
    fn test_empty_tokens_dropped() {
        let items = split_list_text(",, penicillin ,\n,  ");
        assert_eq!(items, vec!["penicillin"]);
    }

    #[test]
    fn test_list_input_passes_through_trimmed() {
        let input = ListInput::Items(vec![" aspirin ".into(), "".into(), "ibuprofen".into()]);
        assert_eq!(normalize_list_field(&input), vec!["aspirin", "ibuprofen"]);
    }

    #[test]
    fn test_empty_text_yields_empty_list() {
        assert!(normalize_list_field(&ListInput::Text(String::new())).is_empty());
    }

    #[test]
    fn test_filter_drops_purely_numeric() {
        let items = vec!["123".to_string(), "vitamin d3".to_string(), "42".to_string()];
        assert_eq!(filter_words_only(&items), vec!["vitamin d3"]);
    }

    #[test]
    fn test_mixed_alphanumeric_kept() {
        let items = vec!["d3".to_string(), "100mg".to_string()];
        assert_eq!(filter_words_only(&items), items);
    }

    #[test]
    fn test_clean_list_field() {
        let cleaned = clean_list_field(&ListInput::Text("aspirin, 500, \nmetformin".into()));
        assert_eq!(cleaned, vec!["aspirin", "metformin"]);
    }

    #[test]
    fn test_order_preserved() {
        let cleaned = clean_list_field(&ListInput::Text("c, a, b".into()));
        assert_eq!(cleaned, vec!["c", "a", "b"]);
    }
}
