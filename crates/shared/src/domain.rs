use std::fmt;

use serde::{Deserialize, Serialize};

/// Normalized search terms taken from a comma-separated input line.
///
/// Pieces are trimmed and empty pieces dropped. Order and duplicates are kept
/// exactly as typed so the service receives what the user asked for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeywordList(Vec<String>);

impl KeywordList {
    pub fn parse(raw: &str) -> Self {
        Self(
            raw.split(',')
                .map(str::trim)
                .filter(|piece| !piece.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn contains(&self, keyword: &str) -> bool {
        self.0.iter().any(|k| k == keyword)
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl fmt::Display for KeywordList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(", "))
    }
}

impl<S: Into<String>> FromIterator<S> for KeywordList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_and_trims_comma_separated_input() {
        let keywords = KeywordList::parse("  python developer , react developer,rust ");
        assert_eq!(
            keywords.as_slice(),
            ["python developer", "react developer", "rust"]
        );
    }

    #[test]
    fn drops_empty_pieces_and_keeps_duplicates() {
        let keywords = KeywordList::parse(",rust,, ,rust,");
        assert_eq!(keywords.as_slice(), ["rust", "rust"]);
    }

    #[test]
    fn blank_input_yields_empty_list() {
        assert!(KeywordList::parse("").is_empty());
        assert!(KeywordList::parse("   ").is_empty());
        assert!(KeywordList::parse(" , ,, ").is_empty());
    }

    #[test]
    fn serializes_as_plain_array() {
        let keywords = KeywordList::parse("go, zig");
        assert_eq!(
            serde_json::to_value(&keywords).expect("serialize"),
            serde_json::json!(["go", "zig"])
        );
        assert_eq!(keywords.to_string(), "go, zig");
    }
}
