//! Genre Resolution
//!
//! Maps the small integer genre ids carried by podcast records to their
//! display names. The table is fixed for the life of the process: it is built
//! once on first use and only ever read afterwards.

use std::collections::HashMap;
use std::sync::OnceLock;

/// Name rendered for any id that is not in the table (or cannot be parsed)
pub const UNKNOWN_GENRE: &str = "Unknown";

/// Integer id referencing the genre table
pub type GenreId = u32;

const GENRE_TABLE: &[(GenreId, &str)] = &[
    (1, "Personal Growth"),
    (2, "Investigative Journalism"),
    (3, "History"),
    (4, "Comedy"),
    (5, "Entertainment"),
    (6, "Business"),
    (7, "Fiction"),
    (8, "News"),
    (9, "Kids and Family"),
];

/// One token of a comma-separated genre encoding (`"3,1,3"`)
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GenreToken {
    /// A token that parsed as an integer id
    Id(GenreId),
    /// A token that is not a valid integer id
    Malformed(String),
}

/// Read-only genre lookup
#[derive(Debug)]
pub struct GenreResolver {
    names: HashMap<GenreId, &'static str>,
}

impl GenreResolver {
    fn new() -> Self {
        Self {
            names: GENRE_TABLE.iter().copied().collect(),
        }
    }

    /// The process-wide resolver
    pub fn shared() -> &'static GenreResolver {
        static SHARED: OnceLock<GenreResolver> = OnceLock::new();
        SHARED.get_or_init(GenreResolver::new)
    }

    /// Resolve one id, falling back to [`UNKNOWN_GENRE`]
    #[must_use]
    pub fn resolve(&self, id: GenreId) -> &'static str {
        self.names.get(&id).copied().unwrap_or(UNKNOWN_GENRE)
    }

    /// Resolve ids in order; output has the same length as the input
    #[must_use]
    pub fn resolve_names(&self, ids: &[GenreId]) -> Vec<&'static str> {
        ids.iter().map(|&id| self.resolve(id)).collect()
    }

    /// Resolve a parsed token; malformed tokens resolve like unknown ids
    #[must_use]
    pub fn resolve_token(&self, token: &GenreToken) -> &'static str {
        match token {
            GenreToken::Id(id) => self.resolve(*id),
            GenreToken::Malformed(raw) => {
                tracing::debug!(token = %raw, "Malformed genre token");
                UNKNOWN_GENRE
            }
        }
    }

    /// Whether the id has a name in the table
    #[must_use]
    pub fn is_known(&self, id: GenreId) -> bool {
        self.names.contains_key(&id)
    }
}

/// Split a comma-separated genre encoding into tokens
///
/// An empty (or whitespace-only) encoding yields no tokens. Empty tokens
/// between commas (`"1,,2"`) are malformed.
#[must_use]
pub fn parse_encoding(encoded: &str) -> Vec<GenreToken> {
    if encoded.trim().is_empty() {
        return Vec::new();
    }

    encoded
        .split(',')
        .map(str::trim)
        .map(|token| match token.parse::<GenreId>() {
            Ok(id) => GenreToken::Id(id),
            Err(_) => GenreToken::Malformed(token.to_string()),
        })
        .collect()
}

/// Join ids into the encoding used by the card's `genres` attribute
#[must_use]
pub fn encode(ids: &[GenreId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Parse an encoding and resolve every token, keeping order and duplicates
#[must_use]
pub fn resolve_encoding(encoded: &str) -> Vec<&'static str> {
    let resolver = GenreResolver::shared();
    parse_encoding(encoded)
        .iter()
        .map(|token| resolver.resolve_token(token))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_and_unknown() {
        let resolver = GenreResolver::shared();
        assert_eq!(resolver.resolve(3), "History");
        assert_eq!(resolver.resolve(9), "Kids and Family");
        assert_eq!(resolver.resolve(99), UNKNOWN_GENRE);
        assert_eq!(resolver.resolve(0), UNKNOWN_GENRE);
    }

    #[test]
    fn test_resolve_names_keeps_order_and_length() {
        let names = GenreResolver::shared().resolve_names(&[3, 1, 3, 42]);
        assert_eq!(names, vec!["History", "Personal Growth", "History", "Unknown"]);
    }

    #[test]
    fn test_parse_encoding() {
        assert_eq!(
            parse_encoding(" 3, 1 ,x"),
            vec![
                GenreToken::Id(3),
                GenreToken::Id(1),
                GenreToken::Malformed("x".to_string())
            ]
        );
        assert!(parse_encoding("").is_empty());
        assert!(parse_encoding("   ").is_empty());
        assert_eq!(
            parse_encoding("1,,2")[1],
            GenreToken::Malformed(String::new())
        );
    }

    #[test]
    fn test_negative_ids_are_malformed() {
        assert_eq!(resolve_encoding("-1"), vec![UNKNOWN_GENRE]);
    }

    #[test]
    fn test_encode() {
        assert_eq!(encode(&[3, 1, 3]), "3,1,3");
        assert_eq!(encode(&[]), "");
    }

    #[test]
    fn test_shared_is_single_instance() {
        assert!(std::ptr::eq(GenreResolver::shared(), GenreResolver::shared()));
        assert!(GenreResolver::shared().is_known(1));
        assert!(!GenreResolver::shared().is_known(10));
    }
}
