//! Language code type: opaque, host-defined locale identifier.
//!
//! This module provides the `LanguageCode` type, a thin wrapper around the
//! locale strings the host platform uses (e.g. "en_US", "pt_BR"). Codes carry
//! no syntactic guarantees; whether a code is known or active is decided by
//! the `LanguageRegistry` it is checked against, never by the type itself.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque language/locale code.
///
/// Ordered and hashable so it can key group mappings; serializes as the bare
/// string so persisted records stay readable in the host's option store.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageCode(String);

impl LanguageCode {
    /// Create a language code from any string-like value.
    ///
    /// No validation happens here; pass the result to a registry to learn
    /// whether the code is known or active.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Get the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LanguageCode {
    fn from(code: &str) -> Self {
        Self(code.to_string())
    }
}

impl From<String> for LanguageCode {
    fn from(code: String) -> Self {
        Self(code)
    }
}

impl AsRef<str> for LanguageCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Construction Tests ====================

    #[test]
    fn test_new_from_str() {
        let code = LanguageCode::new("en_US");
        assert_eq!(code.as_str(), "en_US");
    }

    #[test]
    fn test_from_string() {
        let code = LanguageCode::from("pt_BR".to_string());
        assert_eq!(code.as_str(), "pt_BR");
    }

    #[test]
    fn test_display() {
        let code = LanguageCode::new("fr_FR");
        assert_eq!(format!("{}", code), "fr_FR");
    }

    // ==================== Equality and Ordering Tests ====================

    #[test]
    fn test_equality() {
        assert_eq!(LanguageCode::new("en_US"), LanguageCode::from("en_US"));
        assert_ne!(LanguageCode::new("en_US"), LanguageCode::new("en_GB"));
    }

    #[test]
    fn test_ordering_is_lexicographic() {
        let mut codes = vec![
            LanguageCode::new("pt_BR"),
            LanguageCode::new("en_US"),
            LanguageCode::new("fr_FR"),
        ];
        codes.sort();
        assert_eq!(codes[0].as_str(), "en_US");
        assert_eq!(codes[2].as_str(), "pt_BR");
    }

    // ==================== Serde Tests ====================

    #[test]
    fn test_serializes_as_bare_string() {
        let code = LanguageCode::new("es_ES");
        let json = serde_json::to_string(&code).expect("serialize");
        assert_eq!(json, "\"es_ES\"");
    }

    #[test]
    fn test_deserializes_from_bare_string() {
        let code: LanguageCode = serde_json::from_str("\"de_DE\"").expect("deserialize");
        assert_eq!(code, LanguageCode::new("de_DE"));
    }

    #[test]
    fn test_works_as_json_map_key() {
        use std::collections::BTreeMap;

        let mut map = BTreeMap::new();
        map.insert(LanguageCode::new("en_US"), 10);
        let json = serde_json::to_string(&map).expect("serialize");
        assert_eq!(json, "{\"en_US\":10}");
    }
}
