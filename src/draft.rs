//! JSON Schema specification versions and draft-conditional behavior.
use serde_json::Value;

use crate::error::SchemaError;

/// JSON Schema specification versions supported by this crate.
#[non_exhaustive]
#[derive(Debug, Default, PartialEq, Eq, Copy, Clone, Hash, PartialOrd, Ord)]
pub enum Draft {
    /// JSON Schema Draft 6
    Draft6,
    /// JSON Schema Draft 7
    Draft7,
    /// JSON Schema Draft 2019-09
    Draft201909,
    /// JSON Schema Draft 2020-12
    #[default]
    Draft202012,
}

impl Draft {
    /// Detect the draft a schema document asks for via its `$schema` member.
    ///
    /// Returns `Ok(None)` when the document carries no usable `$schema`.
    ///
    /// # Errors
    ///
    /// [`SchemaError::UnknownDraft`] when `$schema` names a specification
    /// this crate does not implement.
    pub fn detect(contents: &Value) -> Result<Option<Draft>, SchemaError> {
        let Some(uri) = contents
            .as_object()
            .and_then(|contents| contents.get("$schema"))
            .and_then(|uri| uri.as_str())
        else {
            return Ok(None);
        };
        match uri.trim_end_matches('#') {
            "https://json-schema.org/draft/2020-12/schema" => Ok(Some(Draft::Draft202012)),
            "https://json-schema.org/draft/2019-09/schema" => Ok(Some(Draft::Draft201909)),
            "http://json-schema.org/draft-07/schema" => Ok(Some(Draft::Draft7)),
            "http://json-schema.org/draft-06/schema" => Ok(Some(Draft::Draft6)),
            value => Err(SchemaError::unknown_draft(value)),
        }
    }

    /// Whether `$ref` suppresses its sibling keywords, as it did before 2019-09.
    #[must_use]
    pub(crate) const fn ref_replaces_siblings(self) -> bool {
        matches!(self, Draft::Draft6 | Draft::Draft7)
    }

    const fn bit(self) -> u8 {
        match self {
            Draft::Draft6 => 1,
            Draft::Draft7 => 2,
            Draft::Draft201909 => 4,
            Draft::Draft202012 => 8,
        }
    }
}

/// Compact set of [`Draft`]s, used in keyword descriptors to gate keywords
/// to the specifications that define them.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DraftSet(u8);

impl DraftSet {
    /// Every supported draft.
    pub const ALL: DraftSet = DraftSet(0b1111);
    /// Draft 6 and Draft 7.
    pub const LEGACY: DraftSet = DraftSet(0b0011);
    /// Draft 2019-09 and later.
    pub const MODERN: DraftSet = DraftSet(0b1100);
    /// Draft 7 and later.
    pub const SINCE_7: DraftSet = DraftSet(0b1110);
    /// Draft 2020-12 only.
    pub const LATEST: DraftSet = DraftSet(0b1000);
    /// Everything before Draft 2020-12.
    pub const BEFORE_LATEST: DraftSet = DraftSet(0b0111);

    #[must_use]
    pub const fn contains(self, draft: Draft) -> bool {
        self.0 & draft.bit() != 0
    }
}

#[cfg(test)]
mod tests {
    use super::{Draft, DraftSet};
    use serde_json::json;
    use test_case::test_case;

    #[test_case(&json!({"$schema": "https://json-schema.org/draft/2020-12/schema"}), Draft::Draft202012; "2020-12 without fragment")]
    #[test_case(&json!({"$schema": "https://json-schema.org/draft/2020-12/schema#"}), Draft::Draft202012; "2020-12 with fragment")]
    #[test_case(&json!({"$schema": "https://json-schema.org/draft/2019-09/schema"}), Draft::Draft201909)]
    #[test_case(&json!({"$schema": "http://json-schema.org/draft-07/schema#"}), Draft::Draft7)]
    #[test_case(&json!({"$schema": "http://json-schema.org/draft-06/schema#"}), Draft::Draft6)]
    fn detects_draft(contents: &serde_json::Value, expected: Draft) {
        assert_eq!(Draft::detect(contents).unwrap(), Some(expected));
    }

    #[test]
    fn no_schema_member_detects_nothing() {
        assert_eq!(Draft::detect(&json!({"type": "object"})).unwrap(), None);
    }

    #[test]
    fn unknown_schema_uri_is_an_error() {
        let error = Draft::detect(&json!({"$schema": "http://json-schema.org/draft-03/schema#"}))
            .unwrap_err();
        assert!(error.to_string().contains("draft-03"));
    }

    #[test]
    fn draft_sets() {
        assert!(DraftSet::ALL.contains(Draft::Draft6));
        assert!(DraftSet::MODERN.contains(Draft::Draft202012));
        assert!(!DraftSet::MODERN.contains(Draft::Draft7));
        assert!(DraftSet::LEGACY.contains(Draft::Draft7));
        assert!(!DraftSet::LATEST.contains(Draft::Draft201909));
    }
}
