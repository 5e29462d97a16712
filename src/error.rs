//! Errors raised while building a validator.
//!
//! Failing *validation* is not an error: it is recorded on the output tree.
//! The types here cover the schema side only: malformed keyword payloads,
//! pointers and URIs that do not parse, and references that cannot be
//! located in the schema store.
use std::{error, fmt};

/// An error produced while parsing a schema or resolving a reference.
#[derive(Debug)]
pub struct SchemaError {
    /// What went wrong.
    pub kind: SchemaErrorKind,
}

/// Kinds of schema-side failures.
#[derive(Debug)]
pub enum SchemaErrorKind {
    /// A recognized keyword rejected its payload.
    Parse {
        /// The keyword whose parser failed.
        keyword: String,
        /// Parser-provided detail.
        detail: String,
    },
    /// A value in schema position was neither a boolean nor an object.
    NotASchema {
        /// Rendering of the offending value.
        found: String,
    },
    /// A `$ref` target could not be located.
    UnresolvedRef {
        /// The reference as written in the schema.
        reference: String,
    },
    /// A JSON Pointer failed to parse.
    Pointer {
        /// The pointer text.
        pointer: String,
        /// Why it was rejected.
        detail: &'static str,
    },
    /// A URI failed to parse or resolve.
    InvalidUri {
        /// The URI text.
        uri: String,
        /// Error reported by the URI parser.
        error: url::ParseError,
    },
    /// `$schema` names a specification this crate does not implement.
    UnknownDraft {
        /// The `$schema` value.
        uri: String,
    },
}

/// Shortcuts for creation of specific error kinds.
impl SchemaError {
    pub(crate) fn parse(keyword: impl Into<String>, detail: impl Into<String>) -> SchemaError {
        SchemaError {
            kind: SchemaErrorKind::Parse {
                keyword: keyword.into(),
                detail: detail.into(),
            },
        }
    }

    pub(crate) fn not_a_schema(found: &serde_json::Value) -> SchemaError {
        SchemaError {
            kind: SchemaErrorKind::NotASchema {
                found: found.to_string(),
            },
        }
    }

    pub(crate) fn unresolved_ref(reference: impl Into<String>) -> SchemaError {
        SchemaError {
            kind: SchemaErrorKind::UnresolvedRef {
                reference: reference.into(),
            },
        }
    }

    pub(crate) fn pointer(pointer: impl Into<String>, detail: &'static str) -> SchemaError {
        SchemaError {
            kind: SchemaErrorKind::Pointer {
                pointer: pointer.into(),
                detail,
            },
        }
    }

    pub(crate) fn invalid_uri(uri: impl Into<String>, error: url::ParseError) -> SchemaError {
        SchemaError {
            kind: SchemaErrorKind::InvalidUri {
                uri: uri.into(),
                error,
            },
        }
    }

    pub(crate) fn unknown_draft(uri: impl Into<String>) -> SchemaError {
        SchemaError {
            kind: SchemaErrorKind::UnknownDraft { uri: uri.into() },
        }
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            SchemaErrorKind::Parse { keyword, detail } => {
                write!(f, "invalid value for {keyword:?}: {detail}")
            }
            SchemaErrorKind::NotASchema { found } => {
                write!(f, "{found} is not a schema: expected a boolean or an object")
            }
            SchemaErrorKind::UnresolvedRef { reference } => {
                write!(f, "unresolved reference {reference:?}")
            }
            SchemaErrorKind::Pointer { pointer, detail } => {
                write!(f, "invalid JSON pointer {pointer:?}: {detail}")
            }
            SchemaErrorKind::InvalidUri { uri, error } => {
                write!(f, "invalid URI {uri:?}: {error}")
            }
            SchemaErrorKind::UnknownDraft { uri } => {
                write!(f, "unsupported JSON Schema specification {uri:?}")
            }
        }
    }
}

impl error::Error for SchemaError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match &self.kind {
            SchemaErrorKind::InvalidUri { error, .. } => Some(error),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SchemaError;

    #[test]
    fn display_carries_the_offending_input() {
        let error = SchemaError::parse("minimum", "expected a number");
        assert_eq!(
            error.to_string(),
            "invalid value for \"minimum\": expected a number"
        );
        let error = SchemaError::unresolved_ref("#/definitions/missing");
        assert_eq!(
            error.to_string(),
            "unresolved reference \"#/definitions/missing\""
        );
    }
}
