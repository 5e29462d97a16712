//! # jschema
//!
//! JSON Schema validation built around an interpreted schema model:
//! keywords parse into a closed set of typed payloads, evaluate in a
//! fixed priority order, and talk to each other through annotations
//! (`prefixItems` tells `items` where to start; `properties` and
//! `patternProperties` tell `additionalProperties` what is left).
//! Drafts 6, 7, 2019-09, and 2020-12 are supported, with draft-gated
//! keywords and `$ref` resolution against an in-memory schema store.
//!
//! ## Validation
//!
//! ```rust
//! use serde_json::json;
//!
//! let schema = json!({"type": "string", "minLength": 2, "maxLength": 4});
//! let validator = jschema::validator_for(&schema).expect("a valid schema");
//!
//! assert!(validator.is_valid(&json!("ab")));
//! assert!(!validator.is_valid(&json!("a")));
//!
//! let ctx = validator.evaluate(&json!("a"));
//! for node in ctx.walk().filter(|node| node.message().is_some()) {
//!     println!(
//!         "{} at {}",
//!         node.message().unwrap(),
//!         node.schema_location()
//!     );
//! }
//! ```
//!
//! ## Options
//!
//! ```rust
//! use serde_json::json;
//!
//! let validator = jschema::options()
//!     .with_draft(jschema::Draft::Draft7)
//!     .with_optimizations(true)
//!     .build(&json!({"items": [{"type": "integer"}]}))
//!     .expect("a valid schema");
//! assert!(validator.is_valid(&json!([1, "anything"])));
//! ```
//!
//! ## Output formats
//!
//! ```rust
//! use serde_json::json;
//!
//! let validator = jschema::validator_for(&json!({"maxLength": 3})).unwrap();
//! let output = validator.apply(&json!("long string")).basic();
//! assert!(!output.is_valid());
//! ```
#![warn(missing_docs)]

mod annotations;
mod context;
mod draft;
mod error;
mod evaluator;
mod keywords;
mod options;
mod output;
mod paths;
mod registry;
mod schema;
mod store;
mod validator;
mod value;

pub use annotations::{Annotation, AnnotationMap};
pub use context::ValidationContext;
pub use draft::{Draft, DraftSet};
pub use error::{SchemaError, SchemaErrorKind};
pub use keywords::custom::CustomKeyword;
pub use options::{OutputFormat, ValidationOptions};
pub use output::{BasicOutput, Output, OutputUnit};
pub use paths::{Location, Segment};
pub use registry::{register_keyword, KeywordDescriptor, KeywordRegistry, Vocabulary};
pub use schema::{Schema, SchemaKey};
pub use store::SchemaStore;
pub use validator::Validator;
pub use value::{equal, Kind, KindSet};

use serde_json::Value;

/// Build a validator for `schema` with default options.
///
/// # Errors
///
/// [`SchemaError`] when the schema does not parse.
pub fn validator_for(schema: &Value) -> Result<Validator, SchemaError> {
    Validator::new(schema)
}

/// Default [`ValidationOptions`] to customize a validator build.
#[must_use]
pub fn options() -> ValidationOptions {
    Validator::options()
}

/// One-shot validity check with default options.
///
/// # Panics
///
/// Panics when the schema does not parse; build a [`Validator`] to handle
/// that case.
#[must_use]
pub fn is_valid(schema: &Value, instance: &Value) -> bool {
    validator_for(schema)
        .expect("Invalid schema")
        .is_valid(instance)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    #[test]
    fn boolean_schema_laws() {
        for instance in [json!(null), json!(0), json!("x"), json!([1]), json!({"a": 1})] {
            assert!(crate::is_valid(&json!(true), &instance));
            assert!(!crate::is_valid(&json!(false), &instance));
            // The empty schema accepts everything as well
            assert!(crate::is_valid(&json!({}), &instance));
        }
        let validator = crate::validator_for(&json!(false)).unwrap();
        let ctx = validator.evaluate(&json!(1));
        assert_eq!(
            ctx.message().unwrap(),
            "All values fail against the false schema"
        );
    }
}
