//! Caller-defined keywords.
//!
//! The built-in keyword set is a closed enum; custom vocabularies plug in
//! through one extension variant carrying the keyword's name, its raw
//! payload, and a caller-provided implementation. Register one via
//! [`KeywordDescriptor::custom`](crate::KeywordDescriptor::custom).
use std::{fmt, sync::Arc};

use serde_json::Value;

use crate::{annotations::Annotation, context::ValidationContext, evaluator::Frame};

/// A caller-provided keyword implementation.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use serde_json::{json, Value};
/// use jschema::{CustomKeyword, KeywordDescriptor};
///
/// struct EvenNumbers;
///
/// impl CustomKeyword for EvenNumbers {
///     fn validate(&self, instance: &Value) -> Result<(), String> {
///         match instance.as_u64() {
///             Some(n) if n % 2 != 0 => Err(format!("{n} is odd")),
///             _ => Ok(()),
///         }
///     }
/// }
///
/// let validator = jschema::options()
///     .with_keyword(KeywordDescriptor::custom("even", |payload| {
///         if payload == &json!(true) {
///             Ok(Arc::new(EvenNumbers) as Arc<dyn CustomKeyword>)
///         } else {
///             Err("expected true".to_string())
///         }
///     }))
///     .build(&json!({"even": true}))
///     .unwrap();
///
/// assert!(validator.is_valid(&json!(2)));
/// assert!(!validator.is_valid(&json!(3)));
/// ```
pub trait CustomKeyword: Send + Sync {
    /// Check the instance; the error string becomes the context message.
    fn validate(&self, instance: &Value) -> Result<(), String>;

    /// Optional annotation to publish on success.
    fn annotation(&self, instance: &Value) -> Option<Value> {
        let _ = instance;
        None
    }
}

/// The extension variant's payload.
pub(crate) struct Custom {
    name: Box<str>,
    raw: Value,
    implementation: Arc<dyn CustomKeyword>,
}

impl Custom {
    pub(crate) fn new(
        name: &str,
        raw: Value,
        implementation: Arc<dyn CustomKeyword>,
    ) -> Custom {
        Custom {
            name: name.into(),
            raw,
            implementation,
        }
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn raw(&self) -> &Value {
        &self.raw
    }
}

impl fmt::Debug for Custom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Custom")
            .field("name", &self.name)
            .field("raw", &self.raw)
            .finish_non_exhaustive()
    }
}

pub(crate) fn validate(custom: &Custom, frame: &Frame<'_>) -> Option<ValidationContext> {
    let keyword_location = frame.schema_location.join(custom.name.to_string());
    match custom.implementation.validate(frame.instance) {
        Ok(()) => {
            let mut ctx = frame.pass_at(keyword_location);
            if let Some(annotation) = custom.implementation.annotation(frame.instance) {
                ctx.annotate(custom.name.to_string(), Annotation::Json(annotation));
            }
            Some(ctx)
        }
        Err(message) => Some(frame.fail_at(keyword_location, message)),
    }
}

#[cfg(test)]
mod tests {
    use super::CustomKeyword;
    use crate::KeywordDescriptor;
    use serde_json::{json, Value};
    use std::sync::Arc;

    struct MaxDigits(u32);

    impl CustomKeyword for MaxDigits {
        fn validate(&self, instance: &Value) -> Result<(), String> {
            match instance {
                Value::Number(n) if n.to_string().len() as u32 > self.0 => {
                    Err(format!("{n} has more than {} digits", self.0))
                }
                _ => Ok(()),
            }
        }

        fn annotation(&self, _: &Value) -> Option<Value> {
            Some(json!({"limit": self.0}))
        }
    }

    fn digits_descriptor() -> KeywordDescriptor {
        KeywordDescriptor::custom("maxDigits", |payload| {
            payload
                .as_u64()
                .map(|limit| Arc::new(MaxDigits(limit as u32)) as Arc<dyn CustomKeyword>)
                .ok_or_else(|| "expected a number of digits".to_string())
        })
    }

    #[test]
    fn custom_keywords_validate_and_annotate() {
        let validator = crate::options()
            .with_keyword(digits_descriptor())
            .build(&json!({"maxDigits": 3}))
            .unwrap();
        assert!(validator.is_valid(&json!(999)));
        assert!(!validator.is_valid(&json!(1000)));

        let ctx = validator.evaluate(&json!(42));
        assert_eq!(
            ctx.annotations().get("maxDigits").unwrap().to_json(),
            json!({"limit": 3})
        );

        let ctx = validator.evaluate(&json!(1000));
        let failure = ctx.walk().find(|node| node.message().is_some()).unwrap();
        assert_eq!(failure.message().unwrap(), "1000 has more than 3 digits");
        assert_eq!(failure.schema_location().to_string(), "/maxDigits");
    }

    #[test]
    fn factory_rejection_is_a_parse_error() {
        let error = crate::options()
            .with_keyword(digits_descriptor())
            .build(&json!({"maxDigits": "three"}))
            .unwrap_err();
        assert_eq!(
            error.to_string(),
            "invalid value for \"maxDigits\": expected a number of digits"
        );
    }

    #[test]
    fn unregistered_members_stay_inert() {
        let validator = crate::validator_for(&json!({"maxDigits": 1})).unwrap();
        assert!(validator.is_valid(&json!(1000)));
    }
}
