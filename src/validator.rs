//! The compiled validator: a parsed schema document, the schema store it
//! resolves references against, and the options it was built with.
use std::sync::Arc;

use serde_json::Value;
use url::Url;

use crate::{
    context::ValidationContext,
    evaluator::{Evaluator, Scope},
    options::ValidationOptions,
    output::Output,
    paths::{LazyLocation, Location},
    schema::Schema,
    store::SchemaStore,
    Draft, SchemaError,
};

/// A schema prepared for validation.
///
/// Validation never mutates the validator, so one instance can be shared
/// freely across threads.
#[derive(Debug)]
pub struct Validator {
    document: Arc<Schema>,
    base: Url,
    named: bool,
    store: SchemaStore,
    draft: Draft,
    config: Arc<ValidationOptions>,
}

impl Validator {
    /// Build a validator with default options.
    ///
    /// # Errors
    ///
    /// [`SchemaError`] when the schema does not parse.
    pub fn new(schema: &Value) -> Result<Validator, SchemaError> {
        Self::options().build(schema)
    }

    /// Default [`ValidationOptions`] to customize a build.
    #[must_use]
    pub fn options() -> ValidationOptions {
        ValidationOptions::default()
    }

    pub(crate) fn assemble(
        document: Arc<Schema>,
        base: Url,
        named: bool,
        store: SchemaStore,
        draft: Draft,
        config: ValidationOptions,
    ) -> Validator {
        Validator {
            document,
            base,
            named,
            store,
            draft,
            config: Arc::new(config),
        }
    }

    /// Whether the instance conforms to the schema.
    #[must_use]
    pub fn is_valid(&self, instance: &Value) -> bool {
        self.evaluate(instance).is_valid()
    }

    /// Evaluate the instance and return the full context tree.
    #[must_use]
    pub fn evaluate(&self, instance: &Value) -> ValidationContext {
        let mut evaluator = Evaluator::new(&self.config, &self.store, self.draft);
        let scope = Scope {
            doc: Arc::clone(&self.document),
            base: self.base.clone(),
            named: self.named,
            anchor_pointer: Location::new(),
            anchor_depth: 0,
        };
        let location = LazyLocation::new();
        evaluator.evaluate(
            &scope,
            self.document.root(),
            instance,
            &location,
            Location::new(),
        )
    }

    /// Apply the schema and defer rendering to the [`Output`] accessors.
    #[must_use]
    pub fn apply<'v, 'i>(&'v self, instance: &'i Value) -> Output<'v, 'i> {
        Output::new(self, instance)
    }

    /// The draft this validator evaluates as.
    #[must_use]
    pub fn draft(&self) -> Draft {
        self.draft
    }

    /// The options the validator was built with.
    #[must_use]
    pub fn config(&self) -> &ValidationOptions {
        &self.config
    }

    /// The parsed schema document.
    #[must_use]
    pub fn schema(&self) -> &Schema {
        &self.document
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    #[test]
    fn validators_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<super::Validator>();
    }

    #[test]
    fn evaluation_is_deterministic() {
        let validator = crate::validator_for(&json!({
            "type": "object",
            "properties": {"a": {"type": "number"}, "b": {"type": "string"}},
            "additionalProperties": false,
            "minProperties": 1
        }))
        .unwrap();
        let instance = json!({"a": "wrong", "b": 2, "c": 3});
        let first = serde_json::to_value(validator.apply(&instance).basic()).unwrap();
        for _ in 0..16 {
            let again = serde_json::to_value(validator.apply(&instance).basic()).unwrap();
            assert_eq!(first, again);
        }
    }

    #[test]
    fn shared_across_threads() {
        let validator = std::sync::Arc::new(
            crate::validator_for(&json!({"items": {"type": "integer"}})).unwrap(),
        );
        let handles: Vec<_> = (0..4)
            .map(|n| {
                let validator = std::sync::Arc::clone(&validator);
                std::thread::spawn(move || validator.is_valid(&json!([n])))
            })
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap());
        }
    }
}
