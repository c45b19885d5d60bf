//! Object validator: named child validators over a string-keyed map.

mod snapshot;

pub use snapshot::ObjectSnapshot;

use indexmap::IndexMap;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

use crate::coerce::{parse_brace_map, parse_key_values, FieldsConverter, StructuralConverter};
use crate::constants::Check;
use crate::result::ParseResult;
use crate::validator::{BaseConfig, DynValidator, Validator};
use crate::value::{Value, ValueMap};

type Children = IndexMap<String, Arc<dyn DynValidator>>;

/// What happens when a partial field fails to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PartialPolicy {
    /// The field is left out and no error is reported.
    #[default]
    Drop,
    /// The failure is reported when the input held a non-null value.
    ReportPresent,
}

/// Validates a map field by field.
///
/// Required fields parse their entry, or null when it is missing. Partial
/// fields parse the same way but their failures follow [`PartialPolicy`].
/// A failing field reports only its first message. The input is rejected
/// when any field failed or, in strict mode, when it holds an undeclared key.
#[derive(Clone)]
pub struct ObjectValidator {
    base: BaseConfig<ObjectSnapshot>,
    fields: Children,
    partials: Children,
    strict: bool,
    allow_unknown: bool,
    partial_policy: PartialPolicy,
    converter: Arc<dyn StructuralConverter>,
    parse_error: String,
    null_error: String,
    unknown_key_error: String,
    invalid_field_error: String,
}

impl fmt::Debug for ObjectValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectValidator")
            .field("fields", &self.fields.keys().collect::<Vec<_>>())
            .field("partials", &self.partials.keys().collect::<Vec<_>>())
            .field("strict", &self.strict)
            .field("allow_unknown", &self.allow_unknown)
            .field("partial_policy", &self.partial_policy)
            .field("base", &self.base)
            .finish_non_exhaustive()
    }
}

impl Default for ObjectValidator {
    fn default() -> Self {
        Self {
            base: BaseConfig::new(),
            fields: Children::new(),
            partials: Children::new(),
            strict: false,
            allow_unknown: false,
            partial_policy: PartialPolicy::default(),
            converter: Arc::new(FieldsConverter),
            parse_error: Check::ObjParse.message().to_string(),
            null_error: Check::ObjNull.message().to_string(),
            unknown_key_error: Check::ObjUnknownKey.message().to_string(),
            invalid_field_error: Check::ObjInvalidField.message().to_string(),
        }
    }
}

impl ObjectValidator {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Fields ────────────────────────────────────────────────────────────

    /// Registers a required field. A name already registered as partial
    /// becomes required.
    pub fn field<V>(self, name: impl Into<String>, validator: V) -> Self
    where
        V: Validator + 'static,
    {
        self.insert_field(name.into(), Arc::new(validator))
    }

    /// Registers a partial field. A name already registered as required
    /// becomes partial.
    pub fn partial<V>(self, name: impl Into<String>, validator: V) -> Self
    where
        V: Validator + 'static,
    {
        self.insert_partial(name.into(), Arc::new(validator))
    }

    fn insert_field(mut self, name: String, validator: Arc<dyn DynValidator>) -> Self {
        self.partials.shift_remove(&name);
        self.fields.insert(name, validator);
        self
    }

    fn insert_partial(mut self, name: String, validator: Arc<dyn DynValidator>) -> Self {
        self.fields.shift_remove(&name);
        self.partials.insert(name, validator);
        self
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name) || self.partials.contains_key(name)
    }

    /// Required field names in registration order.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.keys().map(String::as_str).collect()
    }

    pub fn partial_names(&self) -> Vec<&str> {
        self.partials.keys().map(String::as_str).collect()
    }

    /// Combines two validators. Fields of `other` override fields of the
    /// same name. Strict mode is on when either side has it; unknown keys
    /// are allowed only when both sides allow them. Everything else is kept
    /// from `self`.
    pub fn merge(mut self, other: ObjectValidator) -> Self {
        self.strict = self.strict || other.strict;
        self.allow_unknown = self.allow_unknown && other.allow_unknown;
        for (name, validator) in other.fields {
            self = self.insert_field(name, validator);
        }
        for (name, validator) in other.partials {
            self = self.insert_partial(name, validator);
        }
        self
    }

    // ── Settings ──────────────────────────────────────────────────────────

    pub fn coerce(self) -> Self {
        self.with_coerce(true)
    }

    pub fn with_coerce(mut self, coerce: bool) -> Self {
        self.base.coerce = coerce;
        self
    }

    /// A null input then yields an empty snapshot.
    pub fn optional(self) -> Self {
        self.with_optional(true)
    }

    pub fn with_optional(mut self, optional: bool) -> Self {
        self.base.optional = optional;
        self
    }

    pub fn default_value(mut self, value: impl Into<ObjectSnapshot>) -> Self {
        self.base.default = Some(value.into());
        self
    }

    pub fn bind(mut self, value: impl Into<Value>) -> Self {
        self.base.bound = Some(value.into());
        self
    }

    /// Rejects keys that are neither required nor partial fields.
    pub fn strict(self) -> Self {
        self.with_strict(true)
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Overrides strict mode's unknown-key check.
    pub fn allow_unknown(self) -> Self {
        self.with_allow_unknown(true)
    }

    pub fn with_allow_unknown(mut self, allow: bool) -> Self {
        self.allow_unknown = allow;
        self
    }

    pub fn partial_policy(mut self, policy: PartialPolicy) -> Self {
        self.partial_policy = policy;
        self
    }

    /// Replaces the converter used for structured input under coercion.
    pub fn converter<C>(mut self, converter: C) -> Self
    where
        C: StructuralConverter + 'static,
    {
        self.converter = Arc::new(converter);
        self
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    pub fn allows_unknown(&self) -> bool {
        self.allow_unknown
    }

    // ── Messages ──────────────────────────────────────────────────────────

    pub fn parse_error(mut self, message: impl Into<String>) -> Self {
        self.parse_error = message.into();
        self
    }

    pub fn null_error(mut self, message: impl Into<String>) -> Self {
        self.null_error = message.into();
        self
    }

    pub fn unknown_key_error(mut self, message: impl Into<String>) -> Self {
        self.unknown_key_error = message.into();
        self
    }

    /// Used for a failing field whose validator gave no message.
    pub fn invalid_field_error(mut self, message: impl Into<String>) -> Self {
        self.invalid_field_error = message.into();
        self
    }

    // ── Parsing ───────────────────────────────────────────────────────────

    fn normalize<'a>(&self, input: &'a Value) -> Option<Cow<'a, ValueMap>> {
        match input {
            Value::Map(map) => Some(Cow::Borrowed(map)),
            _ if !self.base.coerce => None,
            Value::Str(text) => {
                let trimmed = text.trim();
                if trimmed.starts_with('{') && trimmed.ends_with('}') {
                    Some(Cow::Owned(parse_brace_map(trimmed)))
                } else {
                    parse_key_values(trimmed).map(Cow::Owned)
                }
            }
            Value::Null
            | Value::Bool(_)
            | Value::Char(_)
            | Value::Int(_)
            | Value::BigInt(_)
            | Value::Float(_)
            | Value::Decimal(_) => None,
            _ => self.converter.to_map(input).map(Cow::Owned),
        }
    }

    fn validate_map(&self, map: &ValueMap) -> ParseResult<ObjectSnapshot> {
        let mut values = ValueMap::new();
        let mut errors: IndexMap<String, String> = IndexMap::new();
        let null = Value::Null;

        for (name, child) in &self.fields {
            let raw = map.get(name).unwrap_or(&null);
            match child.parse_value(raw) {
                ParseResult::Success(Some(value)) => {
                    values.insert(name.clone(), value);
                }
                ParseResult::Success(None) => {}
                ParseResult::Failure(failure) => {
                    let message = failure
                        .first_message()
                        .unwrap_or_else(|| self.invalid_field_error.clone());
                    errors.insert(name.clone(), message);
                }
            }
        }

        for (name, child) in &self.partials {
            let raw = map.get(name);
            match child.parse_value(raw.unwrap_or(&null)) {
                ParseResult::Success(Some(value)) => {
                    values.insert(name.clone(), value);
                }
                ParseResult::Success(None) => {}
                ParseResult::Failure(failure) => {
                    let present = raw.is_some_and(|v| !v.is_null());
                    if self.partial_policy == PartialPolicy::ReportPresent && present {
                        let message = failure
                            .first_message()
                            .unwrap_or_else(|| self.invalid_field_error.clone());
                        errors.insert(name.clone(), message);
                    }
                }
            }
        }

        if self.strict && !self.allow_unknown {
            for key in map.keys() {
                if !self.has_field(key) {
                    errors.insert(key.clone(), self.unknown_key_error.clone());
                }
            }
        }

        if errors.is_empty() {
            ParseResult::success(ObjectSnapshot::new(values))
        } else {
            debug!(
                failed = errors.len(),
                fields = ?errors.keys().collect::<Vec<_>>(),
                "object fields failed validation"
            );
            ParseResult::field_failure(errors)
        }
    }
}

impl Validator for ObjectValidator {
    type Output = ObjectSnapshot;

    fn parse(&self, input: &Value) -> ParseResult<ObjectSnapshot> {
        if input.is_null() {
            if let Some(default) = &self.base.default {
                return ParseResult::success(default.clone());
            }
            if self.base.optional {
                return ParseResult::success(ObjectSnapshot::default());
            }
            return ParseResult::fail(&self.null_error);
        }
        match self.normalize(input) {
            Some(map) => self.validate_map(&map),
            None => ParseResult::fail(&self.parse_error),
        }
    }

    fn bound(&self) -> Option<&Value> {
        self.base.bound.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::number::IntValidator;
    use crate::string::StringValidator;
    use serde::Serialize;
    use serde_json::json;

    fn person() -> ObjectValidator {
        ObjectValidator::new()
            .field("name", StringValidator::new().non_empty())
            .field("age", IntValidator::new().min(0))
    }

    fn map(value: serde_json::Value) -> Value {
        Value::from(value)
    }

    #[test]
    fn required_fields() {
        let r = person().parse(&map(json!({"name": "Ann", "age": 30})));
        let snap = r.value().unwrap();
        assert_eq!(snap.get_str("name"), Some("Ann"));
        assert_eq!(snap.get_i32("age"), Some(30));
    }

    #[test]
    fn missing_required_field_reports_child_parse_error() {
        let r = person().parse(&map(json!({"name": "Ann"})));
        let errors = r.field_errors().unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors["age"], Check::NumParse.message());
    }

    #[test]
    fn only_first_child_message_is_kept() {
        let v = ObjectValidator::new().field("email", StringValidator::new().min_length(50).email());
        let r = v.parse(&map(json!({"email": "x"})));
        assert_eq!(r.field_errors().unwrap()["email"], Check::StrMinLen.message());
    }

    #[test]
    fn strict_rejects_unknown_keys() {
        let v = ObjectValidator::new()
            .field("name", StringValidator::new().non_empty())
            .strict();
        let r = v.parse(&map(json!({"name": "Ann", "extra": 1})));
        let errors = r.field_errors().unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors["extra"], Check::ObjUnknownKey.message());
        assert!(v.parse(&map(json!({"name": "Ann"}))).is_success());
        assert!(v.clone().allow_unknown().parse(&map(json!({"name": "A", "x": 1}))).is_success());
    }

    #[test]
    fn unknown_keys_are_dropped_when_not_strict() {
        let r = person().parse(&map(json!({"name": "A", "age": 1, "x": 2})));
        assert!(!r.value().unwrap().contains("x"));
    }

    #[test]
    fn partial_failures_follow_policy() {
        let v = ObjectValidator::new().partial("age", IntValidator::new());
        let bad = map(json!({"age": "old"}));
        let r = v.parse(&bad);
        assert!(r.value().unwrap().is_empty());

        let reporting = v.partial_policy(PartialPolicy::ReportPresent);
        assert_eq!(
            reporting.parse(&bad).field_errors().unwrap()["age"],
            Check::NumParse.message()
        );
        assert!(reporting.parse(&map(json!({}))).is_success());
        assert!(reporting.parse(&map(json!({"age": null}))).is_success());
    }

    #[test]
    fn registration_moves_between_groups() {
        let v = ObjectValidator::new()
            .field("a", StringValidator::new())
            .partial("a", StringValidator::new())
            .field("b", StringValidator::new());
        assert_eq!(v.field_names(), ["b"]);
        assert_eq!(v.partial_names(), ["a"]);
        assert!(v.has_field("a"));
        assert!(!v.has_field("c"));
    }

    #[test]
    fn null_input() {
        assert_eq!(
            person().parse(&Value::Null),
            ParseResult::fail(Check::ObjNull.message())
        );
        assert_eq!(
            person().optional().parse(&Value::Null),
            ParseResult::success(ObjectSnapshot::default())
        );
        let mut fallback = ValueMap::new();
        fallback.insert("name".into(), Value::from("guest"));
        assert_eq!(
            person().default_value(fallback.clone()).parse(&Value::Null),
            ParseResult::success(ObjectSnapshot::new(fallback))
        );
    }

    #[test]
    fn non_map_input_needs_coercion() {
        assert_eq!(
            person().parse(&Value::from("name=Ann")),
            ParseResult::fail(Check::ObjParse.message())
        );
    }

    #[test]
    fn coerces_text() {
        let v = ObjectValidator::new()
            .field("name", StringValidator::new())
            .field("age", IntValidator::new().coerce())
            .coerce();
        let braces = v.parse(&Value::from(r#"{"name": "Ann", "age": "30"}"#));
        assert_eq!(braces.value().unwrap().get_i32("age"), Some(30));
        let pairs = v.parse(&Value::from("name=Bob&age=41"));
        assert_eq!(pairs.value().unwrap().get_str("name"), Some("Bob"));
        assert_eq!(
            v.parse(&Value::from("no pairs here")),
            ParseResult::fail(Check::ObjParse.message())
        );
        assert!(v.parse(&Value::Int(3)).is_failure());
    }

    #[derive(Debug, Serialize)]
    struct Account {
        name: String,
        age: u8,
    }

    #[test]
    fn coerces_structured_values() {
        let v = person().coerce();
        let r = v.parse(&Value::from_serialize(Account {
            name: "Cy".into(),
            age: 7,
        }));
        assert_eq!(r.value().unwrap().get_i64("age"), Some(7));
        assert!(person().parse(&Value::from_serialize(Account {
            name: "Cy".into(),
            age: 7,
        }))
        .is_failure());
    }

    #[test]
    fn custom_converter() {
        let v = ObjectValidator::new()
            .field("items", IntValidator::new())
            .coerce()
            .converter(|value: &Value| {
                value.as_list().map(|items| {
                    let mut m = ValueMap::new();
                    m.insert("items".into(), Value::Int(items.len() as i64));
                    m
                })
            });
        let r = v.parse(&map(json!([1, 2, 3])));
        assert_eq!(r.value().unwrap().get_i32("items"), Some(3));
    }

    #[test]
    fn merge_combines_fields_and_flags() {
        let a = ObjectValidator::new()
            .field("name", StringValidator::new())
            .partial("nick", StringValidator::new())
            .allow_unknown();
        let b = ObjectValidator::new()
            .field("nick", StringValidator::new())
            .field("age", IntValidator::new())
            .strict();
        let merged = a.merge(b);
        assert!(merged.is_strict());
        assert!(!merged.allows_unknown());
        assert_eq!(merged.field_names(), ["name", "nick", "age"]);
        assert!(merged.partial_names().is_empty());
    }

    #[test]
    fn nested_objects() {
        let v = ObjectValidator::new().field("owner", person());
        let r = v.parse(&map(json!({"owner": {"name": "", "age": 1}})));
        assert_eq!(
            r.field_errors().unwrap()["owner"],
            format!("name: {}", Check::StrNonEmpty.message())
        );
    }
}
