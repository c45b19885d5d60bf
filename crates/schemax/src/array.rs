//! Sequence validator wrapping one element validator.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

use crate::coerce::split_list;
use crate::constants::{array_exact_length, array_max_length, array_min_length, Check};
use crate::number::DoubleValidator;
use crate::object::ObjectValidator;
use crate::result::ParseResult;
use crate::string::StringValidator;
use crate::validator::{BaseConfig, Validator};
use crate::value::Value;

/// Derives the comparison key used by [`ArrayValidator::unique_by`].
pub type KeyFn<T> = Arc<dyn Fn(&T) -> Value + Send + Sync>;

enum Uniqueness<T> {
    Off,
    Equal,
    By(KeyFn<T>),
}

impl<T> Clone for Uniqueness<T> {
    fn clone(&self) -> Self {
        match self {
            Uniqueness::Off => Uniqueness::Off,
            Uniqueness::Equal => Uniqueness::Equal,
            Uniqueness::By(key) => Uniqueness::By(Arc::clone(key)),
        }
    }
}

/// Validates a sequence element by element.
///
/// Size checks run first and short-circuit. Every element is then parsed
/// independently; failures are reported per index after one header message.
/// Uniqueness is checked on the elements that parsed successfully.
#[derive(Clone)]
pub struct ArrayValidator<V: Validator> {
    element: V,
    base: BaseConfig<Vec<V::Output>>,
    min_length: Option<usize>,
    max_length: Option<usize>,
    min_length_error: Option<String>,
    max_length_error: Option<String>,
    parse_error: String,
    element_error: String,
    unique: Uniqueness<V::Output>,
    unique_error: String,
}

impl<V: Validator + fmt::Debug> fmt::Debug for ArrayValidator<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unique = match self.unique {
            Uniqueness::Off => "off",
            Uniqueness::Equal => "equal",
            Uniqueness::By(_) => "by key",
        };
        f.debug_struct("ArrayValidator")
            .field("element", &self.element)
            .field("base", &self.base)
            .field("min_length", &self.min_length)
            .field("max_length", &self.max_length)
            .field("unique", &unique)
            .finish_non_exhaustive()
    }
}

impl<V: Validator> ArrayValidator<V> {
    pub fn new(element: V) -> Self {
        Self {
            element,
            base: BaseConfig::new(),
            min_length: None,
            max_length: None,
            min_length_error: None,
            max_length_error: None,
            parse_error: Check::ArrParse.message().to_string(),
            element_error: Check::ArrElement.message().to_string(),
            unique: Uniqueness::Off,
            unique_error: Check::ArrUnique.message().to_string(),
        }
    }

    pub fn of(element: V) -> Self {
        Self::new(element)
    }

    pub fn element(&self) -> &V {
        &self.element
    }

    pub fn coerce(self) -> Self {
        self.with_coerce(true)
    }

    pub fn with_coerce(mut self, coerce: bool) -> Self {
        self.base.coerce = coerce;
        self
    }

    /// A null input then yields an empty sequence.
    pub fn optional(self) -> Self {
        self.with_optional(true)
    }

    pub fn with_optional(mut self, optional: bool) -> Self {
        self.base.optional = optional;
        self
    }

    pub fn default_value(mut self, value: Vec<V::Output>) -> Self {
        self.base.default = Some(value);
        self
    }

    pub fn bind(mut self, value: impl Into<Value>) -> Self {
        self.base.bound = Some(value.into());
        self
    }

    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    pub fn length(mut self, exact: usize) -> Self {
        self.min_length = Some(exact);
        self.max_length = Some(exact);
        self.min_length_error = Some(array_exact_length(exact));
        self.max_length_error = Some(array_exact_length(exact));
        self
    }

    pub fn non_empty(self) -> Self {
        self.non_empty_with(Check::ArrNonEmpty.message())
    }

    pub fn non_empty_with(mut self, message: impl Into<String>) -> Self {
        self.min_length = Some(1);
        self.min_length_error = Some(message.into());
        self
    }

    /// Rejects sequences holding two equal parsed elements.
    ///
    /// Elements are compared pairwise with `PartialEq`, so this check is
    /// quadratic in the element count, unlike the rest of the validation.
    /// [`unique_by`](Self::unique_by) compares its keys the same way.
    pub fn unique(mut self) -> Self {
        self.unique = Uniqueness::Equal;
        self
    }

    pub fn unique_with(self, message: impl Into<String>) -> Self {
        self.unique().unique_error(message)
    }

    /// Rejects sequences holding two parsed elements with equal keys.
    pub fn unique_by<F>(mut self, key: F) -> Self
    where
        F: Fn(&V::Output) -> Value + Send + Sync + 'static,
    {
        self.unique = Uniqueness::By(Arc::new(key));
        self
    }

    pub fn unique_by_with<F>(self, key: F, message: impl Into<String>) -> Self
    where
        F: Fn(&V::Output) -> Value + Send + Sync + 'static,
    {
        self.unique_by(key).unique_error(message)
    }

    pub fn min_length_error(mut self, message: impl Into<String>) -> Self {
        self.min_length_error = Some(message.into());
        self
    }

    pub fn max_length_error(mut self, message: impl Into<String>) -> Self {
        self.max_length_error = Some(message.into());
        self
    }

    pub fn parse_error(mut self, message: impl Into<String>) -> Self {
        self.parse_error = message.into();
        self
    }

    /// Header message preceding the per-index element failures.
    pub fn element_error(mut self, message: impl Into<String>) -> Self {
        self.element_error = message.into();
        self
    }

    pub fn unique_error(mut self, message: impl Into<String>) -> Self {
        self.unique_error = message.into();
        self
    }

    // ------------------------------------------------------------------

    fn normalize<'a>(&self, input: &'a Value) -> Option<Cow<'a, [Value]>> {
        match input {
            Value::List(items) => Some(Cow::Borrowed(items.as_slice())),
            Value::Array(items) if self.base.coerce => Some(Cow::Owned(items.to_vec())),
            Value::Str(text) if self.base.coerce => Some(Cow::Owned(split_list(text))),
            _ => None,
        }
    }

    fn check_size(&self, len: usize) -> Vec<String> {
        let mut errors = Vec::new();
        if let Some(min) = self.min_length.filter(|&min| len < min) {
            errors.push(
                self.min_length_error
                    .clone()
                    .unwrap_or_else(|| array_min_length(min)),
            );
        }
        if let Some(max) = self.max_length.filter(|&max| len > max) {
            errors.push(
                self.max_length_error
                    .clone()
                    .unwrap_or_else(|| array_max_length(max)),
            );
        }
        errors
    }

    fn has_duplicate(&self, parsed: &[V::Output]) -> bool {
        match &self.unique {
            Uniqueness::Off => false,
            Uniqueness::Equal => parsed
                .iter()
                .enumerate()
                .any(|(i, item)| parsed[..i].contains(item)),
            Uniqueness::By(key) => {
                let mut seen: Vec<Value> = Vec::with_capacity(parsed.len());
                for item in parsed {
                    let k = key(item);
                    if seen.contains(&k) {
                        return true;
                    }
                    seen.push(k);
                }
                false
            }
        }
    }
}

impl ArrayValidator<StringValidator> {
    pub fn strings() -> Self {
        Self::new(StringValidator::new())
    }
}

impl ArrayValidator<DoubleValidator> {
    pub fn numbers() -> Self {
        Self::new(DoubleValidator::new())
    }
}

impl ArrayValidator<ObjectValidator> {
    pub fn objects() -> Self {
        Self::new(ObjectValidator::new())
    }
}

impl<V: Validator> Validator for ArrayValidator<V> {
    type Output = Vec<V::Output>;

    fn parse(&self, input: &Value) -> ParseResult<Vec<V::Output>> {
        if input.is_null() {
            if let Some(default) = &self.base.default {
                return ParseResult::success(default.clone());
            }
            if self.base.optional {
                return ParseResult::success(Vec::new());
            }
            return ParseResult::fail(&self.parse_error);
        }
        let Some(items) = self.normalize(input) else {
            return ParseResult::fail(&self.parse_error);
        };

        let size_errors = self.check_size(items.len());
        if !size_errors.is_empty() {
            return ParseResult::failure(size_errors);
        }

        let mut parsed = Vec::with_capacity(items.len());
        let mut element_errors = Vec::new();
        for (index, item) in items.iter().enumerate() {
            match self.element.parse(item) {
                ParseResult::Success(Some(value)) => parsed.push(value),
                ParseResult::Success(None) => {}
                ParseResult::Failure(errors) => element_errors.push(format!(
                    "Element at index {index}: {}",
                    errors.messages().join(", ")
                )),
            }
        }

        let mut errors = Vec::new();
        if self.has_duplicate(&parsed) {
            errors.push(self.unique_error.clone());
        }
        if !element_errors.is_empty() {
            debug!(
                failed = element_errors.len(),
                total = items.len(),
                "array elements failed validation"
            );
            errors.push(self.element_error.clone());
            errors.extend(element_errors);
        }

        if errors.is_empty() {
            ParseResult::success(parsed)
        } else {
            ParseResult::failure(errors)
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
    use serde_json::json;

    fn strs(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn size_bounds() {
        let v = ArrayValidator::strings().min_length(2).max_length(4);
        assert_eq!(
            v.parse(&Value::from(json!(["a", "b"]))),
            ParseResult::success(strs(&["a", "b"]))
        );
        assert_eq!(
            v.parse(&Value::from(json!(["a"]))).errors(),
            ["Array must have at least 2 elements"]
        );
        assert_eq!(
            v.parse(&Value::from(json!(["a", "b", "c", "d", "e"]))).errors(),
            ["Array must have at most 4 elements"]
        );
    }

    #[test]
    fn size_failure_skips_elements() {
        let v = ArrayValidator::new(IntValidator::new()).min_length(3);
        let r = v.parse(&Value::from(json!(["x"])));
        assert_eq!(r.errors(), ["Array must have at least 3 elements"]);
    }

    #[test]
    fn exact_and_non_empty_messages() {
        let v = ArrayValidator::strings().length(2);
        assert_eq!(
            v.parse(&Value::from(json!([]))).errors(),
            ["Array must have exactly 2 elements"]
        );
        let n = ArrayValidator::strings().non_empty();
        assert_eq!(
            n.parse(&Value::from(json!([]))).errors(),
            [Check::ArrNonEmpty.message()]
        );
    }

    #[test]
    fn element_failures_are_indexed_after_header() {
        let v = ArrayValidator::new(IntValidator::new());
        let r = v.parse(&Value::from(json!([1, "two", 3, 4.5])));
        assert_eq!(
            r.errors(),
            [
                Check::ArrElement.message().to_string(),
                format!("Element at index 1: {}", Check::NumParse.message()),
                format!("Element at index 3: {}", Check::NumType.message()),
            ]
        );
    }

    #[test]
    fn multiple_child_errors_are_comma_joined() {
        let v = ArrayValidator::new(StringValidator::new().min_length(5).email());
        let r = v.parse(&Value::from(json!(["ab"])));
        assert_eq!(
            r.errors()[1],
            format!(
                "Element at index 0: {}, {}",
                Check::StrMinLen.message(),
                Check::Email.message()
            )
        );
    }

    #[test]
    fn uniqueness() {
        let v = ArrayValidator::strings().unique();
        assert!(v.parse(&Value::from(json!(["a", "b"]))).is_success());
        assert_eq!(
            v.parse(&Value::from(json!(["a", "b", "a", "b"]))).errors(),
            [Check::ArrUnique.message()]
        );
    }

    #[test]
    fn uniqueness_by_key() {
        let v = ArrayValidator::strings()
            .unique_by_with(|s: &String| Value::from(s.to_lowercase()), "case-insensitive duplicate");
        assert_eq!(
            v.parse(&Value::from(json!(["Ann", "ANN"]))).errors(),
            ["case-insensitive duplicate"]
        );
    }

    #[test]
    fn uniqueness_precedes_element_errors() {
        let v = ArrayValidator::new(IntValidator::new()).unique();
        let r = v.parse(&Value::from(json!([1, 1, "x"])));
        assert_eq!(r.errors()[0], Check::ArrUnique.message());
        assert_eq!(r.errors()[1], Check::ArrElement.message());
        assert_eq!(r.errors().len(), 3);
    }

    #[test]
    fn coercion_of_text_and_fixed_arrays() {
        let v = ArrayValidator::strings().coerce();
        assert_eq!(
            v.parse(&Value::from("[\"a\", b]")),
            ParseResult::success(strs(&["a", "b"]))
        );
        assert_eq!(
            v.parse(&Value::from("x, y")),
            ParseResult::success(strs(&["x", "y"]))
        );
        assert_eq!(v.parse(&Value::from("[]")), ParseResult::success(vec![]));
        assert_eq!(
            v.parse(&Value::array(["p", "q"])),
            ParseResult::success(strs(&["p", "q"]))
        );
    }

    #[test]
    fn text_and_fixed_arrays_need_coercion() {
        let v = ArrayValidator::strings();
        assert_eq!(
            v.parse(&Value::from("a,b")),
            ParseResult::fail(Check::ArrParse.message())
        );
        assert!(v.parse(&Value::array(["a"])).is_failure());
    }

    #[test]
    fn coerced_text_feeds_element_coercion() {
        let v = ArrayValidator::new(IntValidator::new().coerce()).coerce();
        assert_eq!(v.parse(&Value::from("[1, 2, 3]")), ParseResult::success(vec![1, 2, 3]));
    }

    #[test]
    fn null_handling() {
        let v = ArrayValidator::strings();
        assert_eq!(
            v.parse(&Value::Null),
            ParseResult::fail(Check::ArrParse.message())
        );
        assert_eq!(
            ArrayValidator::strings().optional().parse(&Value::Null),
            ParseResult::success(vec![])
        );
        let d = ArrayValidator::strings()
            .optional()
            .non_empty()
            .default_value(strs(&["z"]));
        assert_eq!(d.parse(&Value::Null), ParseResult::success(strs(&["z"])));
    }

    #[test]
    fn absent_elements_are_dropped() {
        let v = ArrayValidator::new(StringValidator::new().optional());
        assert_eq!(
            v.parse(&Value::from(json!(["a", null, "b"]))),
            ParseResult::success(strs(&["a", "b"]))
        );
    }
}
