use crate::constants::Check;
use crate::result::ParseResult;
use crate::validator::{BaseConfig, Validator};
use crate::value::Value;

/// Coercion table for booleans. Text matching is case-sensitive; numbers are
/// true when nonzero.
fn coerce_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Str(s) => match s.as_str() {
            "true" | "1" | "yes" | "on" | "y" => Some(true),
            "false" | "0" | "no" | "off" | "n" => Some(false),
            _ => None,
        },
        Value::Int(i) => Some(*i != 0),
        Value::BigInt(i) => Some(*i != 0),
        Value::Float(f) => Some(*f != 0.0),
        Value::Decimal(d) => Some(!d.is_zero()),
        _ => None,
    }
}

/// Validates booleans, optionally requiring one specific value.
#[derive(Debug, Clone)]
pub struct BooleanValidator {
    base: BaseConfig<bool>,
    expected: Option<bool>,
    parse_error: String,
    true_error: String,
    false_error: String,
}

impl Default for BooleanValidator {
    fn default() -> Self {
        Self {
            base: BaseConfig::new(),
            expected: None,
            parse_error: Check::BoolParse.message().to_string(),
            true_error: Check::BoolTrue.message().to_string(),
            false_error: Check::BoolFalse.message().to_string(),
        }
    }
}

impl BooleanValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn coerce(self) -> Self {
        self.with_coerce(true)
    }

    pub fn with_coerce(mut self, coerce: bool) -> Self {
        self.base.coerce = coerce;
        self
    }

    pub fn optional(self) -> Self {
        self.with_optional(true)
    }

    pub fn with_optional(mut self, optional: bool) -> Self {
        self.base.optional = optional;
        self
    }

    pub fn default_value(mut self, value: bool) -> Self {
        self.base.default = Some(value);
        self
    }

    pub fn bind(mut self, value: impl Into<Value>) -> Self {
        self.base.bound = Some(value.into());
        self
    }

    /// Accepts only `true`.
    pub fn is_true(mut self) -> Self {
        self.expected = Some(true);
        self
    }

    pub fn is_true_with(self, message: impl Into<String>) -> Self {
        let mut v = self.is_true();
        v.true_error = message.into();
        v
    }

    /// Accepts only `false`.
    pub fn is_false(mut self) -> Self {
        self.expected = Some(false);
        self
    }

    pub fn is_false_with(self, message: impl Into<String>) -> Self {
        let mut v = self.is_false();
        v.false_error = message.into();
        v
    }

    pub fn parse_error(mut self, message: impl Into<String>) -> Self {
        self.parse_error = message.into();
        self
    }
}

impl Validator for BooleanValidator {
    type Output = bool;

    fn parse(&self, input: &Value) -> ParseResult<bool> {
        if input.is_null() {
            return self
                .base
                .resolve_null(|default| ParseResult::success(*default), &self.parse_error);
        }
        let resolved = if self.base.coerce {
            coerce_bool(input)
        } else {
            input.as_bool()
        };
        let Some(value) = resolved else {
            return ParseResult::fail(&self.parse_error);
        };
        match self.expected {
            Some(true) if !value => ParseResult::fail(&self.true_error),
            Some(false) if value => ParseResult::fail(&self.false_error),
            _ => ParseResult::success(value),
        }
    }

    fn bound(&self) -> Option<&Value> {
        self.base.bound.as_ref()
    }
}
