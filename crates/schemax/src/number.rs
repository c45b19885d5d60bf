//! Numeric validator, generic over the output representation.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use std::fmt;

use crate::constants::Check;
use crate::result::ParseResult;
use crate::validator::{BaseConfig, Validator};
use crate::value::Value;

/// Output representation of a number validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberKind {
    Int,
    Long,
    Float,
    Double,
    BigInt,
    Decimal,
}

impl NumberKind {
    /// Integer kinds reject fractional input.
    pub fn is_integer(self) -> bool {
        matches!(self, Self::Int | Self::Long | Self::BigInt)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::BigInt => "bigint",
            Self::Decimal => "decimal",
        }
    }
}

impl fmt::Display for NumberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A numeric input after type resolution, before output conversion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    BigInt(i128),
    Float(f64),
    Decimal(Decimal),
}

impl Number {
    /// Resolves `value` into a number. With `coerce`, numeric text and
    /// booleans are accepted too. NaN and infinities are not numbers here,
    /// whether native or spelled out as text.
    pub fn from_value(value: &Value, coerce: bool) -> Option<Number> {
        match value {
            Value::Int(i) => Some(Number::Int(*i)),
            Value::BigInt(i) => Some(Number::BigInt(*i)),
            Value::Float(f) if f.is_finite() => Some(Number::Float(*f)),
            Value::Decimal(d) => Some(Number::Decimal(*d)),
            Value::Str(s) if coerce => s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|f| f.is_finite())
                .map(Number::Float),
            Value::Bool(b) if coerce => Some(Number::Int(i64::from(*b))),
            _ => None,
        }
    }

    /// Comparison form used by the bound checks.
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(i) => i as f64,
            Number::BigInt(i) => i as f64,
            Number::Float(f) => f,
            Number::Decimal(d) => d.to_f64().unwrap_or(f64::NAN),
        }
    }

    /// True when the number has no fractional part. Non-finite floats are
    /// never integral.
    pub fn is_integral(self) -> bool {
        match self {
            Number::Int(_) | Number::BigInt(_) => true,
            Number::Float(f) => f.is_finite() && f.fract() == 0.0,
            Number::Decimal(d) => d.fract().is_zero(),
        }
    }

    fn to_i128(self) -> Option<i128> {
        match self {
            Number::Int(i) => Some(i128::from(i)),
            Number::BigInt(i) => Some(i),
            Number::Float(f) => {
                if f.is_finite() && f >= i128::MIN as f64 && f < i128::MAX as f64 {
                    Some(f as i128)
                } else {
                    None
                }
            }
            Number::Decimal(d) => d.to_i128(),
        }
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::Int(value)
    }
}

impl From<i128> for Number {
    fn from(value: i128) -> Self {
        Number::BigInt(value)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Float(value)
    }
}

impl From<Decimal> for Number {
    fn from(value: Decimal) -> Self {
        Number::Decimal(value)
    }
}

/// A numeric output type.
///
/// `from_number` returns `None` when the target cannot represent the value
/// at all (overflow, or a non-finite float into a decimal).
pub trait Numeric: Copy + fmt::Debug + PartialEq + Into<Value> + Send + Sync + 'static {
    const KIND: NumberKind;

    fn from_number(number: Number) -> Option<Self>;
}

impl Numeric for i32 {
    const KIND: NumberKind = NumberKind::Int;

    fn from_number(number: Number) -> Option<Self> {
        number.to_i128().and_then(|i| i32::try_from(i).ok())
    }
}

impl Numeric for i64 {
    const KIND: NumberKind = NumberKind::Long;

    fn from_number(number: Number) -> Option<Self> {
        number.to_i128().and_then(|i| i64::try_from(i).ok())
    }
}

impl Numeric for i128 {
    const KIND: NumberKind = NumberKind::BigInt;

    fn from_number(number: Number) -> Option<Self> {
        number.to_i128()
    }
}

impl Numeric for f32 {
    const KIND: NumberKind = NumberKind::Float;

    fn from_number(number: Number) -> Option<Self> {
        Some(number.as_f64() as f32)
    }
}

impl Numeric for f64 {
    const KIND: NumberKind = NumberKind::Double;

    fn from_number(number: Number) -> Option<Self> {
        Some(number.as_f64())
    }
}

impl Numeric for Decimal {
    const KIND: NumberKind = NumberKind::Decimal;

    fn from_number(number: Number) -> Option<Self> {
        match number {
            Number::Int(i) => Some(Decimal::from(i)),
            Number::BigInt(i) => Decimal::from_i128(i),
            Number::Float(f) => Decimal::from_f64(f),
            Number::Decimal(d) => Some(d),
        }
    }
}

/// Validates numbers and converts them into `N`.
///
/// Checks run in order: integer-only (short-circuits), then min and max
/// (accumulated), then output conversion.
#[derive(Debug, Clone)]
pub struct NumberValidator<N: Numeric> {
    base: BaseConfig<N>,
    integer_only: bool,
    min: Option<f64>,
    max: Option<f64>,
    parse_error: String,
    type_error: String,
    min_error: String,
    max_error: String,
}

pub type IntValidator = NumberValidator<i32>;
pub type LongValidator = NumberValidator<i64>;
pub type FloatValidator = NumberValidator<f32>;
pub type DoubleValidator = NumberValidator<f64>;
pub type BigIntValidator = NumberValidator<i128>;
pub type DecimalValidator = NumberValidator<Decimal>;

impl<N: Numeric> Default for NumberValidator<N> {
    fn default() -> Self {
        Self {
            base: BaseConfig::new(),
            integer_only: N::KIND.is_integer(),
            min: None,
            max: None,
            parse_error: Check::NumParse.message().to_string(),
            type_error: Check::NumType.message().to_string(),
            min_error: Check::NumMin.message().to_string(),
            max_error: Check::NumMax.message().to_string(),
        }
    }
}

impl<N: Numeric> NumberValidator<N> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kind(&self) -> NumberKind {
        N::KIND
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

    pub fn default_value(mut self, value: N) -> Self {
        self.base.default = Some(value);
        self
    }

    pub fn bind(mut self, value: impl Into<Value>) -> Self {
        self.base.bound = Some(value.into());
        self
    }

    /// Rejects values with a fractional part. Always on for integer outputs.
    pub fn integer(mut self) -> Self {
        self.integer_only = true;
        self
    }

    pub fn is_integer_only(&self) -> bool {
        self.integer_only || N::KIND.is_integer()
    }

    pub fn min(mut self, min: impl Into<f64>) -> Self {
        self.min = Some(min.into());
        self
    }

    pub fn min_with(self, min: impl Into<f64>, message: impl Into<String>) -> Self {
        self.min(min).min_error(message)
    }

    pub fn max(mut self, max: impl Into<f64>) -> Self {
        self.max = Some(max.into());
        self
    }

    pub fn max_with(self, max: impl Into<f64>, message: impl Into<String>) -> Self {
        self.max(max).max_error(message)
    }

    pub fn range(self, min: impl Into<f64>, max: impl Into<f64>) -> Self {
        self.min(min).max(max)
    }

    pub fn parse_error(mut self, message: impl Into<String>) -> Self {
        self.parse_error = message.into();
        self
    }

    pub fn type_error(mut self, message: impl Into<String>) -> Self {
        self.type_error = message.into();
        self
    }

    pub fn min_error(mut self, message: impl Into<String>) -> Self {
        self.min_error = message.into();
        self
    }

    pub fn max_error(mut self, message: impl Into<String>) -> Self {
        self.max_error = message.into();
        self
    }
}

impl<N: Numeric> Validator for NumberValidator<N> {
    type Output = N;

    fn parse(&self, input: &Value) -> ParseResult<N> {
        if input.is_null() {
            return self
                .base
                .resolve_null(|default| ParseResult::success(*default), &self.parse_error);
        }
        let Some(number) = Number::from_value(input, self.base.coerce) else {
            return ParseResult::fail(&self.parse_error);
        };
        if self.is_integer_only() && !number.is_integral() {
            return ParseResult::fail(&self.type_error);
        }

        let compared = number.as_f64();
        let mut errors = Vec::new();
        if self.min.is_some_and(|min| compared < min) {
            errors.push(self.min_error.clone());
        }
        if self.max.is_some_and(|max| compared > max) {
            errors.push(self.max_error.clone());
        }
        if !errors.is_empty() {
            return ParseResult::failure(errors);
        }

        match N::from_number(number) {
            Some(value) => ParseResult::success(value),
            None => ParseResult::fail(&self.type_error),
        }
    }

    fn bound(&self) -> Option<&Value> {
        self.base.bound.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_kind_is_implied() {
        assert!(IntValidator::new().is_integer_only());
        assert!(BigIntValidator::new().is_integer_only());
        assert!(!DoubleValidator::new().is_integer_only());
        assert!(DoubleValidator::new().integer().is_integer_only());
    }

    #[test]
    fn coerced_integer_with_bounds() {
        let v = IntValidator::new().coerce().min(0).max(10);
        assert_eq!(v.parse(&Value::from("7")), ParseResult::success(7));
        assert_eq!(v.parse(&Value::from(" 7 ")), ParseResult::success(7));
        assert_eq!(
            v.parse(&Value::from("7.5")).errors(),
            [Check::NumType.message()]
        );
        assert_eq!(v.parse(&Value::Int(-1)).errors(), [Check::NumMin.message()]);
        assert_eq!(v.parse(&Value::Int(11)).errors(), [Check::NumMax.message()]);
    }

    #[test]
    fn non_finite_input_is_not_a_number() {
        let bounded = DoubleValidator::new().coerce().min(0).max(10);
        let ints = IntValidator::new().coerce().min(0).max(10);
        for text in ["NaN", "nan", "inf", "-Infinity", "1e400"] {
            assert_eq!(
                bounded.parse(&Value::from(text)),
                ParseResult::fail(Check::NumParse.message()),
                "{text}"
            );
            assert_eq!(
                ints.parse(&Value::from(text)),
                ParseResult::fail(Check::NumParse.message()),
                "{text}"
            );
        }
        let plain = DoubleValidator::new();
        assert!(plain.parse(&Value::Float(f64::NAN)).is_failure());
        assert!(plain.parse(&Value::Float(f64::NEG_INFINITY)).is_failure());
        assert_eq!(plain.parse(&Value::Float(2.5)), ParseResult::success(2.5));
    }

    #[test]
    fn integer_check_short_circuits_bounds() {
        let v = IntValidator::new().min(100);
        assert_eq!(
            v.parse(&Value::Float(1.5)).errors(),
            [Check::NumType.message()]
        );
    }

    #[test]
    fn bounds_accumulate_when_contradictory() {
        let v = DoubleValidator::new().min(10).max(1);
        assert_eq!(
            v.parse(&Value::Float(5.0)).errors(),
            [Check::NumMin.message(), Check::NumMax.message()]
        );
    }

    #[test]
    fn text_without_coercion_fails() {
        let v = LongValidator::new();
        assert_eq!(
            v.parse(&Value::from("5")),
            ParseResult::fail(Check::NumParse.message())
        );
        assert!(v.parse(&Value::Bool(true)).is_failure());
    }

    #[test]
    fn booleans_coerce_to_one_and_zero() {
        let v = IntValidator::new().coerce();
        assert_eq!(v.parse(&Value::Bool(true)), ParseResult::success(1));
        assert_eq!(v.parse(&Value::Bool(false)), ParseResult::success(0));
        assert!(v.parse(&Value::from("seven")).is_failure());
    }

    #[test]
    fn whole_floats_pass_integer_check() {
        let v = IntValidator::new();
        assert_eq!(v.parse(&Value::Float(3.0)), ParseResult::success(3));
        assert_eq!(
            v.parse(&Value::Decimal(Decimal::new(30, 1))),
            ParseResult::success(3)
        );
    }

    #[test]
    fn overflow_is_a_type_error() {
        let v = IntValidator::new();
        assert_eq!(
            v.parse(&Value::Int(i64::MAX)).errors(),
            [Check::NumType.message()]
        );
        let big = BigIntValidator::new();
        assert_eq!(
            big.parse(&Value::Int(i64::MAX)),
            ParseResult::success(i64::MAX as i128)
        );
    }

    #[test]
    fn decimal_output() {
        let v = DecimalValidator::new().coerce();
        assert_eq!(
            v.parse(&Value::from("2.5")),
            ParseResult::success(Decimal::new(25, 1))
        );
        assert_eq!(
            v.parse(&Value::from("NaN")).errors(),
            [Check::NumType.message()]
        );
    }

    #[test]
    fn float_output_narrows() {
        let v = FloatValidator::new();
        assert_eq!(v.parse(&Value::Float(0.5)), ParseResult::success(0.5f32));
    }

    #[test]
    fn default_skips_checks() {
        let v = IntValidator::new().min(10).default_value(3);
        assert_eq!(v.parse(&Value::Null), ParseResult::success(3));
        assert_eq!(v.parse(&Value::Int(3)).errors(), [Check::NumMin.message()]);
    }

    #[test]
    fn custom_messages() {
        let v = IntValidator::new()
            .min_with(18, "too young")
            .type_error("whole years only");
        assert_eq!(v.parse(&Value::Int(5)), ParseResult::fail("too young"));
        assert_eq!(v.parse(&Value::Float(18.5)), ParseResult::fail("whole years only"));
    }

    #[test]
    fn kind_names() {
        assert_eq!(DecimalValidator::new().kind().to_string(), "decimal");
        assert_eq!(LongValidator::new().kind(), NumberKind::Long);
    }
}
