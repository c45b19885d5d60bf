//! Binding helpers: turn a value into a validator already bound to it.
//!
//! ```
//! use schemax::{AsSchema, Validator, WithSchema};
//!
//! assert_eq!("Ann".with_schema().min_length(2).try_parse_bound().unwrap(), Some("Ann".to_string()));
//! assert_eq!("70".as_int_schema().max(100).try_parse_bound().unwrap(), Some(70));
//! ```

use rust_decimal::Decimal;

use crate::boolean::BooleanValidator;
use crate::number::{
    DecimalValidator, DoubleValidator, FloatValidator, IntValidator, LongValidator,
};
use crate::object::ObjectValidator;
use crate::string::StringValidator;
use crate::value::{Value, ValueMap};

/// A value that knows the validator of its natural type.
pub trait WithSchema {
    type Schema;

    /// A fresh validator bound to `self`.
    fn with_schema(self) -> Self::Schema;
}

impl WithSchema for String {
    type Schema = StringValidator;

    fn with_schema(self) -> StringValidator {
        StringValidator::new().bind(self)
    }
}

impl WithSchema for &str {
    type Schema = StringValidator;

    fn with_schema(self) -> StringValidator {
        StringValidator::new().bind(self)
    }
}

impl WithSchema for i32 {
    type Schema = IntValidator;

    fn with_schema(self) -> IntValidator {
        IntValidator::new().bind(self)
    }
}

impl WithSchema for i64 {
    type Schema = LongValidator;

    fn with_schema(self) -> LongValidator {
        LongValidator::new().bind(self)
    }
}

impl WithSchema for f32 {
    type Schema = FloatValidator;

    fn with_schema(self) -> FloatValidator {
        FloatValidator::new().bind(self)
    }
}

impl WithSchema for f64 {
    type Schema = DoubleValidator;

    fn with_schema(self) -> DoubleValidator {
        DoubleValidator::new().bind(self)
    }
}

impl WithSchema for Decimal {
    type Schema = DecimalValidator;

    fn with_schema(self) -> DecimalValidator {
        DecimalValidator::new().bind(self)
    }
}

impl WithSchema for bool {
    type Schema = BooleanValidator;

    fn with_schema(self) -> BooleanValidator {
        BooleanValidator::new().bind(self)
    }
}

impl WithSchema for ValueMap {
    type Schema = ObjectValidator;

    fn with_schema(self) -> ObjectValidator {
        ObjectValidator::new().bind(self)
    }
}

/// Text read as another type: each helper returns a coercing validator
/// bound to the text.
pub trait AsSchema {
    fn as_int_schema(&self) -> IntValidator;
    fn as_long_schema(&self) -> LongValidator;
    fn as_double_schema(&self) -> DoubleValidator;
    fn as_decimal_schema(&self) -> DecimalValidator;
    fn as_boolean_schema(&self) -> BooleanValidator;
}

impl AsSchema for str {
    fn as_int_schema(&self) -> IntValidator {
        IntValidator::new().coerce().bind(self)
    }

    fn as_long_schema(&self) -> LongValidator {
        LongValidator::new().coerce().bind(self)
    }

    fn as_double_schema(&self) -> DoubleValidator {
        DoubleValidator::new().coerce().bind(self)
    }

    fn as_decimal_schema(&self) -> DecimalValidator {
        DecimalValidator::new().coerce().bind(self)
    }

    fn as_boolean_schema(&self) -> BooleanValidator {
        BooleanValidator::new().coerce().bind(self)
    }
}

impl Value {
    /// A coercing string validator bound to a copy of this value.
    pub fn as_string_schema(&self) -> StringValidator {
        StringValidator::new().coerce().bind(self.clone())
    }
}
