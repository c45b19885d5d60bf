//! Short constructors for every validator.
//!
//! ```
//! use schemax::{sx, Validator, Value};
//!
//! let age = sx::coerce::int().min(0);
//! assert_eq!(age.parse(&Value::from("42")).into_value(), Some(42));
//! ```

use crate::array::ArrayValidator;
use crate::boolean::BooleanValidator;
use crate::number::{
    BigIntValidator, DecimalValidator, DoubleValidator, FloatValidator, IntValidator,
    LongValidator,
};
use crate::object::ObjectValidator;
use crate::string::StringValidator;
use crate::validator::Validator;

pub fn string() -> StringValidator {
    StringValidator::new()
}

pub fn string_with(parse_error: impl Into<String>) -> StringValidator {
    string().parse_error(parse_error)
}

pub fn int() -> IntValidator {
    IntValidator::new()
}

pub fn int_with(parse_error: impl Into<String>) -> IntValidator {
    int().parse_error(parse_error)
}

pub fn long() -> LongValidator {
    LongValidator::new()
}

pub fn long_with(parse_error: impl Into<String>) -> LongValidator {
    long().parse_error(parse_error)
}

pub fn float() -> FloatValidator {
    FloatValidator::new()
}

pub fn float_with(parse_error: impl Into<String>) -> FloatValidator {
    float().parse_error(parse_error)
}

pub fn double() -> DoubleValidator {
    DoubleValidator::new()
}

pub fn double_with(parse_error: impl Into<String>) -> DoubleValidator {
    double().parse_error(parse_error)
}

pub fn big_int() -> BigIntValidator {
    BigIntValidator::new()
}

pub fn big_int_with(parse_error: impl Into<String>) -> BigIntValidator {
    big_int().parse_error(parse_error)
}

pub fn decimal() -> DecimalValidator {
    DecimalValidator::new()
}

pub fn decimal_with(parse_error: impl Into<String>) -> DecimalValidator {
    decimal().parse_error(parse_error)
}

pub fn boolean() -> BooleanValidator {
    BooleanValidator::new()
}

pub fn boolean_with(parse_error: impl Into<String>) -> BooleanValidator {
    boolean().parse_error(parse_error)
}

pub fn array<V: Validator>(element: V) -> ArrayValidator<V> {
    ArrayValidator::new(element)
}

pub fn array_with<V: Validator>(element: V, parse_error: impl Into<String>) -> ArrayValidator<V> {
    array(element).parse_error(parse_error)
}

pub fn object() -> ObjectValidator {
    ObjectValidator::new()
}

pub fn object_with(parse_error: impl Into<String>) -> ObjectValidator {
    object().parse_error(parse_error)
}

/// The same constructors with coercion switched on.
pub mod coerce {
    use super::*;

    pub fn string() -> StringValidator {
        super::string().coerce()
    }

    pub fn string_with(parse_error: impl Into<String>) -> StringValidator {
        super::string_with(parse_error).coerce()
    }

    pub fn int() -> IntValidator {
        super::int().coerce()
    }

    pub fn int_with(parse_error: impl Into<String>) -> IntValidator {
        super::int_with(parse_error).coerce()
    }

    pub fn long() -> LongValidator {
        super::long().coerce()
    }

    pub fn long_with(parse_error: impl Into<String>) -> LongValidator {
        super::long_with(parse_error).coerce()
    }

    pub fn float() -> FloatValidator {
        super::float().coerce()
    }

    pub fn float_with(parse_error: impl Into<String>) -> FloatValidator {
        super::float_with(parse_error).coerce()
    }

    pub fn double() -> DoubleValidator {
        super::double().coerce()
    }

    pub fn double_with(parse_error: impl Into<String>) -> DoubleValidator {
        super::double_with(parse_error).coerce()
    }

    pub fn big_int() -> BigIntValidator {
        super::big_int().coerce()
    }

    pub fn big_int_with(parse_error: impl Into<String>) -> BigIntValidator {
        super::big_int_with(parse_error).coerce()
    }

    pub fn decimal() -> DecimalValidator {
        super::decimal().coerce()
    }

    pub fn decimal_with(parse_error: impl Into<String>) -> DecimalValidator {
        super::decimal_with(parse_error).coerce()
    }

    pub fn boolean() -> BooleanValidator {
        super::boolean().coerce()
    }

    pub fn boolean_with(parse_error: impl Into<String>) -> BooleanValidator {
        super::boolean_with(parse_error).coerce()
    }

    pub fn array<V: Validator>(element: V) -> ArrayValidator<V> {
        super::array(element).coerce()
    }

    pub fn array_with<V: Validator>(
        element: V,
        parse_error: impl Into<String>,
    ) -> ArrayValidator<V> {
        super::array_with(element, parse_error).coerce()
    }

    pub fn object() -> ObjectValidator {
        super::object().coerce()
    }

    pub fn object_with(parse_error: impl Into<String>) -> ObjectValidator {
        super::object_with(parse_error).coerce()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::ParseResult;
    use crate::value::Value;

    #[test]
    fn plain_constructors_do_not_coerce() {
        assert!(int().parse(&Value::from("1")).is_failure());
        assert!(!string().is_coerce());
    }

    #[test]
    fn coerce_constructors() {
        assert_eq!(coerce::int().parse(&Value::from("1")), ParseResult::success(1));
        assert_eq!(coerce::boolean().parse(&Value::from("on")), ParseResult::success(true));
        assert_eq!(
            coerce::array(coerce::long()).parse(&Value::from("1,2")),
            ParseResult::success(vec![1i64, 2])
        );
        assert!(coerce::string().is_coerce());
    }

    #[test]
    fn custom_parse_errors() {
        assert_eq!(
            double_with("need a number").parse(&Value::Bool(true)),
            ParseResult::fail("need a number")
        );
        assert_eq!(
            coerce::object_with("need an object").parse(&Value::Int(1)),
            ParseResult::fail("need an object")
        );
    }
}
