//! Typed validation and coercion of untyped values.
//!
//! A validator is configured once through a builder chain and then turns any
//! [`Value`] into a typed output or a set of error messages:
//!
//! ```
//! use schemax::{sx, Validator, Value};
//! use serde_json::json;
//!
//! let user = sx::object()
//!     .field("name", sx::string().trim().non_empty())
//!     .field("age", sx::coerce::int().min(0))
//!     .strict();
//!
//! let ok = user.parse(&Value::from(json!({"name": " Ann ", "age": "30"})));
//! assert_eq!(ok.value().unwrap().get_str("name"), Some("Ann"));
//!
//! let bad = user.parse(&Value::from(json!({"name": "Ann", "role": "admin"})));
//! assert_eq!(
//!     bad.field_errors().unwrap()["role"],
//!     "Unknown property not allowed in strict mode"
//! );
//! ```
//!
//! Many bound validators can be checked together with [`BatchValidator`] or
//! [`validate_batch`].

pub mod array;
pub mod batch;
pub mod bind;
pub mod boolean;
pub mod coerce;
pub mod constants;
pub mod error;
pub mod number;
pub mod object;
pub mod result;
pub mod string;
pub mod sx;
pub mod validator;
pub mod value;

pub use array::{ArrayValidator, KeyFn};
pub use batch::{validate_batch, BatchReport, BatchValidator};
pub use bind::{AsSchema, WithSchema};
pub use boolean::BooleanValidator;
pub use coerce::{FieldsConverter, StructuralConverter};
pub use constants::Check;
pub use error::{SchemaError, ValidationFault};
pub use number::{
    BigIntValidator, DecimalValidator, DoubleValidator, FloatValidator, IntValidator,
    LongValidator, Number, NumberKind, NumberValidator, Numeric,
};
pub use object::{ObjectSnapshot, ObjectValidator, PartialPolicy};
pub use result::{Errors, ParseResult};
pub use string::StringValidator;
pub use validator::{BaseConfig, DynValidator, Validator};
pub use value::{SerdeStructured, Structured, Value, ValueKind, ValueMap};
