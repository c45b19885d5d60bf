//! Property tests: parsing is deterministic and object snapshots re-parse to
//! themselves.

use proptest::prelude::*;
use schemax::{sx, ObjectValidator, Validator, Value};
use serde_json::Value as JsonValue;

fn json_strategy() -> impl Strategy<Value = JsonValue> {
    let leaf = prop_oneof![
        Just(JsonValue::Null),
        any::<bool>().prop_map(JsonValue::Bool),
        any::<i64>().prop_map(|n| JsonValue::Number(n.into())),
        (-1.0e6f64..1.0e6).prop_map(|f| serde_json::json!(f)),
        "[a-cx-zA-C0-9 @.,=:{}\\[\\]-]{0,24}".prop_map(JsonValue::String),
        prop_oneof![Just("NaN"), Just("inf"), Just("-Infinity"), Just("1e400")]
            .prop_map(|s| JsonValue::String(s.to_string())),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 0..4).prop_map(JsonValue::Array),
            proptest::collection::btree_map("[a-d]", inner, 0..4)
                .prop_map(|m| JsonValue::Object(m.into_iter().collect())),
        ]
    })
}

fn profile() -> ObjectValidator {
    sx::coerce::object()
        .field("a", sx::coerce::string().trim().lowercase())
        .field("b", sx::coerce::int().min(-1000).max(1000).default_value(0))
        .partial("c", sx::coerce::array(sx::coerce::double()))
        .partial("d", sx::coerce::boolean())
}

proptest! {
    #[test]
    fn parse_is_deterministic(input in json_strategy()) {
        let value = Value::from(input);
        let v = profile();
        prop_assert_eq!(v.parse(&value), v.parse(&value));

        let text = sx::coerce::string().email().max_length(10);
        prop_assert_eq!(text.parse(&value), text.parse(&value));

        let list = sx::coerce::array(sx::coerce::int()).unique();
        prop_assert_eq!(list.parse(&value), list.parse(&value));
    }

    #[test]
    fn snapshots_reparse_to_themselves(input in json_strategy()) {
        let v = profile();
        if let Some(snapshot) = v.parse(&Value::from(input)).into_value() {
            let again = v.parse(&Value::Map(snapshot.to_map())).into_value();
            prop_assert_eq!(again, Some(snapshot));
        }
    }

    #[test]
    fn coerced_integer_text_round_trips(n in -1_000_000i64..1_000_000) {
        let parsed = sx::coerce::long().parse(&Value::from(n.to_string())).into_value();
        prop_assert_eq!(parsed, Some(n));
    }
}
