use schemax::{
    sx, validate_batch, AsSchema, BatchValidator, Check, Errors, SchemaError, Value, WithSchema,
};
use serde_json::json;

#[test]
fn one_valid_one_invalid_matrix() {
    let report = BatchValidator::new()
        .add("name", "Ann".with_schema().non_empty())
        .add("age", "abc".as_int_schema())
        .validate();

    let err = report.into_result().unwrap_err();
    let fault = err.fault().unwrap();
    assert_eq!(
        fault.errors(),
        [format!("[age] {}", Check::NumParse.message())]
    );
    assert_eq!(
        fault.original(),
        &Value::from(json!({"name": "Ann"}))
    );
}

#[test]
fn all_valid_matrix() {
    let values = validate_batch(|b| {
        b.rule("port", "8080".as_int_schema().range(1, 65535));
        b.rule("debug", "off".as_boolean_schema());
        b.rule("ratio", 0.25f64.with_schema().max(1));
    })
    .into_result()
    .unwrap();
    assert_eq!(
        Value::Map(values).to_json(),
        json!({"port": 8080, "debug": false, "ratio": 0.25})
    );
}

#[test]
fn unbound_and_multi_message_matrix() {
    let report = validate_batch(|b| {
        b.rule("missing", sx::string());
        b.rule("email", "x".with_schema().min_length(3).email());
    });
    assert!(report.has_errors());
    assert_eq!(
        report.errors_for("missing"),
        Some(&[Check::Unbound.message().to_string()][..])
    );
    assert_eq!(report.errors_for("email").map(<[String]>::len), Some(2));
    assert_eq!(
        report.flattened_errors(),
        [
            format!("[missing] {}", Check::Unbound.message()),
            format!("[email] {}", Check::StrMinLen.message()),
            format!("[email] {}", Check::Email.message()),
        ]
    );

    let result = report.to_parse_result();
    assert!(matches!(result.error_set(), Some(Errors::FieldLists(_))));
    assert_eq!(result.messages(), report.flattened_errors());
}

#[test]
fn object_failures_flatten_per_field_matrix() {
    let mut input = schemax::ValueMap::new();
    input.insert("age".into(), Value::from("old"));
    let report = validate_batch(|b| {
        b.rule("user", input.with_schema().field("age", sx::int()));
    });
    assert_eq!(
        report.errors_for("user"),
        Some(&[format!("age: {}", Check::NumParse.message())][..])
    );
}

#[test]
fn fault_display_matrix() {
    let err = validate_batch(|b| {
        b.rule("n", sx::int().bind("x"));
    })
    .into_result()
    .unwrap_err();
    assert!(matches!(err, SchemaError::Invalid(_)));
    assert_eq!(
        err.to_string(),
        format!(
            "Schema validation failed\nErrors:\n  - [n] {}\nOriginal value: {{}}",
            Check::NumParse.message()
        )
    );
}

#[test]
fn later_registration_replaces_earlier_matrix() {
    let report = BatchValidator::new()
        .add("k", sx::int().bind("bad"))
        .add("k", sx::coerce::int().bind("5"))
        .validate();
    assert!(!report.has_errors());
    assert_eq!(report.value("k"), Some(&Value::Int(5)));
}
