use chrono::{TimeZone, Utc};
use remoting::descriptor::{ArgType, MethodDescriptor, ReturnSpec, TypeDecl};
use remoting::marshal::ResultSerializer;
use remoting::value::RemoteValue;
use serde_json::json;

fn returning(specs: Vec<ReturnSpec>) -> MethodDescriptor {
    specs
        .into_iter()
        .fold(MethodDescriptor::builder("method"), |builder, spec| builder.returns(spec))
        .build()
        .unwrap()
}

#[test]
fn named_returns_follow_declaration_order() {
    let descriptor = returning(vec![
        ReturnSpec::new("b", ArgType::Number),
        ReturnSpec::new("a", ArgType::Number),
    ]);

    let body = ResultSerializer::serialize(
        &descriptor,
        &[RemoteValue::from(2), RemoteValue::from(1)],
    )
    .unwrap();

    assert_eq!(body, json!({ "b": 2, "a": 1 }));
    assert_eq!(serde_json::to_string(&body).unwrap(), r#"{"b":2,"a":1}"#);
}

#[test]
fn missing_outputs_omit_their_keys_and_surplus_is_ignored() {
    let descriptor = returning(vec![
        ReturnSpec::new("a", ArgType::Number),
        ReturnSpec::new("b", ArgType::Number),
    ]);

    let body = ResultSerializer::serialize(&descriptor, &[RemoteValue::from(1)]).unwrap();
    assert_eq!(body, json!({ "a": 1 }));

    let body = ResultSerializer::serialize(
        &descriptor,
        &[RemoteValue::from(1), RemoteValue::from(2), RemoteValue::from(3)],
    )
    .unwrap();
    assert_eq!(body, json!({ "a": 1, "b": 2 }));
}

#[test]
fn root_return_becomes_the_whole_body() {
    let descriptor = returning(vec![ReturnSpec::new("data", ArgType::Object).root()]);
    let value = RemoteValue::from_wire(json!({ "x": [1, 2], "y": "z" })).unwrap();

    let body = ResultSerializer::serialize(&descriptor, &[value]).unwrap();
    assert_eq!(body, json!({ "x": [1, 2], "y": "z" }));
}

#[test]
fn root_scalar_is_emitted_bare() {
    let descriptor = returning(vec![ReturnSpec::new("count", ArgType::Number).root()]);
    let body = ResultSerializer::serialize(&descriptor, &[RemoteValue::from(5)]).unwrap();
    assert_eq!(body, json!(5));
}

#[test]
fn structural_root_type_emits_plain_json() {
    let type_decl = TypeDecl::from_json(&json!({
        "count": { "type": "number", "description": "How many were processed" }
    }))
    .unwrap();
    let descriptor = returning(vec![ReturnSpec::new("result", type_decl).root()]);
    let value = RemoteValue::from_wire(json!({ "count": 1 })).unwrap();

    let body = ResultSerializer::serialize(&descriptor, &[value]).unwrap();
    assert_eq!(body, json!({ "count": 1 }));
}

#[test]
fn dates_are_emitted_as_iso_strings() {
    let descriptor = returning(vec![
        ReturnSpec::new("created", ArgType::Date),
        ReturnSpec::new("epoch", ArgType::Date),
        ReturnSpec::new("history", TypeDecl::from_json(&json!(["date"])).unwrap()),
    ]);
    let created = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();

    let body = ResultSerializer::serialize(
        &descriptor,
        &[
            RemoteValue::Date(created),
            RemoteValue::from(0),
            RemoteValue::Array(vec![RemoteValue::Date(created)]),
        ],
    )
    .unwrap();

    assert_eq!(
        body,
        json!({
            "created": "2024-01-02T03:04:05.000Z",
            "epoch": "1970-01-01T00:00:00.000Z",
            "history": ["2024-01-02T03:04:05.000Z"]
        })
    );
}

#[test]
fn dates_nested_in_untyped_values_are_still_strings() {
    let descriptor = returning(vec![ReturnSpec::new("data", ArgType::Any).root()]);
    let value = RemoteValue::from_wire(json!({
        "at": { "$type": "date", "$data": "2020-05-05T05:05:05.5Z" }
    }))
    .unwrap();

    let body = ResultSerializer::serialize(&descriptor, &[value]).unwrap();
    assert_eq!(body, json!({ "at": "2020-05-05T05:05:05.500Z" }));
}

#[test]
fn no_returns_means_no_body() {
    let descriptor = returning(vec![]);
    assert_eq!(ResultSerializer::serialize(&descriptor, &[]), None);
    assert_eq!(
        ResultSerializer::serialize(&descriptor, &[RemoteValue::from(1)]),
        None
    );
}

#[test]
fn root_without_output_means_no_body() {
    let descriptor = returning(vec![ReturnSpec::new("data", ArgType::Any).root()]);
    assert_eq!(ResultSerializer::serialize(&descriptor, &[]), None);
}
