use remoting::descriptor::{ArgSource, ArgSpec, ArgType, MethodDescriptor};
use remoting::marshal::{ArgumentResolver, ValidationReason};
use remoting::request::RequestParts;
use remoting::value::RemoteValue;
use serde_json::json;

fn descriptor(specs: Vec<ArgSpec>, path: &str) -> MethodDescriptor {
    specs
        .into_iter()
        .fold(MethodDescriptor::builder("method"), |builder, spec| builder.accepts(spec))
        .path(path)
        .build()
        .unwrap()
}

#[test]
fn resolves_each_source_in_declaration_order() {
    let descriptor = descriptor(
        vec![
            ArgSpec::new("id", ArgType::Number, ArgSource::Path),
            ArgSpec::new("limit", ArgType::Number, ArgSource::Query),
            ArgSpec::new("token", ArgType::String, ArgSource::Header).with_wire_name("X-Token"),
            ArgSpec::new("note", ArgType::String, ArgSource::Body),
            ArgSpec::new("flag", ArgType::Boolean, ArgSource::Body),
        ],
        "/items/:id",
    );

    let request = RequestParts::new()
        .with_path_param("id", "7")
        .with_query("limit", "25")
        .with_header("x-token", "secret")
        .with_body(json!({ "note": "hello", "flag": true }));

    let args = ArgumentResolver::new(&descriptor).resolve(&request).unwrap();

    assert_eq!(args.len(), 5);
    assert_eq!(args.names(), ["id", "limit", "token", "note", "flag"]);
    assert_eq!(args.number(0), Some(7.0));
    assert_eq!(args.number(1), Some(25.0));
    assert_eq!(args.string(2), Some("secret"));
    assert_eq!(args.string(3), Some("hello"));
    assert_eq!(args.boolean(4), Some(true));
}

#[test]
fn form_and_form_data_fields_resolve() {
    let descriptor = descriptor(
        vec![
            ArgSpec::new("title", ArgType::String, ArgSource::Form),
            ArgSpec::new("count", ArgType::Number, ArgSource::FormData),
        ],
        "/upload",
    );

    let request = RequestParts::new()
        .with_form("title", "report")
        .with_form_data("count", "3");

    let args = ArgumentResolver::new(&descriptor).resolve(&request).unwrap();
    assert_eq!(args.string(0), Some("report"));
    assert_eq!(args.number(1), Some(3.0));
}

#[test]
fn auto_source_prefers_path_then_query_then_body() {
    let descriptor = descriptor(
        vec![
            ArgSpec::new("a", ArgType::String, ArgSource::Auto),
            ArgSpec::new("b", ArgType::String, ArgSource::Auto),
            ArgSpec::new("c", ArgType::String, ArgSource::Auto),
        ],
        "/auto/:a",
    );

    let request = RequestParts::new()
        .with_path_param("a", "from-path")
        .with_query("a", "from-query")
        .with_query("b", "from-query")
        .with_body(json!({ "b": "from-body", "c": "from-body" }));

    let args = ArgumentResolver::new(&descriptor).resolve(&request).unwrap();
    assert_eq!(args.string(0), Some("from-path"));
    assert_eq!(args.string(1), Some("from-query"));
    assert_eq!(args.string(2), Some("from-body"));
}

#[test]
fn lone_body_argument_receives_the_whole_body() {
    let descriptor = descriptor(
        vec![ArgSpec::new("data", ArgType::Object, ArgSource::Body).required()],
        "/echo",
    );
    let request = RequestParts::new().with_body(json!({ "x": 1, "y": [true] }));

    let args = ArgumentResolver::new(&descriptor).resolve(&request).unwrap();
    let data = args.get(0).unwrap();
    assert_eq!(data.field("x"), Some(&RemoteValue::from(1)));
    assert_eq!(data.to_json(), json!({ "x": 1, "y": [true] }));
}

#[test]
fn zero_and_false_satisfy_required_arguments() {
    let descriptor = descriptor(
        vec![
            ArgSpec::new("n", ArgType::Number, ArgSource::Query).required(),
            ArgSpec::new("b", ArgType::Boolean, ArgSource::Query).required(),
        ],
        "/falsy",
    );
    let request = RequestParts::new().with_query("n", "0").with_query("b", "false");

    let args = ArgumentResolver::new(&descriptor).resolve(&request).unwrap();
    assert_eq!(args.number(0), Some(0.0));
    assert_eq!(args.boolean(1), Some(false));
}

#[test]
fn empty_string_fails_a_required_string_argument() {
    let descriptor = descriptor(
        vec![ArgSpec::new("name", ArgType::String, ArgSource::Query).required()],
        "/greet",
    );
    let request = RequestParts::new().with_query("name", "");

    let err = ArgumentResolver::new(&descriptor).resolve(&request).unwrap_err();
    assert_eq!(err.argument, "name");
    assert_eq!(err.reason, ValidationReason::EmptyString);
    assert_eq!(err.status_code().as_u16(), 400);
}

#[test]
fn empty_string_is_kept_for_optional_string_arguments() {
    let descriptor = descriptor(
        vec![ArgSpec::new("name", ArgType::String, ArgSource::Query)],
        "/greet",
    );
    let request = RequestParts::new().with_query("name", "");

    let args = ArgumentResolver::new(&descriptor).resolve(&request).unwrap();
    assert_eq!(args.string(0), Some(""));
}

#[test]
fn missing_optional_argument_keeps_its_slot() {
    let descriptor = descriptor(
        vec![
            ArgSpec::new("a", ArgType::Number, ArgSource::Query),
            ArgSpec::new("b", ArgType::Number, ArgSource::Query),
        ],
        "/pair",
    );
    let request = RequestParts::new().with_query("b", "2");

    let args = ArgumentResolver::new(&descriptor).resolve(&request).unwrap();
    assert_eq!(args.len(), 2);
    assert!(args.is_missing(0));
    assert_eq!(args.number(1), Some(2.0));
}

#[test]
fn stops_at_the_first_invalid_argument() {
    let descriptor = descriptor(
        vec![
            ArgSpec::new("a", ArgType::Number, ArgSource::Query).required(),
            ArgSpec::new("b", ArgType::Number, ArgSource::Query).required(),
        ],
        "/pair",
    );

    let err = ArgumentResolver::new(&descriptor)
        .resolve(&RequestParts::new())
        .unwrap_err();
    assert_eq!(err.argument, "a");
    assert_eq!(err.reason, ValidationReason::Missing);
    assert_eq!(err.to_string(), "\"a\" is a required argument");
}

#[test]
fn uncoercible_values_are_rejected() {
    let descriptor = descriptor(
        vec![ArgSpec::new("n", ArgType::Number, ArgSource::Query)],
        "/num",
    );
    let request = RequestParts::new().with_query("n", "twelve");

    let err = ArgumentResolver::new(&descriptor).resolve(&request).unwrap_err();
    assert_eq!(err.reason, ValidationReason::NotANumber);
}

#[test]
fn nested_date_wrappers_are_decoded() {
    let descriptor = descriptor(
        vec![ArgSpec::new("event", ArgType::Object, ArgSource::Body)],
        "/events",
    );
    let request = RequestParts::new().with_body(json!({
        "name": "launch",
        "schedule": [{ "at": { "$type": "date", "$data": "2024-03-01T10:00:00Z" } }]
    }));

    let args = ArgumentResolver::new(&descriptor).resolve(&request).unwrap();
    let event = args.get(0).unwrap();
    let first = &event.field("schedule").unwrap().as_array().unwrap()[0];
    let at = first.field("at").and_then(RemoteValue::as_date).unwrap();
    assert_eq!(at.timestamp(), 1_709_287_200);
}

#[test]
fn malformed_date_wrapper_is_a_validation_error() {
    let descriptor = descriptor(
        vec![ArgSpec::new("event", ArgType::Object, ArgSource::Body)],
        "/events",
    );
    let request = RequestParts::new().with_body(json!({
        "at": { "$type": "date", "$data": "yesterday" }
    }));

    let err = ArgumentResolver::new(&descriptor).resolve(&request).unwrap_err();
    assert_eq!(err.reason, ValidationReason::InvalidDate);
}
