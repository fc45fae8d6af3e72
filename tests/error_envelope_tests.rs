use remoting::http::StatusCode;
use remoting::marshal::{
    ErrorEnvelope, InvocationError, MarshalError, RemoteError, ValidationError, ValidationReason,
};
use serde_json::json;

fn invocation(message: &str) -> MarshalError {
    let err: Box<dyn std::error::Error + Send + Sync> = message.into();
    MarshalError::Invocation(InvocationError::from_error(err.as_ref()))
}

#[test]
fn validation_errors_are_400_with_their_message() {
    let err = MarshalError::from(ValidationError::new("a", ValidationReason::Missing));

    let envelope = ErrorEnvelope::build(&err, false);
    assert_eq!(envelope.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        envelope.to_json(),
        json!({ "error": { "message": "\"a\" is a required argument", "statusCode": 400 } })
    );
}

#[test]
fn validation_details_appear_only_in_debug() {
    let err = MarshalError::from(ValidationError::new("when", ValidationReason::NotADate));

    let envelope = ErrorEnvelope::build(&err, true);
    assert_eq!(
        envelope.to_json()["error"]["details"],
        json!({ "argument": "when", "reason": "not_a_date" })
    );
    assert!(envelope.stack.is_none());
}

#[test]
fn invocation_errors_are_generic_outside_debug() {
    let envelope = ErrorEnvelope::build(&invocation("database password is hunter2"), false);

    assert_eq!(envelope.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        envelope.to_json(),
        json!({ "error": { "message": "Internal Server Error", "statusCode": 500 } })
    );
}

#[test]
fn invocation_errors_carry_message_stack_and_details_in_debug() {
    let envelope = ErrorEnvelope::build(&invocation("boom"), true);
    let json = envelope.to_json();

    assert_eq!(json["error"]["message"], json!("boom"));
    assert_eq!(json["error"]["statusCode"], json!(500));
    assert!(json["error"]["stack"].as_str().unwrap().contains("boom"));
    assert!(json["error"].get("details").is_some());
}

#[test]
fn remote_error_status_is_preserved() {
    let err: Box<dyn std::error::Error + Send + Sync> = RemoteError::new("nope")
        .with_status(StatusCode::FORBIDDEN)
        .into();
    let err = MarshalError::Invocation(InvocationError::from_error(err.as_ref()));

    let quiet = ErrorEnvelope::build(&err, false);
    assert_eq!(quiet.status, StatusCode::FORBIDDEN);
    assert_eq!(
        quiet.to_json(),
        json!({ "error": { "message": "Forbidden", "statusCode": 403 } })
    );

    let loud = ErrorEnvelope::build(&err, true);
    assert_eq!(loud.to_json()["error"]["message"], json!("nope"));
}

#[test]
fn method_not_found_is_404() {
    let err = MarshalError::MethodNotFound("missing".into());
    let envelope = ErrorEnvelope::build(&err, false);

    assert_eq!(envelope.status, StatusCode::NOT_FOUND);
    assert_eq!(
        envelope.to_json(),
        json!({ "error": { "message": "no remote method named \"missing\"", "statusCode": 404 } })
    );
}

#[test]
fn into_response_carries_status_and_envelope() {
    let err = MarshalError::MalformedBody("expected value at line 1 column 1".into());
    let response = ErrorEnvelope::build(&err, false).into_response();

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(!response.is_success());
    assert_eq!(response.content_type(), Some("application/json"));
    assert_eq!(response.body.unwrap()["error"]["statusCode"], json!(400));
}

#[test]
fn envelope_key_order_is_message_then_status() {
    let err = MarshalError::Serialization("bad float".into());
    let text = serde_json::to_string(&ErrorEnvelope::build(&err, false).to_json()).unwrap();
    assert_eq!(
        text,
        r#"{"error":{"message":"Internal Server Error","statusCode":500}}"#
    );
}

#[test]
fn error_messages_name_the_argument_or_carry_the_message() {
    assert_eq!(
        ValidationError::new("count", ValidationReason::NotANumber).to_string(),
        "\"count\" must be a number"
    );
    assert_eq!(
        ValidationError::new("at", ValidationReason::InvalidDate).to_string(),
        "\"at\" contains an invalid date"
    );
    assert_eq!(RemoteError::new("forbidden").to_string(), "forbidden");
    assert_eq!(InvocationError::new("boom").to_string(), "boom");

    let source: &(dyn std::error::Error + 'static) = &RemoteError::new("x");
    assert!(source.source().is_none());
}
