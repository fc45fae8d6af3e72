use chrono::{DateTime, Utc};
use example_remoting_app::build_registry;
use remoting::http::{Method, StatusCode};
use remoting::request::RequestParts;
use remoting::{RemotingConfig, RemotingEngine};
use serde_json::json;

fn engine() -> RemotingEngine {
    RemotingEngine::new(build_registry().unwrap(), RemotingConfig::new())
}

#[tokio::test]
async fn add_over_its_route() {
    let response = engine()
        .dispatch(&Method::GET, "/add/5", &RequestParts::new().with_query("b", "-2"))
        .await
        .unwrap();

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, Some(json!({ "sum": 3 })));
}

#[tokio::test]
async fn echo_returns_the_body_with_plain_dates() {
    let request = RequestParts::new().with_body(json!({
        "title": "launch",
        "at": { "$type": "date", "$data": "2024-01-01T00:00:00.000Z" }
    }));
    let response = engine().handle("echo", &request).await;

    assert_eq!(
        response.body,
        Some(json!({ "title": "launch", "at": "2024-01-01T00:00:00.000Z" }))
    );
}

#[tokio::test]
async fn echo_requires_a_body() {
    let response = engine().handle("echo", &RequestParts::new()).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn clock_completes_after_its_delay() {
    let before = Utc::now();
    let response = engine()
        .dispatch(
            &Method::GET,
            "/clock/now",
            &RequestParts::new().with_query("delayMs", "15"),
        )
        .await
        .unwrap();

    let body = response.body.unwrap();
    assert_eq!(body["delayed"], json!(15));
    let now: DateTime<Utc> = body["now"].as_str().unwrap().parse().unwrap();
    assert!(now >= before - chrono::Duration::milliseconds(1));
}

#[tokio::test]
async fn clock_rejects_out_of_range_delays() {
    let response = engine()
        .handle("clock.now", &RequestParts::new().with_query("delayMs", "-1"))
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.body.unwrap()["error"]["statusCode"], json!(422));
}
