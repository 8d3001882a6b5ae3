//! LocalAPIKey strategy tests.
//!
//! Drives the strategy directly through an outcome sink, without HTTP.


use serde_json::json;

use actix_localapikey_core::http::error::{BadRequestError, ConfigurationError};
use actix_localapikey_core::http::security::local_api_key::{
    LocalApiKeyConfig, LocalApiKeyStrategy, STRATEGY_NAME,
};
use actix_localapikey_core::http::security::{
    dispatch_outcome, AuthRequest, AuthenticateOptions, FailInfo, Strategy,
};

use common::{
    test_strategy, test_verify, test_verify_with_request, Client, Recorder, OUTAGE_KEY,
    REPORTING_KEY,
};

async fn run(strategy: &LocalApiKeyStrategy<Client>, req: AuthRequest) -> Recorder {
    run_with(strategy, req, AuthenticateOptions::default()).await
}

async fn run_with(
    strategy: &LocalApiKeyStrategy<Client>,
    req: AuthRequest,
    options: AuthenticateOptions,
) -> Recorder {
    let mut recorder = Recorder::default();
    dispatch_outcome(strategy, &req, &options, &mut recorder).await;
    assert_eq!(recorder.calls(), 1, "exactly one outcome per request");
    recorder
}

fn reporting() -> Client {
    Client {
        name: "reporting".to_string(),
    }
}

// =============================================================================
// Key Location Tests
// =============================================================================

#[actix_web::test]
async fn test_key_in_body() {
    let req = AuthRequest::new().body(json!({ "apikey": REPORTING_KEY }));
    let recorder = run(&test_strategy(), req).await;
    assert_eq!(
        recorder.successes,
        vec![(reporting(), Some(json!({ "message": "Welcome" })))]
    );
}

#[actix_web::test]
async fn test_key_in_query() {
    let req = AuthRequest::new().query(json!({ "apikey": REPORTING_KEY }));
    let recorder = run(&test_strategy(), req).await;
    assert_eq!(recorder.successes.len(), 1);
}

#[actix_web::test]
async fn test_body_wins_over_query() {
    let req = AuthRequest::new()
        .body(json!({ "apikey": "unknown" }))
        .query(json!({ "apikey": REPORTING_KEY }));
    let recorder = run(&test_strategy(), req).await;
    assert_eq!(
        recorder.failures,
        vec![FailInfo::Rejected(Some(json!({ "message": "Unknown API key" })))]
    );
}

#[actix_web::test]
async fn test_nested_field_in_body_and_query() {
    let strategy = LocalApiKeyStrategy::builder()
        .apikey_field("user[apikey]")
        .verify(test_verify())
        .build()
        .unwrap();

    let body = AuthRequest::new().body(json!({ "user": { "apikey": REPORTING_KEY } }));
    assert_eq!(run(&strategy, body).await.successes.len(), 1);

    let query = AuthRequest::new().query(json!({ "user": { "apikey": REPORTING_KEY } }));
    assert_eq!(run(&strategy, query).await.successes.len(), 1);

    // A flat key does not satisfy a nested field.
    let flat = AuthRequest::new().body(json!({ "apikey": REPORTING_KEY }));
    assert!(matches!(
        run(&strategy, flat).await.failures.as_slice(),
        [FailInfo::BadRequest(_)]
    ));
}

// =============================================================================
// Missing Key Tests
// =============================================================================

#[actix_web::test]
async fn test_missing_key_fails_with_bad_request() {
    let recorder = run(&test_strategy(), AuthRequest::new()).await;
    assert_eq!(
        recorder.failures,
        vec![FailInfo::BadRequest(BadRequestError::new("Missing API Key"))]
    );
}

#[actix_web::test]
async fn test_missing_key_message_precedence() {
    let strategy = LocalApiKeyStrategy::builder()
        .bad_request_message("Strategy message")
        .verify(test_verify())
        .build()
        .unwrap();

    let recorder = run(&strategy, AuthRequest::new()).await;
    assert_eq!(
        recorder.failures,
        vec![FailInfo::BadRequest(BadRequestError::new("Strategy message"))]
    );

    let options = AuthenticateOptions::new().bad_request_message("Call message");
    let recorder = run_with(&strategy, AuthRequest::new(), options).await;
    assert_eq!(
        recorder.failures,
        vec![FailInfo::BadRequest(BadRequestError::new("Call message"))]
    );
}

#[actix_web::test]
async fn test_empty_key_is_missing() {
    let req = AuthRequest::new().body(json!({ "apikey": "" }));
    let recorder = run(&test_strategy(), req).await;
    assert!(matches!(
        recorder.failures.as_slice(),
        [FailInfo::BadRequest(_)]
    ));
}

// =============================================================================
// Verify Outcome Tests
// =============================================================================

#[actix_web::test]
async fn test_verify_error_is_reported_as_error() {
    let req = AuthRequest::new().body(json!({ "apikey": OUTAGE_KEY }));
    let recorder = run(&test_strategy(), req).await;
    assert_eq!(recorder.errors.len(), 1);
    assert_eq!(recorder.errors[0].to_string(), "client store unavailable");
}

#[actix_web::test]
async fn test_request_passed_to_callback() {
    let strategy = LocalApiKeyStrategy::builder()
        .pass_req_to_callback(true)
        .verify(test_verify_with_request())
        .build()
        .unwrap();

    let req = AuthRequest::new()
        .attribute("path", "/reports")
        .query(json!({ "apikey": REPORTING_KEY }));
    let recorder = run(&strategy, req).await;
    assert_eq!(recorder.successes[0].0.name, "/reports");
}

// =============================================================================
// Construction Tests
// =============================================================================

#[test]
fn test_strategy_name() {
    assert_eq!(test_strategy().name(), STRATEGY_NAME);
    assert_eq!(STRATEGY_NAME, "localapikey");
}

#[test]
fn test_builder_requires_verify() {
    let result = LocalApiKeyStrategy::<Client>::builder().build();
    assert_eq!(result.err(), Some(ConfigurationError::MissingVerify));
}

#[test]
fn test_builder_rejects_mismatched_callback() {
    let result = LocalApiKeyStrategy::builder()
        .pass_req_to_callback(true)
        .verify(test_verify())
        .build();
    assert_eq!(
        result.err(),
        Some(ConfigurationError::VerifyArityMismatch {
            pass_req_to_callback: true
        })
    );
}

#[test]
fn test_builder_rejects_malformed_field() {
    let result = LocalApiKeyStrategy::builder()
        .apikey_field("user[apikey")
        .verify(test_verify())
        .build();
    assert!(matches!(
        result.err(),
        Some(ConfigurationError::InvalidFieldPath { .. })
    ));
}

#[test]
fn test_builder_from_json_config() {
    let config = LocalApiKeyConfig::from_json(
        r#"{"apikeyField": "client[key]", "badRequestMessage": "No key"}"#,
    )
    .unwrap();
    let strategy = LocalApiKeyStrategy::builder()
        .config(config)
        .verify(test_verify())
        .build()
        .unwrap();
    assert!(strategy.get_field().is_nested());
    assert_eq!(strategy.get_config().get_bad_request_message(), Some("No key"));
}
