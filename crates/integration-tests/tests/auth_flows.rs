//! Authentication form against a mock API.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use babyshoe_integration_tests::{RecordingForm, TestContext};
use babyshoe_storefront::auth::{
    AuthFormController, AuthFormEvent, AuthFormInput, FormMode, InlineMessage, SubmitSuccess,
};
use babyshoe_storefront::events;
use babyshoe_storefront::error::FormError;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

fn controller(ctx: &TestContext, view: &std::sync::Arc<RecordingForm>) -> AuthFormController {
    AuthFormController::new(
        ctx.api.clone(),
        view.clone(),
        ctx.navigator("login.html"),
        ctx.config.site.clone(),
        &ctx.config.timings,
    )
}

#[tokio::test]
async fn test_login_short_password_still_reaches_server() {
    let ctx = TestContext::new().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .and(body_json(json!({"email": "ada@example.com", "password": "12345"})))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": "Invalid credentials"})))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let view = RecordingForm::new();
    let mut form = controller(&ctx, &view);
    let err = form
        .submit(AuthFormInput::new("ada@example.com", "12345"))
        .await
        .unwrap_err();

    assert!(!err.is_local());
    assert_eq!(view.message(), Some(InlineMessage::error("Invalid credentials")));
}

#[tokio::test]
async fn test_signup_short_password_never_sent() {
    let ctx = TestContext::new().await;
    Mock::given(method("POST"))
        .and(path("/api/register"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&ctx.server)
        .await;

    let view = RecordingForm::new();
    let mut form = controller(&ctx, &view);
    form.click_switch();
    let err = form
        .submit(AuthFormInput::new("ada@example.com", "12345").with_name("Ada"))
        .await
        .unwrap_err();

    assert!(err.is_local());
    assert_eq!(
        view.message(),
        Some(InlineMessage::error(
            "Password must be at least 6 characters long."
        ))
    );
}

#[tokio::test]
async fn test_bad_email_never_sent() {
    let ctx = TestContext::new().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&ctx.server)
        .await;

    let view = RecordingForm::new();
    let mut form = controller(&ctx, &view);
    form.click_forgot();
    let err = form
        .submit(AuthFormInput::new("not-an-email", ""))
        .await
        .unwrap_err();

    assert!(matches!(err, FormError::Invalid(_)));
}

#[tokio::test]
async fn test_signup_then_login_mode() {
    let ctx = TestContext::new().await;
    Mock::given(method("POST"))
        .and(path("/api/register"))
        .and(body_json(
            json!({"name": "Ada", "email": "ada@example.com", "password": "secret1"}),
        ))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let view = RecordingForm::new();
    let mut form = controller(&ctx, &view);
    form.click_switch();
    let outcome = form
        .submit(AuthFormInput::new("ada@example.com", "secret1").with_name("Ada"))
        .await
        .unwrap();

    assert_eq!(outcome, SubmitSuccess::Registered);
    assert_eq!(form.mode(), FormMode::Login);
    assert_eq!(view.layout(), Some(FormMode::Login.layout()));
    assert_eq!(
        view.message(),
        Some(InlineMessage::success("Registration successful! Please login."))
    );
}

#[tokio::test]
async fn test_mounted_login_redirects_with_marker() {
    let ctx = TestContext::new().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .mount(&ctx.server)
        .await;

    let view = RecordingForm::new();
    let navigator = ctx.navigator("login.html");
    let form = AuthFormController::new(
        ctx.api.clone(),
        view.clone(),
        navigator.clone(),
        ctx.config.site.clone(),
        &ctx.config.timings,
    );
    let (events, _subscription) = events::mount(form);

    events.dispatch(AuthFormEvent::Submitted(AuthFormInput::new(
        "ada@example.com",
        "pw",
    )));

    // Real time: the mock server answers over a socket.
    tokio::time::sleep(Duration::from_secs(2)).await;

    assert_eq!(
        view.message(),
        Some(InlineMessage::success("Login successful! Redirecting..."))
    );
    assert_eq!(
        navigator.navigations(),
        vec![ctx.page("index.html?login_success=true")]
    );
}
