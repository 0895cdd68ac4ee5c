//! Header behaviour against a mock API: session controls, badge, welcome, logout.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use babyshoe_core::CartItem;
use babyshoe_integration_tests::{RecordingNav, RecordingNotices, TestContext};
use babyshoe_storefront::browser::Navigator;
use babyshoe_storefront::nav::NavPresenter;
use babyshoe_storefront::notify::Severity;
use babyshoe_storefront::session::SessionClient;
use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

async fn mock_status(ctx: &TestContext, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/api/auth/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&ctx.server)
        .await;
}

#[tokio::test]
async fn test_welcome_after_login_redirect() {
    let ctx = TestContext::new().await;
    mock_status(&ctx, json!({"isLoggedIn": true, "user": {"name": "Ada"}})).await;

    let view = RecordingNav::new();
    let notices = RecordingNotices::new();
    let navigator = ctx.navigator("index.html?login_success=true");
    let mut nav = NavPresenter::new(
        ctx.api.clone(),
        view.clone(),
        navigator.clone(),
        notices.center(),
        ctx.cart.clone(),
        ctx.config.site.clone(),
    );

    nav.load().await;
    nav.load().await;

    assert_eq!(view.logged_in(), Some(true));
    assert_eq!(
        notices.shown(),
        vec![("Welcome back, Ada!".to_string(), Severity::Success)]
    );
    assert_eq!(navigator.current_url(), ctx.page("index.html"));
    assert!(navigator.navigations().is_empty());
}

#[tokio::test]
async fn test_badge_shows_total_units() {
    let ctx = TestContext::new().await;
    mock_status(&ctx, json!({"isLoggedIn": true})).await;
    ctx.cart.add(CartItem::new(1, 2));
    ctx.cart.add(CartItem::new(2, 3));

    let view = RecordingNav::new();
    let mut nav = NavPresenter::new(
        ctx.api.clone(),
        view.clone(),
        ctx.navigator("index.html"),
        RecordingNotices::new().center(),
        ctx.cart.clone(),
        ctx.config.site.clone(),
    );
    nav.load().await;

    assert_eq!(view.badge(), Some(5));
}

#[tokio::test]
async fn test_status_outage_fails_open() {
    let ctx = TestContext::new().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/status"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&ctx.server)
        .await;
    ctx.cart.add(CartItem::new(1, 2));

    let view = RecordingNav::new();
    let mut nav = NavPresenter::new(
        ctx.api.clone(),
        view.clone(),
        ctx.navigator("index.html?login_success=true"),
        RecordingNotices::new().center(),
        ctx.cart.clone(),
        ctx.config.site.clone(),
    );
    let state = nav.load().await;

    assert!(!state.is_logged_in());
    assert_eq!(view.logged_in(), Some(false));
    assert_eq!(view.badge(), None);
}

#[tokio::test]
async fn test_logout_navigates_even_on_server_error() {
    let ctx = TestContext::new().await;
    Mock::given(method("POST"))
        .and(path("/api/logout"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let navigator = ctx.navigator("index.html");
    let mut nav = NavPresenter::new(
        ctx.api.clone(),
        RecordingNav::new(),
        navigator.clone(),
        RecordingNotices::new().center(),
        ctx.cart.clone(),
        ctx.config.site.clone(),
    );
    nav.logout().await.unwrap();

    assert_eq!(navigator.navigations(), vec![ctx.page("index.html")]);
}

#[tokio::test]
async fn test_logout_unreachable_shows_error() {
    let ctx = TestContext::new().await;
    // Reserve a port, then free it so nothing is listening there.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut config = ctx.config.clone();
    config.api_base_url = Url::parse(&format!("http://{addr}")).unwrap();
    let api = Arc::new(SessionClient::new(&config).unwrap());

    let notices = RecordingNotices::new();
    let navigator = ctx.navigator("index.html");
    let mut nav = NavPresenter::new(
        api,
        RecordingNav::new(),
        navigator.clone(),
        notices.center(),
        ctx.cart.clone(),
        ctx.config.site.clone(),
    );

    assert!(nav.logout().await.is_err());
    assert!(navigator.navigations().is_empty());
    assert_eq!(
        notices.shown(),
        vec![(
            "Logout failed. Please try again.".to_string(),
            Severity::Error
        )]
    );
}
