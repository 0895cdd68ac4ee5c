//! HTTP implementation of [`SessionApi`].

use std::sync::Arc;

use async_trait::async_trait;
use babyshoe_core::{AuthStatus, Email, ResetToken, SessionState};
use reqwest::cookie::Jar;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use secrecy::SecretString;
use serde::Serialize;

use super::SessionApi;
use super::types::{
    ErrorBody, ForgotPasswordRequest, LoginRequest, RegisterRequest, ResetPasswordRequest,
};
use crate::config::StorefrontConfig;
use crate::error::SessionError;

const STATUS_PATH: &str = "/api/auth/status";
const LOGIN_PATH: &str = "/api/login";
const REGISTER_PATH: &str = "/api/register";
const FORGOT_PASSWORD_PATH: &str = "/api/forgot-password";
const RESET_PASSWORD_PATH: &str = "/api/reset-password";
const LOGOUT_PATH: &str = "/api/logout";

/// Session API client.
///
/// Cheap to clone; clones share the connection pool and the cookie jar.
#[derive(Clone)]
pub struct SessionClient {
    client: reqwest::Client,
    config: StorefrontConfig,
}

impl SessionClient {
    /// Create a new session client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &StorefrontConfig) -> Result<Self, SessionError> {
        Self::build(config, base_builder(config).cookie_store(true))
    }

    /// Create a client whose cookies live in `jar`.
    ///
    /// Lets a caller persist the session cookie between processes.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn with_cookie_jar(
        config: &StorefrontConfig,
        jar: Arc<Jar>,
    ) -> Result<Self, SessionError> {
        Self::build(config, base_builder(config).cookie_provider(jar))
    }

    fn build(
        config: &StorefrontConfig,
        builder: reqwest::ClientBuilder,
    ) -> Result<Self, SessionError> {
        let client = builder.build().map_err(SessionError::Connection)?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// POST a JSON body (or nothing) and classify the response.
    async fn post<B: Serialize + Sync>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> Result<(), SessionError> {
        let url = self.config.api_url(path)?;
        let mut request = self.client.post(url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(SessionError::Connection)?;
        let status = response.status();

        if status.is_success() {
            tracing::debug!(path, status = status.as_u16(), "Session request succeeded");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|body| body.error);
        tracing::warn!(path, status = status.as_u16(), "Session request rejected");

        Err(SessionError::rejected(status.as_u16(), message))
    }
}

fn base_builder(config: &StorefrontConfig) -> reqwest::ClientBuilder {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    reqwest::Client::builder()
        .default_headers(headers)
        .timeout(config.request_timeout)
}

#[async_trait]
impl SessionApi for SessionClient {
    async fn status(&self) -> Result<SessionState, SessionError> {
        let url = self.config.api_url(STATUS_PATH)?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(SessionError::Connection)?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|body| body.error);
            return Err(SessionError::rejected(status.as_u16(), message));
        }

        let bytes = response.bytes().await.map_err(SessionError::Connection)?;
        let auth: AuthStatus =
            serde_json::from_slice(&bytes).map_err(|e| SessionError::Decode(e.to_string()))?;

        Ok(auth.into())
    }

    async fn login(&self, email: &Email, password: &SecretString) -> Result<(), SessionError> {
        self.post(LOGIN_PATH, Some(&LoginRequest { email, password }))
            .await
    }

    async fn register(
        &self,
        name: &str,
        email: &Email,
        password: &SecretString,
    ) -> Result<(), SessionError> {
        self.post(
            REGISTER_PATH,
            Some(&RegisterRequest {
                name,
                email,
                password,
            }),
        )
        .await
    }

    async fn request_password_reset(&self, email: &Email) -> Result<(), SessionError> {
        self.post(FORGOT_PASSWORD_PATH, Some(&ForgotPasswordRequest { email }))
            .await
    }

    async fn reset_password(
        &self,
        token: &ResetToken,
        password: &SecretString,
    ) -> Result<(), SessionError> {
        self.post(
            RESET_PASSWORD_PATH,
            Some(&ResetPasswordRequest { token, password }),
        )
        .await
    }

    async fn logout(&self) -> Result<(), SessionError> {
        self.post::<()>(LOGOUT_PATH, None).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use babyshoe_core::SessionUser;
    use serde_json::json;
    use url::Url;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client_for(server: &MockServer) -> SessionClient {
        let mut config = StorefrontConfig::new(
            Url::parse(&server.uri()).unwrap(),
            Url::parse("https://shop.example.com/").unwrap(),
        );
        config.request_timeout = Duration::from_secs(2);
        SessionClient::new(&config).unwrap()
    }

    fn email() -> Email {
        Email::parse("ada@example.com").unwrap()
    }

    #[tokio::test]
    async fn test_status_logged_in() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/auth/status"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"isLoggedIn": true, "user": {"name": "Ada"}})),
            )
            .mount(&server)
            .await;

        let state = client_for(&server).status().await.unwrap();
        assert_eq!(
            state,
            SessionState::LoggedIn {
                user: Some(SessionUser::named("Ada"))
            }
        );
    }

    #[tokio::test]
    async fn test_status_error_status_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/auth/status"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = client_for(&server).status().await.unwrap_err();
        assert!(matches!(err, SessionError::Rejected { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_status_garbage_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/auth/status"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let err = client_for(&server).status().await.unwrap_err();
        assert!(matches!(err, SessionError::Decode(_)));
    }

    #[tokio::test]
    async fn test_login_posts_credentials() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/login"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({"email": "ada@example.com", "password": "pw"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server)
            .login(&email(), &SecretString::from("pw"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_rejection_carries_server_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/register"))
            .respond_with(
                ResponseTemplate::new(409).set_body_json(json!({"error": "Email already registered"})),
            )
            .mount(&server)
            .await;

        let err = client_for(&server)
            .register("Ada", &email(), &SecretString::from("secret1"))
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "Email already registered");
    }

    #[tokio::test]
    async fn test_rejection_without_message_uses_fallback() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/forgot-password"))
            .respond_with(ResponseTemplate::new(400).set_body_string("bad"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .request_password_reset(&email())
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "An error occurred.");
    }

    #[tokio::test]
    async fn test_reset_password_posts_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/reset-password"))
            .and(body_json(json!({"token": "tok-1", "password": "Abc12345"})))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server)
            .reset_password(
                &ResetToken::new("tok-1").unwrap(),
                &SecretString::from("Abc12345"),
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_session_cookie_is_sent_back() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/login"))
            .respond_with(
                ResponseTemplate::new(200).insert_header("set-cookie", "sid=abc123; Path=/"),
            )
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/logout"))
            .and(header("cookie", "sid=abc123"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        client
            .login(&email(), &SecretString::from("pw"))
            .await
            .unwrap();
        client.logout().await.unwrap();
    }

    #[tokio::test]
    async fn test_shared_jar_keeps_session_cookie() {
        use reqwest::cookie::CookieStore;

        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/login"))
            .respond_with(
                ResponseTemplate::new(200).insert_header("set-cookie", "sid=xyz; Path=/"),
            )
            .mount(&server)
            .await;

        let config = StorefrontConfig::new(
            Url::parse(&server.uri()).unwrap(),
            Url::parse("https://shop.example.com/").unwrap(),
        );
        let jar = Arc::new(Jar::default());
        SessionClient::with_cookie_jar(&config, jar.clone())
            .unwrap()
            .login(&email(), &SecretString::from("pw"))
            .await
            .unwrap();

        let cookies = jar.cookies(&config.api_url("/api/logout").unwrap()).unwrap();
        assert_eq!(cookies.to_str().unwrap(), "sid=xyz");
    }

    #[tokio::test]
    async fn test_unreachable_server_is_connection_error() {
        // Reserve a port, then free it so nothing is listening there.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let config = StorefrontConfig::new(
            Url::parse(&format!("http://{addr}")).unwrap(),
            Url::parse("https://shop.example.com/").unwrap(),
        );
        let client = SessionClient::new(&config).unwrap();

        let err = client.logout().await.unwrap_err();
        assert!(err.is_connection());
        assert_eq!(err.user_message(), "Could not connect to the server.");
    }
}
